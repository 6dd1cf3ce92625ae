//! Configuration system for canopy.
//!
//! canopy uses TOML configuration files named `canopy.toml`. Configuration is
//! resolved by walking up the directory tree from the current working
//! directory, collecting any `canopy.toml` files found, then loading the
//! global config from the platform config directory (for example
//! `~/.config/canopy/canopy.toml` on Linux) with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
#[cfg(test)]
mod test_support;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{RawConfig, RawSearchSettings, parse_config_file, parse_config_str};
pub use resolve::resolve_dataset_path;

/// Top-level merged configuration for canopy.
///
/// This represents the fully resolved configuration after merging all
/// discovered `canopy.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Resolved path to the dataset file, if any config names one.
    pub dataset: Option<PathBuf>,
    /// Search-related settings.
    pub search: SearchSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant
    /// `canopy.toml` files.
    ///
    /// This is the main entry point for loading configuration. It:
    /// 1. Discovers all `canopy.toml` files from `cwd` up to the filesystem root
    /// 2. Appends the global config if it exists
    /// 3. Parses each file
    /// 4. Merges them according to precedence rules (closest to `cwd` wins)
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    /// This is primarily useful for testing.
    ///
    /// Returns `Ok(Config::default())` if the list is empty.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }
}

/// Search-related settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    /// Maximum edit distance for fuzzy term matching (0 disables it).
    pub fuzzy: u8,
    /// Whether bare terms also match as word prefixes.
    pub prefix: bool,
    /// Maximum number of result rows the search command prints.
    pub limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            fuzzy: 1,
            prefix: true,
            limit: 50,
        }
    }
}
