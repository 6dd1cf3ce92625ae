//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules and resolving the dataset path.

use std::path::PathBuf;

use crate::{
    Config, ConfigError, SearchSettings,
    parse::{RawConfig, RawSearchSettings},
    resolve::resolve_dataset_path,
};

/// Largest edit distance the index can honor for fuzzy matching.
const MAX_FUZZY: u8 = 2;

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first
/// (closest to CWD), lowest precedence last (global config).
///
/// Merge rules:
/// - Search settings: first defined value wins (highest precedence)
/// - Dataset: the closest config that names one wins, resolved relative to
///   that config file's directory
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let search = merge_search_settings(configs);
    validate_search(&search)?;

    let dataset = merge_dataset(configs)?;
    let config_root = configs
        .first()
        .map(|c| c.path.parent().unwrap().to_path_buf());

    Ok(Config {
        dataset,
        search,
        config_root,
    })
}

/// Merges search settings, taking first defined value for each field.
fn merge_search_settings(configs: &[ParsedConfig]) -> SearchSettings {
    let mut result = SearchSettings::default();

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref search) = parsed.config.search {
            apply_raw_search(&mut result, search);
        }
    }

    result
}

/// Applies raw search settings to result, overwriting any present values.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(v) = raw.fuzzy {
        result.fuzzy = v;
    }
    if let Some(v) = raw.prefix {
        result.prefix = v;
    }
    if let Some(v) = raw.limit {
        result.limit = v;
    }
}

/// Rejects merged settings the search layer cannot honor.
fn validate_search(search: &SearchSettings) -> Result<(), ConfigError> {
    if search.fuzzy > MAX_FUZZY {
        return Err(ConfigError::InvalidSetting {
            setting: "search.fuzzy".to_string(),
            message: format!("must be at most {MAX_FUZZY}, got {}", search.fuzzy),
        });
    }
    if search.limit == 0 {
        return Err(ConfigError::InvalidSetting {
            setting: "search.limit".to_string(),
            message: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

/// Picks the dataset from the highest-precedence config that names one.
///
/// The path is resolved relative to the directory of the config file that
/// defined it, so `dataset = "./data.json"` always points next to its own
/// config file regardless of where the command runs.
fn merge_dataset(configs: &[ParsedConfig]) -> Result<Option<PathBuf>, ConfigError> {
    for parsed in configs {
        let Some(ref dataset) = parsed.config.dataset else {
            continue;
        };
        let config_dir = parsed.path.parent().unwrap();
        return resolve_dataset_path(dataset, config_dir).map(Some);
    }
    Ok(None)
}
