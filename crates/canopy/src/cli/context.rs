//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use canopy_config::Config;
use canopy_filter::MatchOptions;
use canopy_index::SearchIndex;
use canopy_model::{Dataset, Document, NodeId, extract};

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `parse`, which should keep working even when an existing
    /// config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Resolves and loads the dataset for this invocation.
    ///
    /// A path given on the command line wins over the `dataset` entry in
    /// canopy.toml. With neither, prints an error and fails.
    pub fn open_dataset(&self, cli_path: Option<&Path>) -> Result<LoadedDataset, ExitCode> {
        let path = match cli_path {
            Some(path) => path.to_path_buf(),
            None => match &self.config.dataset {
                Some(path) => path.clone(),
                None => {
                    eprintln!("error: no dataset given");
                    eprintln!("Pass a dataset path, or set `dataset` in canopy.toml.");
                    return Err(ExitCode::FAILURE);
                }
            },
        };

        let dataset = match Dataset::from_json_file(&path) {
            Ok(dataset) => dataset,
            Err(e) => {
                eprintln!("error: failed to load dataset {}: {e}", path.display());
                return Err(ExitCode::FAILURE);
            }
        };

        let documents = extract(dataset.root());
        Ok(LoadedDataset {
            path,
            dataset,
            documents,
        })
    }

    /// Match options for bare query terms: config settings plus an
    /// optional CLI fuzzy override.
    pub fn term_options(&self, fuzzy_override: Option<u8>) -> MatchOptions {
        MatchOptions {
            prefix: self.config.search.prefix,
            fuzzy: fuzzy_override.unwrap_or(self.config.search.fuzzy),
            phrase: false,
        }
    }

    /// Result row limit: CLI override first, then config.
    pub fn limit(&self, cli_limit: Option<usize>) -> usize {
        cli_limit.unwrap_or(self.config.search.limit)
    }
}

/// A dataset opened for one command invocation.
pub struct LoadedDataset {
    /// Path the dataset was read from.
    pub path: PathBuf,
    /// The parsed category tree.
    pub dataset: Dataset,
    /// One searchable document per named node.
    pub documents: Vec<Document>,
}

impl LoadedDataset {
    /// Builds the in-memory search index over the extracted documents.
    pub fn build_index(&self) -> Result<SearchIndex, ExitCode> {
        SearchIndex::build(&self.documents).map_err(|e| {
            eprintln!("error: failed to build search index: {e}");
            ExitCode::FAILURE
        })
    }

    /// Looks up the breadcrumb path of a node.
    pub fn path_of(&self, id: NodeId) -> &str {
        self.documents
            .iter()
            .find(|document| document.id == id)
            .map_or("", |document| document.path.as_str())
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
