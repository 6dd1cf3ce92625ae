//! Shared test fixture: a throwaway directory tree with config files.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A scratch directory tree for exercising discovery and loading.
///
/// Paths are given relative to the sandbox root; intermediate
/// directories are created on demand.
pub struct Sandbox {
    /// Temporary root, removed on drop.
    dir: TempDir,
}

impl Sandbox {
    /// Creates an empty sandbox.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// The sandbox root directory.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Creates (and returns) a directory under the root.
    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes an arbitrary file under the root.
    pub fn write_file(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    /// Writes a `canopy.toml` with the given body in a subdirectory
    /// (`""` for the sandbox root itself).
    pub fn config_in(&self, rel_dir: &str, body: &str) -> PathBuf {
        let dir = self.mkdir(rel_dir);
        let path = dir.join(CONFIG_FILENAME);
        fs::write(&path, body).unwrap();
        path
    }

    /// Writes an empty `canopy.toml` in a subdirectory.
    pub fn empty_config_in(&self, rel_dir: &str) -> PathBuf {
        self.config_in(rel_dir, "")
    }
}
