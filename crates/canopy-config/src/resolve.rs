//! Path resolution for dataset references.
//!
//! Resolves relative and tilde-prefixed dataset paths to absolute paths.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a dataset path to an absolute path.
///
/// Handles three cases:
/// - Tilde paths (`~/data.json`) - expanded to home directory
/// - Relative paths (`./data.json`, `../shared/data.json`) - resolved
///   relative to `config_dir`
/// - Absolute paths (`/srv/data.json`) - returned as-is
///
/// Resolution is purely lexical: the file is not required to exist, so a
/// missing dataset surfaces as a read error when it is actually loaded.
pub fn resolve_dataset_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(config_dir.join(expanded))
    }
}

/// Expands a tilde prefix to the home directory.
///
/// - `~` alone becomes the home directory
/// - `~/foo` becomes home directory joined with `foo`
/// - Paths not starting with `~` are returned unchanged
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        let home = home_dir()?;
        return Ok(home.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_path() {
        let resolved = resolve_dataset_path("./data.json", Path::new("/etc/canopy")).unwrap();
        assert_eq!(resolved, PathBuf::from("/etc/canopy/data.json"));
    }

    #[test]
    fn test_resolve_relative_path_without_dot() {
        let resolved = resolve_dataset_path("data.json", Path::new("/etc/canopy")).unwrap();
        assert_eq!(resolved, PathBuf::from("/etc/canopy/data.json"));
    }

    #[test]
    fn test_resolve_parent_relative_path() {
        let resolved =
            resolve_dataset_path("../shared/data.json", Path::new("/home/user/project")).unwrap();
        // Lexical resolution keeps .. components intact
        assert_eq!(
            resolved,
            PathBuf::from("/home/user/project/../shared/data.json")
        );
    }

    #[test]
    fn test_resolve_absolute_path() {
        // config_dir shouldn't matter for absolute paths
        let resolved = resolve_dataset_path("/srv/data.json", Path::new("/other")).unwrap();
        assert_eq!(resolved, PathBuf::from("/srv/data.json"));
    }

    #[test]
    fn test_resolve_tilde_path() {
        let resolved = resolve_dataset_path("~/datasets/data.json", Path::new("/other")).unwrap();
        let home = BaseDirs::new().unwrap().home_dir().to_path_buf();
        assert_eq!(resolved, home.join("datasets/data.json"));
    }

    #[test]
    fn test_resolve_does_not_require_existence() {
        let resolved =
            resolve_dataset_path("./definitely-missing.json", Path::new("/etc/canopy")).unwrap();
        assert!(resolved.ends_with("definitely-missing.json"));
    }

    #[test]
    fn test_expand_tilde_forms() {
        let home = BaseDirs::new().unwrap().home_dir().to_path_buf();
        assert_eq!(expand_tilde("~").unwrap(), home);
        assert_eq!(
            expand_tilde("~/docs/data.json").unwrap(),
            home.join("docs/data.json")
        );
    }

    #[test]
    fn test_expand_leaves_plain_paths_alone() {
        for path in ["./data.json", "/absolute/path.json", "foo/~/bar"] {
            // Only a leading tilde means "home"; anywhere else it is a
            // literal path component.
            assert_eq!(expand_tilde(path).unwrap(), PathBuf::from(path));
        }
    }
}
