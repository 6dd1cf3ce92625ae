//! Locating `canopy.toml` files.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = "canopy.toml";

/// Collects every `canopy.toml` that applies to `cwd`, nearest first.
///
/// Each ancestor directory of `cwd` (including `cwd` itself) may carry
/// one config file. A file marked `root = true` ends the walk and
/// shadows everything above it, including the global config; otherwise
/// the global file from the platform config directory, when present,
/// comes last with lowest precedence.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();

    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if !candidate.is_file() {
            continue;
        }
        let stop = is_root_config(&candidate);
        found.push(candidate);
        if stop {
            return found;
        }
    }

    if let Some(global) = global_config_path()
        && global.is_file()
        && !found.contains(&global)
    {
        found.push(global);
    }
    found
}

/// The global configuration file, for example
/// `~/.config/canopy/canopy.toml` on Linux.
///
/// `None` when the platform config directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "canopy").map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Whether `path` is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Sandbox;

    /// Discovery result with the machine's real global config, if any,
    /// stripped out so tests see only the sandbox.
    fn discover_local(cwd: &Path) -> Vec<PathBuf> {
        discover_config_files(cwd)
            .into_iter()
            .filter(|path| !is_global_config(path))
            .collect()
    }

    #[test]
    fn empty_tree_finds_nothing() {
        let sandbox = Sandbox::new();
        let deep = sandbox.mkdir("x/y/z");
        assert!(discover_local(&deep).is_empty());
    }

    #[test]
    fn config_found_from_descendants_and_from_its_own_directory() {
        let sandbox = Sandbox::new();
        let config = sandbox.empty_config_in("project");
        let nested = sandbox.mkdir("project/data/2024");

        assert_eq!(discover_local(&nested), vec![config.clone()]);
        assert_eq!(discover_local(&sandbox.root().join("project")), vec![config]);
    }

    #[test]
    fn nearest_config_comes_first() {
        let sandbox = Sandbox::new();
        let outer = sandbox.empty_config_in("");
        let middle = sandbox.empty_config_in("work");
        let inner = sandbox.empty_config_in("work/atlas");
        let cwd = sandbox.mkdir("work/atlas/src");

        assert_eq!(discover_local(&cwd), vec![inner, middle, outer]);
    }

    #[test]
    fn sibling_directories_do_not_leak() {
        let sandbox = Sandbox::new();
        sandbox.empty_config_in("other");
        let cwd = sandbox.mkdir("project");
        assert!(discover_local(&cwd).is_empty());
    }

    #[test]
    fn root_marker_shadows_everything_above() {
        let sandbox = Sandbox::new();
        sandbox.empty_config_in("");
        let marked = sandbox.config_in("project", "root = true\n");
        let cwd = sandbox.mkdir("project/src");

        // The root-marked file also suppresses the global config, so
        // the unfiltered result is exactly one file.
        assert_eq!(discover_config_files(&cwd), vec![marked]);
    }

    #[test]
    fn configs_below_a_root_marker_still_apply() {
        let sandbox = Sandbox::new();
        sandbox.empty_config_in("");
        let marked = sandbox.config_in("project", "root = true\n");
        let local = sandbox.empty_config_in("project/experiments");
        let cwd = sandbox.mkdir("project/experiments/run1");

        assert_eq!(discover_config_files(&cwd), vec![local, marked]);
    }

    #[test]
    fn explicit_root_false_keeps_walking() {
        let sandbox = Sandbox::new();
        let outer = sandbox.empty_config_in("");
        let inner = sandbox.config_in("project", "root = false\n");
        let cwd = sandbox.mkdir("project/src");

        assert_eq!(discover_local(&cwd), vec![inner, outer]);
    }

    #[test]
    fn directory_with_the_config_name_is_ignored() {
        let sandbox = Sandbox::new();
        sandbox.mkdir(CONFIG_FILENAME);
        assert!(discover_local(sandbox.root()).is_empty());
    }

    #[test]
    fn global_path_ends_with_the_config_name() {
        let global = global_config_path().unwrap();
        assert!(global.ends_with(CONFIG_FILENAME));
        assert!(is_global_config(&global));
        assert!(!is_global_config(Path::new("/elsewhere/canopy.toml")));
    }
}
