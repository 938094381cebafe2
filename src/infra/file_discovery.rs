use crate::domain::Discovery;
use crate::error::{DoxError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Base files to look for, in order of preference
pub const BASE_CANDIDATES: [&str; 4] = [
    "compose.yaml",
    "docker-compose.yaml",
    "compose.yml",
    "docker-compose.yml",
];

const SLICE_PREFIX: &str = "compose.";
const PREFERRED_EXT: &str = ".yaml";
const ALTERNATE_EXT: &str = ".yml";

/// Scans `dir` for a base compose file and `compose.<name>.yaml|yml` slices.
///
/// When a slice exists under both extensions the `.yaml` file wins and the
/// `.yml` one is dropped. Only the top level of `dir` is read.
pub fn discover(dir: &Path) -> Result<Discovery> {
    let entries = fs::read_dir(dir).map_err(|e| DoxError::io(dir, e))?;

    let base_file = BASE_CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file());

    let mut preferred = BTreeMap::new();
    let mut alternate = BTreeMap::new();

    for entry in entries {
        let entry = entry.map_err(|e| DoxError::io(dir, e))?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if let Some(slice) = slice_name(file_name, PREFERRED_EXT) {
            debug!("Slice '{}' -> {:?}", slice, path);
            preferred.insert(slice.to_string(), path.clone());
        } else if let Some(slice) = slice_name(file_name, ALTERNATE_EXT) {
            debug!("Slice '{}' -> {:?}", slice, path);
            alternate.insert(slice.to_string(), path.clone());
        }
    }

    for (name, path) in alternate {
        if preferred.contains_key(&name) {
            debug!("Ignoring {:?}, '{}' already has a {} file", path, name, PREFERRED_EXT);
            continue;
        }
        preferred.insert(name, path);
    }

    let discovery = Discovery::new(base_file, preferred);
    if discovery.is_empty() {
        debug!("No compose files in {:?}", dir);
    }
    Ok(discovery)
}

/// `compose.<name><ext>` -> `<name>`; the base file itself has no name
fn slice_name<'a>(file_name: &'a str, ext: &str) -> Option<&'a str> {
    file_name
        .strip_prefix(SLICE_PREFIX)?
        .strip_suffix(ext)
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "services: {}\n").unwrap();
    }

    #[test]
    fn test_discovery_empty_directory() {
        let temp = TempDir::new().unwrap();
        let discovery = discover(temp.path()).unwrap();

        assert!(discovery.base_file.is_none());
        assert!(discovery.slices.is_empty());
        assert!(discovery.files.is_empty());
    }

    #[test]
    fn test_base_and_slices_are_ordered() {
        let temp = TempDir::new().unwrap();
        for name in ["compose.yaml", "compose.web.yaml", "compose.db.yaml", "compose.api.yml"] {
            touch(temp.path(), name);
        }

        let discovery = discover(temp.path()).unwrap();

        assert_eq!(
            discovery.base_file,
            Some(temp.path().join("compose.yaml"))
        );
        let expected: Vec<PathBuf> = ["compose.yaml", "compose.api.yml", "compose.db.yaml", "compose.web.yaml"]
            .iter()
            .map(|n| temp.path().join(n))
            .collect();
        assert_eq!(discovery.files, expected);
    }

    #[test]
    fn test_base_preference_order() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "docker-compose.yml");
        touch(temp.path(), "compose.yml");
        touch(temp.path(), "docker-compose.yaml");

        let discovery = discover(temp.path()).unwrap();
        assert_eq!(
            discovery.base_file,
            Some(temp.path().join("docker-compose.yaml"))
        );
        // compose.yml is a base candidate, not a slice
        assert!(discovery.slices.is_empty());
        assert_eq!(discovery.files.len(), 1);
    }

    #[test]
    fn test_yaml_slice_wins_over_yml() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "compose.dev.yml");
        touch(temp.path(), "compose.dev.yaml");
        touch(temp.path(), "compose.db.yml");

        let discovery = discover(temp.path()).unwrap();

        assert_eq!(discovery.slices.len(), 2);
        assert_eq!(
            discovery.slice("dev"),
            Some(&temp.path().join("compose.dev.yaml"))
        );
        // A .yaml file for another slice must not hide this one
        assert_eq!(
            discovery.slice("db"),
            Some(&temp.path().join("compose.db.yml"))
        );
    }

    #[test]
    fn test_ignores_directories_and_unrelated_files() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("compose.cache.yaml")).unwrap();
        touch(temp.path(), "README.md");
        touch(temp.path(), "compose..yaml");
        touch(temp.path(), "docker-compose.dev.yaml");
        touch(temp.path(), "compose.dev.json");

        let discovery = discover(temp.path()).unwrap();
        assert!(discovery.is_empty());
    }

    #[test]
    fn test_unreadable_directory_is_io_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");

        let err = discover(&missing).unwrap_err();
        assert!(matches!(err, DoxError::Io { .. }));
    }

    #[test]
    fn test_dotted_slice_names() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "compose.dev.local.yaml");

        let discovery = discover(temp.path()).unwrap();
        assert!(discovery.slice("dev.local").is_some());
    }
}
