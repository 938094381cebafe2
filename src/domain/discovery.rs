use std::collections::BTreeMap;
use std::path::PathBuf;

/// Compose files found in a project directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    pub base_file: Option<PathBuf>,
    /// Slice name -> file path, ordered by slice name
    pub slices: BTreeMap<String, PathBuf>,
    /// Base file first, then slices in slice-name order
    pub files: Vec<PathBuf>,
}

impl Discovery {
    pub fn new(base_file: Option<PathBuf>, slices: BTreeMap<String, PathBuf>) -> Self {
        let files = base_file
            .iter()
            .cloned()
            .chain(slices.values().cloned())
            .collect();

        Self {
            base_file,
            slices,
            files,
        }
    }

    pub fn slice(&self, name: &str) -> Option<&PathBuf> {
        self.slices.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
