use crate::domain::{History, HistoryEntry};
use crate::error::{DoxError, Result};
use crate::infra::config::read_yaml;
use std::fs;
use std::path::Path;

/// Missing file yields an empty history
pub fn load_history(path: &Path) -> Result<History> {
    Ok(read_yaml::<History>(path)?.unwrap_or_default())
}

pub fn save_history(path: &Path, history: &History) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| DoxError::io(dir, e))?;
    }

    let content = serde_yml::to_string(history).map_err(|e| DoxError::Load {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    fs::write(path, content).map_err(|e| DoxError::io(path, e))
}

pub fn append_history(path: &Path, entry: HistoryEntry) -> Result<()> {
    let mut history = load_history(path)?;
    history.push(entry);
    save_history(path, &history)
}
