use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Executed dox commands, oldest first
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct History {
    #[serde(default)]
    pub entries: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct HistoryEntry {
    /// RFC 3339, UTC
    pub timestamp: String,
    pub command: String,
    pub directory: String,
    pub exit_code: i32,
}

impl HistoryEntry {
    pub fn now(command: impl Into<String>, directory: &Path, exit_code: i32) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            command: command.into(),
            directory: directory.to_string_lossy().into_owned(),
            exit_code,
        }
    }
}

impl History {
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// The last `n` entries, oldest first
    pub fn last(&self, n: usize) -> &[HistoryEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn in_directory(&self, dir: &Path) -> Vec<&HistoryEntry> {
        let dir = dir.to_string_lossy();
        self.entries
            .iter()
            .filter(|e| e.directory == dir)
            .collect()
    }
}
