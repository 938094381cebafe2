//! Typed errors for the resolution and orchestration layer.
//!
//! The library returns [`DoxError`]; command handlers at the CLI boundary
//! convert it to [`anyhow::Error`] with `?`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DoxError {
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Malformed YAML or an unsupported `version`.
    #[error("failed to load {path:?}: {reason}")]
    Load { path: PathBuf, reason: String },

    #[error("profile '{profile}' not found")]
    ProfileNotFound { profile: String },

    #[error("profile '{profile}' extends non-existent profile '{parent}'")]
    ParentProfileNotFound { profile: String, parent: String },

    #[error("slice file 'compose.{slice}.yaml' not found for profile '{profile}'")]
    SliceNotFound { profile: String, slice: String },

    #[error("circular profile inheritance detected: '{profile}' reaches '{repeated}' twice")]
    CircularInheritance { profile: String, repeated: String },

    #[error("empty alias definition")]
    EmptyAliasDefinition,

    #[error("alias '{name}' not found. Available aliases: {}", available.join(", "))]
    AliasNotFound {
        name: String,
        available: Vec<String>,
    },

    #[error("{command} requires at least one {argument}")]
    MissingRequiredArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("no compose files found in {dir:?}")]
    NoComposeFilesFound { dir: PathBuf },

    #[error("{point} hook failed: {fragment}")]
    HookExecution {
        point: String,
        fragment: String,
        #[source]
        source: Box<DoxError>,
    },

    #[error("project '{name}' is not registered in the global config")]
    UnknownProject { name: String },

    #[error("command failed: {command}\n{detail}")]
    Subprocess { command: String, detail: String },

    #[error("failed to run alias '{alias}'")]
    Alias {
        alias: String,
        #[source]
        source: Box<DoxError>,
    },

    #[error("command {index} of {total} failed")]
    SequenceStep {
        index: usize,
        total: usize,
        #[source]
        source: Box<DoxError>,
    },
}

impl DoxError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Strips operation context (alias name, sequence index) and returns the
    /// underlying error. Hook failures are kept since they name the fragment.
    pub fn root(&self) -> &DoxError {
        match self {
            Self::Alias { source, .. } | Self::SequenceStep { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, DoxError>;
