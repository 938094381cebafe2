use crate::domain::{Configuration, GlobalConfig};
use crate::error::{DoxError, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const PROJECT_CONFIG_NAME: &str = "dox.yaml";

const SUPPORTED_VERSIONS: [i64; 2] = [0, 1];

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

pub fn default_global_config_path() -> PathBuf {
    home_dir().join(".config/dox/config.yaml")
}

pub fn default_history_path() -> PathBuf {
    home_dir().join(".cache/dox/history.yaml")
}

pub fn project_config_path(dir: &Path) -> PathBuf {
    dir.join(PROJECT_CONFIG_NAME)
}

/// Loads `dox.yaml` from `dir`; a missing file yields the default configuration
pub fn load_project_config(dir: &Path) -> Result<Configuration> {
    let path = project_config_path(dir);

    let Some(config) = read_yaml::<Configuration>(&path)? else {
        debug!("No {} in {:?}, using defaults", PROJECT_CONFIG_NAME, dir);
        return Ok(Configuration::default());
    };

    validate(&config, &path)?;
    info!(
        "Loaded {:?} ({} profile(s), {} alias(es))",
        path,
        config.profiles.len(),
        config.aliases.len()
    );

    Ok(config)
}

fn validate(config: &Configuration, path: &Path) -> Result<()> {
    if !SUPPORTED_VERSIONS.contains(&config.version) {
        return Err(DoxError::Load {
            path: path.to_path_buf(),
            reason: format!("unsupported config version: {}", config.version),
        });
    }
    Ok(())
}

/// Loads the user-scoped config; a missing file yields an empty one.
/// Project paths get `~` expanded.
pub fn load_global_config(path: &Path) -> Result<GlobalConfig> {
    let Some(mut config) = read_yaml::<GlobalConfig>(path)? else {
        debug!("No global config at {:?}", path);
        return Ok(GlobalConfig::default());
    };

    for entry in config.projects.values_mut() {
        let raw = entry.path.to_string_lossy();
        let expanded = shellexpand::tilde(raw.as_ref()).into_owned();
        entry.path = PathBuf::from(expanded);
    }

    Ok(config)
}

/// `Ok(None)` when the file does not exist; empty files parse as defaults
pub(crate) fn read_yaml<T>(path: &Path) -> Result<Option<T>>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| DoxError::io(path, e))?;
    if content.trim().is_empty() {
        return Ok(Some(T::default()));
    }

    serde_yml::from_str(&content)
        .map(Some)
        .map_err(|e| DoxError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}
