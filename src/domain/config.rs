use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Configuration loaded from the project's `dox.yaml`
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct Configuration {
    /// Schema version (only 0 and 1 are accepted by the loader)
    #[serde(default)]
    pub version: i64,

    #[serde(default)]
    pub profiles: HashMap<String, Profile>,

    /// Named env files that profiles can reference through `env`
    #[serde(default)]
    pub env_files: HashMap<String, PathBuf>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Alias name -> raw command chain (`down -v && up -d`)
    #[serde(default)]
    pub aliases: HashMap<String, String>,

    /// Hook point name (`pre_up`, ...) -> ordered shell fragments
    #[serde(default)]
    pub hooks: HashMap<String, Vec<String>>,
}

/// A named, ordered selection of slices
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct Profile {
    #[serde(default)]
    pub slices: Vec<String>,

    /// Literal env file path, wins over `env`
    #[serde(default)]
    pub env_file: Option<PathBuf>,

    /// Reference into `env_files`
    #[serde(default)]
    pub env: Option<String>,

    /// Parent profile whose slices come first
    #[serde(default)]
    pub extends: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct Defaults {
    #[serde(default)]
    pub profile: Option<String>,
}

impl Configuration {
    pub fn default_profile(&self) -> Option<&str> {
        self.defaults.profile.as_deref().filter(|p| !p.is_empty())
    }

    pub fn hooks_for(&self, point: &str) -> &[String] {
        self.hooks.get(point).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Alias names sorted for display
    pub fn alias_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.aliases.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Profile {
    /// Parent name, treating an empty `extends:` as no parent
    pub fn parent(&self) -> Option<&str> {
        self.extends.as_deref().filter(|p| !p.is_empty())
    }

    pub fn env_alias(&self) -> Option<&str> {
        self.env.as_deref().filter(|e| !e.is_empty())
    }
}

/// Files and env file produced by resolving a profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedInvocation {
    pub files: Vec<PathBuf>,
    pub env_file: Option<PathBuf>,
}
