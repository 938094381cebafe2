use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// User-scoped configuration (`~/.config/dox/config.yaml`)
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct GlobalConfig {
    /// Registered projects reachable with `dox @name`
    #[serde(default)]
    pub projects: HashMap<String, ProjectEntry>,

    /// Aliases available in every project
    #[serde(default)]
    pub aliases: HashMap<String, String>,
}

/// A project registration in the global config
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ProjectEntry {
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl GlobalConfig {
    pub fn project(&self, name: &str) -> Option<&ProjectEntry> {
        self.projects.get(name)
    }

    pub fn alias(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    /// Project names sorted for display
    pub fn project_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.projects.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Alias names sorted for display
    pub fn alias_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.aliases.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Parsed `@project [rest...]` reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectReference {
    pub name: String,
    /// Remaining command, trimmed; empty when only `@name` was given
    pub rest: String,
}

/// Parses `@name` optionally followed by whitespace and a command.
///
/// `name` is one or more of `[A-Za-z0-9_-]`. `@ c up` and `my@proj` are not
/// references. The target path is not checked here.
pub fn parse_project_reference(input: &str) -> Option<ProjectReference> {
    let body = input.strip_prefix('@')?;
    let name_len = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(body.len());

    if name_len == 0 {
        return None;
    }

    let (name, tail) = body.split_at(name_len);
    if !tail.is_empty() && !tail.starts_with(char::is_whitespace) {
        return None;
    }

    Some(ProjectReference {
        name: name.to_string(),
        rest: tail.trim().to_string(),
    })
}
