use crate::domain::{Configuration, Discovery, Profile, ResolvedInvocation};
use crate::error::{DoxError, Result};
use std::collections::HashSet;
use tracing::debug;

/// Resolves a profile into compose files and an env file.
///
/// Ancestor slices come before descendant slices, and a slice listed more
/// than once keeps its first position. The discovered base file, when present,
/// is always first. An empty result is not an error here.
pub fn resolve(
    profile_name: &str,
    config: &Configuration,
    discovery: &Discovery,
) -> Result<ResolvedInvocation> {
    let profile = config
        .profiles
        .get(profile_name)
        .ok_or_else(|| DoxError::ProfileNotFound {
            profile: profile_name.to_string(),
        })?;

    let lineage = lineage(profile_name, profile, config)?;

    let mut seen = HashSet::new();
    let mut files: Vec<_> = discovery.base_file.iter().cloned().collect();

    for slice in lineage.iter().rev().flat_map(|p| p.slices.iter()) {
        if !seen.insert(slice.as_str()) {
            continue;
        }

        let file = discovery
            .slice(slice)
            .ok_or_else(|| DoxError::SliceNotFound {
                profile: profile_name.to_string(),
                slice: slice.clone(),
            })?;
        files.push(file.clone());
    }

    let env_file = resolve_env_file(profile, config);
    debug!(
        "Profile '{}' -> {} file(s), env file {:?}",
        profile_name,
        files.len(),
        env_file
    );

    Ok(ResolvedInvocation { files, env_file })
}

/// The profile followed by its ancestors, nearest first
fn lineage<'a>(
    profile_name: &'a str,
    profile: &'a Profile,
    config: &'a Configuration,
) -> Result<Vec<&'a Profile>> {
    let mut visited = HashSet::from([profile_name]);
    let mut chain = vec![profile];
    let mut next = profile.parent();

    while let Some(parent_name) = next {
        if !visited.insert(parent_name) {
            return Err(DoxError::CircularInheritance {
                profile: profile_name.to_string(),
                repeated: parent_name.to_string(),
            });
        }

        let parent = config
            .profiles
            .get(parent_name)
            .ok_or_else(|| DoxError::ParentProfileNotFound {
                profile: profile_name.to_string(),
                parent: parent_name.to_string(),
            })?;

        chain.push(parent);
        next = parent.parent();
    }

    Ok(chain)
}

/// Literal `env_file` on the leaf wins, then the `env` alias
fn resolve_env_file(profile: &Profile, config: &Configuration) -> Option<std::path::PathBuf> {
    if let Some(path) = profile.env_file.as_ref().filter(|p| !p.as_os_str().is_empty()) {
        return Some(path.clone());
    }

    let alias = profile.env_alias()?;
    let path = config.env_files.get(alias);
    if path.is_none() {
        debug!("env alias '{}' not defined in env_files", alias);
    }
    path.cloned()
}
