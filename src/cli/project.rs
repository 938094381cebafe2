use crate::cli::Settings;
use crate::domain::{GlobalConfig, ProjectReference};
use crate::domain::command::tokenize;
use crate::domain::project::parse_project_reference;
use crate::error::DoxError;
use crate::infra::config::load_global_config;
use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Args, Debug)]
pub struct ProjectsCommand {
    /// Print the path of this project instead of listing all of them
    pub name: Option<String>,
}

/// Root flags that may come before `@name`
const ROOT_FLAGS: [&str; 3] = ["-v", "--verbose", "--dry-run"];

/// Root options that take a value and may come before `@name`
const ROOT_OPTIONS: [&str; 3] = ["--dir", GLOBAL_CONFIG_FLAG, "--history-file"];

const GLOBAL_CONFIG_FLAG: &str = "--global-config";

/// Command line after resolving a leading `@project`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArgs {
    pub args: Vec<String>,
    /// Working directory of the referenced project
    pub project_dir: Option<PathBuf>,
}

/// An `@project` reference found after the root options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCall {
    /// Index of the `@name` argument
    pub position: usize,
    pub reference: ProjectReference,
    /// `--global-config` given before the reference
    pub global_config: Option<PathBuf>,
}

impl ProjectCall {
    /// `--global-config`, then `DOX_GLOBAL_CONFIG`, then the default path
    pub fn global_config_path(&self) -> PathBuf {
        self.global_config
            .clone()
            .unwrap_or_else(super::global_config_path)
    }
}

/// Skips leading root options and checks whether the first positional
/// argument is an `@project` reference.
pub fn find_project_call(args: &[String]) -> Option<ProjectCall> {
    let mut global_config = None;
    let mut position = 1;

    while let Some(arg) = args.get(position) {
        if ROOT_FLAGS.contains(&arg.as_str()) {
            position += 1;
            continue;
        }

        if let Some((option, value)) = arg.split_once('=') {
            if ROOT_OPTIONS.contains(&option) {
                if option == GLOBAL_CONFIG_FLAG {
                    global_config = Some(PathBuf::from(value));
                }
                position += 1;
                continue;
            }
        }

        if ROOT_OPTIONS.contains(&arg.as_str()) {
            let value = args.get(position + 1)?;
            if arg == GLOBAL_CONFIG_FLAG {
                global_config = Some(PathBuf::from(value));
            }
            position += 2;
            continue;
        }

        break;
    }

    let reference = parse_project_reference(args.get(position)?)?;
    Some(ProjectCall {
        position,
        reference,
        global_config,
    })
}

/// Rewrites `dox [root options] @name rest...` into
/// `dox [root options] rest...` run inside the project.
///
/// `@name` alone becomes `projects name`. The global config is only read,
/// through `load_global`, when a reference is present; anything else is
/// returned untouched.
pub fn resolve_project_args<F>(args: Vec<String>, load_global: F) -> Result<ResolvedArgs, DoxError>
where
    F: FnOnce(&Path) -> Result<GlobalConfig, DoxError>,
{
    let Some(call) = find_project_call(&args) else {
        return Ok(ResolvedArgs {
            args,
            project_dir: None,
        });
    };

    let global = load_global(&call.global_config_path())?;
    let name = call.reference.name;
    let entry = global
        .project(&name)
        .ok_or_else(|| DoxError::UnknownProject { name: name.clone() })?;
    debug!("@{} -> {:?}", name, entry.path);

    let mut rest = tokenize(&call.reference.rest);
    rest.extend(args[call.position + 1..].iter().cloned());

    let mut rewritten = args[..call.position].to_vec();
    if rest.is_empty() {
        rewritten.extend(["projects".to_string(), name]);
    } else {
        rewritten.extend(rest);
    }

    Ok(ResolvedArgs {
        args: rewritten,
        project_dir: Some(entry.path.clone()),
    })
}

pub fn run(cmd: ProjectsCommand, settings: &Settings) -> Result<()> {
    let global = load_global_config(&settings.global_config)?;

    if let Some(name) = cmd.name {
        let entry = global
            .project(&name)
            .ok_or(DoxError::UnknownProject { name })?;
        println!("{}", entry.path.display());
        return Ok(());
    }

    let names = global.project_names();
    if names.is_empty() {
        println!("No projects registered in {:?}", settings.global_config);
        return Ok(());
    }

    println!("Registered projects:");
    for name in names {
        let entry = &global.projects[name];
        match &entry.description {
            Some(description) => println!("  @{name}: {} - {description}", entry.path.display()),
            None => println!("  @{name}: {}", entry.path.display()),
        }
    }

    Ok(())
}
