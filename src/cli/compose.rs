use crate::cli::Settings;
use crate::domain::{ComposeSubcommand, Convenience, InvocationContext};
use crate::infra::config::{load_global_config, load_project_config};
use crate::infra::{ProcessRunner, discover};
use crate::services::{Operation, Orchestrator};
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::sync::Arc;
use tracing::debug;

const COMPOSE_VERBOSE_ENV: &str = "DOCKER_COMPOSE_VERBOSE";

#[derive(Args, Debug)]
pub struct ComposeCommand {
    /// Profile to use from dox.yaml
    #[arg(short, long)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub action: ComposeAction,
}

/// Arguments passed through to docker compose
#[derive(Args, Debug, Default)]
pub struct PassThrough {
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum ComposeAction {
    /// Start services (runs pre_up/post_up hooks)
    Up(PassThrough),
    /// Stop services (runs pre_down/post_down hooks)
    Down(PassThrough),
    /// List containers
    Ps(PassThrough),
    /// View service logs
    Logs(PassThrough),
    /// Restart one or more services
    Restart(PassThrough),
    /// Execute a command in a running service container
    Exec(PassThrough),
    /// Build or rebuild images
    Build(PassThrough),
    /// Show service status
    Status(PassThrough),
    /// Remove containers, volumes and orphans (down -v --remove-orphans)
    Nuke,
    /// Clean rebuild (down -v, then up --build)
    Fresh,
    /// Down then up
    Dup,
    /// Run an alias from dox.yaml; lists aliases when no name is given
    Alias {
        name: Option<String>,
    },
}

impl ComposeAction {
    /// `None` for alias listing, which executes nothing
    pub fn operation(self) -> Option<Operation> {
        let compose = |subcommand, pass: PassThrough| Operation::Compose {
            subcommand,
            args: pass.args,
        };

        let operation = match self {
            Self::Up(pass) => compose(ComposeSubcommand::Up, pass),
            Self::Down(pass) => compose(ComposeSubcommand::Down, pass),
            Self::Ps(pass) | Self::Status(pass) => compose(ComposeSubcommand::Ps, pass),
            Self::Logs(pass) => compose(ComposeSubcommand::Logs, pass),
            Self::Restart(pass) => compose(ComposeSubcommand::Restart, pass),
            Self::Exec(pass) => compose(ComposeSubcommand::Exec, pass),
            Self::Build(pass) => compose(ComposeSubcommand::Build, pass),
            Self::Nuke => Operation::Convenience(Convenience::Nuke),
            Self::Fresh => Operation::Convenience(Convenience::Fresh),
            Self::Dup => Operation::Convenience(Convenience::Dup),
            Self::Alias { name: Some(name) } => Operation::Alias { name },
            Self::Alias { name: None } => return None,
        };
        Some(operation)
    }
}

pub fn run(cmd: ComposeCommand, settings: &Settings) -> Result<()> {
    let ctx = InvocationContext::new(&settings.dir)
        .with_profile(cmd.profile)
        .with_dry_run(settings.dry_run)
        .with_verbose(settings.verbose);

    let mut orchestrator = build_orchestrator(ctx, settings)?;

    match cmd.action.operation() {
        Some(operation) => {
            debug!("Executing {:?}", operation);
            orchestrator.execute(&operation)?;
        }
        None => list_aliases(&orchestrator),
    }

    Ok(())
}

fn build_orchestrator(ctx: InvocationContext, settings: &Settings) -> Result<Orchestrator> {
    let config = load_project_config(ctx.dir())?;
    let discovery = discover(ctx.dir())
        .with_context(|| format!("discovering compose files in {:?}", ctx.dir()))?;
    let global = load_global_config(&settings.global_config)?;
    let runner = process_runner(&ctx);

    Ok(Orchestrator::new(ctx, config, discovery, Arc::new(runner)).with_global(global))
}

/// Runner rooted in the project directory; verbose runs also make compose verbose
fn process_runner(ctx: &InvocationContext) -> ProcessRunner {
    let runner = ProcessRunner::new(ctx.dry_run).with_dir(ctx.dir());
    if ctx.verbose {
        return runner.with_env(COMPOSE_VERBOSE_ENV, "1");
    }
    runner
}

fn list_aliases(orchestrator: &Orchestrator) {
    let aliases = orchestrator.aliases();
    if aliases.is_empty() {
        println!("No aliases defined in dox.yaml");
        return;
    }

    println!("Available aliases:");
    for alias in aliases {
        println!("  {}: {} ({})", alias.name, alias.definition, alias.scope);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CommandRunner;

    fn pass(args: &[&str]) -> PassThrough {
        PassThrough {
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn status_is_ps() {
        assert_eq!(
            ComposeAction::Status(pass(&["-a"])).operation(),
            Some(Operation::Compose {
                subcommand: ComposeSubcommand::Ps,
                args: vec!["-a".into()],
            })
        );
    }

    #[test]
    fn convenience_actions() {
        assert_eq!(
            ComposeAction::Nuke.operation(),
            Some(Operation::Convenience(Convenience::Nuke))
        );
        assert_eq!(
            ComposeAction::Dup.operation(),
            Some(Operation::Convenience(Convenience::Dup))
        );
    }

    #[test]
    fn alias_without_name_lists() {
        assert_eq!(ComposeAction::Alias { name: None }.operation(), None);
        assert_eq!(
            ComposeAction::Alias {
                name: Some("reset".into())
            }
            .operation(),
            Some(Operation::Alias {
                name: "reset".into()
            })
        );
    }

    #[cfg(unix)]
    #[test]
    fn verbose_runner_exports_compose_verbose() {
        let temp = tempfile::tempdir().unwrap();
        let print_env = vec![
            "sh".to_string(),
            "-c".to_string(),
            format!("echo \"${COMPOSE_VERBOSE_ENV}\""),
        ];

        let verbose = InvocationContext::new(temp.path()).with_verbose(true);
        let out = process_runner(&verbose).run(&print_env).unwrap();
        assert_eq!(out.trim(), "1");

        let quiet = InvocationContext::new(temp.path());
        let out = process_runner(&quiet).run(&print_env).unwrap();
        assert_eq!(out.trim(), "");
    }

    #[cfg(unix)]
    #[test]
    fn runner_works_in_project_dir() {
        let temp = tempfile::tempdir().unwrap();
        let ctx = InvocationContext::new(temp.path());

        let pwd = process_runner(&ctx).run(&["pwd".to_string()]).unwrap();

        assert_eq!(
            std::path::PathBuf::from(pwd.trim()).canonicalize().unwrap(),
            temp.path().canonicalize().unwrap()
        );
    }
}
