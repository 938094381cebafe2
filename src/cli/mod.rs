pub mod compose;
pub mod history;
pub mod project;

use crate::infra::config::{default_global_config_path, default_history_path};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use compose::{ComposeAction, ComposeCommand, PassThrough};
use history::HistoryCommand;
use project::ProjectsCommand;
use std::path::PathBuf;

pub const GLOBAL_CONFIG_ENV: &str = "DOX_GLOBAL_CONFIG";

#[derive(Parser, Debug)]
#[command(
    name = "dox",
    version,
    about = "Docker Compose wrapper for simplified multi-file management",
    long_about = "Auto-discovers compose.yaml and slice files (compose.*.yaml), resolves \
                  profiles from dox.yaml, and provides shorthand commands, aliases and hooks."
)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Show commands without executing them
    #[arg(long)]
    pub dry_run: bool,

    /// Project directory (default: current directory)
    #[arg(long, env = "DOX_DIR")]
    pub dir: Option<PathBuf>,

    /// Global config file (default: ~/.config/dox/config.yaml)
    #[arg(long, env = GLOBAL_CONFIG_ENV)]
    pub global_config: Option<PathBuf>,

    /// History file (default: ~/.cache/dox/history.yaml)
    #[arg(long, env = "DOX_HISTORY_FILE")]
    pub history_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Docker Compose commands (alias: compose)
    #[command(name = "c", visible_alias = "compose")]
    Compose(ComposeCommand),
    /// Shorthand for `c status`
    S(PassThrough),
    /// List projects registered in the global config
    Projects(ProjectsCommand),
    /// Show recently executed commands
    History(HistoryCommand),
}

impl Commands {
    pub fn records_history(&self) -> bool {
        !matches!(self, Self::History(_) | Self::Projects(_))
    }
}

/// Process-level settings resolved from flags, env and defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub dir: PathBuf,
    pub dry_run: bool,
    pub verbose: bool,
    pub global_config: PathBuf,
    pub history_file: PathBuf,
}

impl Settings {
    /// `project_dir` comes from an `@project` reference and wins over `--dir`
    pub fn from_cli(cli: &Cli, project_dir: Option<PathBuf>) -> Result<Self> {
        let dir = match project_dir.or_else(|| cli.dir.clone()) {
            Some(dir) => dir,
            None => std::env::current_dir().context("reading current directory")?,
        };

        Ok(Self {
            dir,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
            global_config: cli
                .global_config
                .clone()
                .unwrap_or_else(global_config_path),
            history_file: cli
                .history_file
                .clone()
                .unwrap_or_else(default_history_path),
        })
    }
}

/// Global config path before clap has parsed anything
pub fn global_config_path() -> PathBuf {
    std::env::var_os(GLOBAL_CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(default_global_config_path)
}

pub fn run(command: Commands, settings: &Settings) -> Result<()> {
    match command {
        Commands::Compose(cmd) => compose::run(cmd, settings),
        Commands::S(pass) => compose::run(
            ComposeCommand {
                profile: None,
                action: ComposeAction::Status(pass),
            },
            settings,
        ),
        Commands::Projects(cmd) => project::run(cmd, settings),
        Commands::History(cmd) => history::run(cmd, settings),
    }
}
