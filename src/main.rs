use anyhow::Result;
use clap::Parser;
use dox::cli::project::resolve_project_args;
use dox::cli::{self, Cli, Settings};
use dox::infra::config::load_global_config;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "dox=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    match run(std::env::args().collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(raw_args: Vec<String>) -> Result<()> {
    let command_line = raw_args.iter().skip(1).cloned().collect::<Vec<_>>().join(" ");

    let resolved = resolve_project_args(raw_args, load_global_config)?;

    let parsed = Cli::parse_from(resolved.args.iter());
    init_tracing(parsed.verbose);

    let settings = Settings::from_cli(&parsed, resolved.project_dir)?;
    let records_history = parsed.command.records_history() && !settings.dry_run;

    let result = cli::run(parsed.command, &settings);

    if records_history {
        let exit_code = if result.is_ok() { 0 } else { 1 };
        cli::history::record(&settings, &command_line, exit_code);
    }

    result
}
