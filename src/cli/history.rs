use crate::cli::Settings;
use crate::domain::HistoryEntry;
use crate::infra::history::{append_history, load_history};
use anyhow::Result;
use clap::Args;
use tracing::warn;

#[derive(Args, Debug)]
pub struct HistoryCommand {
    /// Number of entries to show
    #[arg(short = 'n', long, default_value_t = 10)]
    pub limit: usize,

    /// Only show commands run in the current directory
    #[arg(long)]
    pub here: bool,
}

pub fn run(cmd: HistoryCommand, settings: &Settings) -> Result<()> {
    let history = load_history(&settings.history_file)?;

    let entries: Vec<&HistoryEntry> = if cmd.here {
        let matching = history.in_directory(&settings.dir);
        let skip = matching.len().saturating_sub(cmd.limit);
        matching.into_iter().skip(skip).collect()
    } else {
        history.last(cmd.limit).iter().collect()
    };

    if entries.is_empty() {
        println!("No history yet");
        return Ok(());
    }

    for entry in entries {
        let status = if entry.exit_code == 0 { "ok" } else { "failed" };
        println!(
            "{}  [{}]  {}  ({})",
            entry.timestamp, status, entry.command, entry.directory
        );
    }

    Ok(())
}

/// Appends the finished invocation; a failure here never fails the command
pub fn record(settings: &Settings, command_line: &str, exit_code: i32) {
    let entry = HistoryEntry::now(command_line, &settings.dir, exit_code);
    if let Err(e) = append_history(&settings.history_file, entry) {
        warn!("Could not record history in {:?}: {}", settings.history_file, e);
    }
}
