use crate::domain::CommandRunner;
use crate::domain::command::format_command;
use crate::error::{DoxError, Result};
use std::path::PathBuf;
use std::process::{Command, Output};
use tracing::debug;

/// Runs commands as child processes
#[derive(Debug, Default, Clone)]
pub struct ProcessRunner {
    dry_run: bool,
    dir: Option<PathBuf>,
    env: Vec<(String, String)>,
}

impl ProcessRunner {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    fn command(&self, argv: &[String]) -> Result<Command> {
        let Some((program, args)) = argv.split_first() else {
            return Err(DoxError::Subprocess {
                command: String::new(),
                detail: "empty command".to_string(),
            });
        };

        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = &self.dir {
            cmd.current_dir(dir);
        }
        cmd.envs(self.env.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        Ok(cmd)
    }

    fn print_dry_run(argv: &[String]) -> String {
        let line = format_command(argv);
        println!("{line}");
        line
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, argv: &[String]) -> Result<String> {
        if self.dry_run {
            return Ok(Self::print_dry_run(argv));
        }

        let mut cmd = self.command(argv)?;
        debug!("Running: {}", format_command(argv));

        let output = cmd.output().map_err(|e| DoxError::Subprocess {
            command: format_command(argv),
            detail: e.to_string(),
        })?;

        ensure_success(argv, &output)?;
        Ok(combined_output(&output))
    }

    fn run_interactive(&self, argv: &[String]) -> Result<()> {
        if self.dry_run {
            Self::print_dry_run(argv);
            return Ok(());
        }

        let mut cmd = self.command(argv)?;
        debug!("Running interactively: {}", format_command(argv));

        let status = cmd.status().map_err(|e| DoxError::Subprocess {
            command: format_command(argv),
            detail: e.to_string(),
        })?;

        if !status.success() {
            return Err(DoxError::Subprocess {
                command: format_command(argv),
                detail: format!("exited with {status}"),
            });
        }

        Ok(())
    }
}

fn combined_output(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    text
}

fn ensure_success(argv: &[String], output: &Output) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }

    Err(DoxError::Subprocess {
        command: format_command(argv),
        detail: format!(
            "exited with {}\nstderr: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim_end()
        ),
    })
}
