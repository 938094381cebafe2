use crate::domain::CommandRunner;
use crate::domain::command::format_command;
use crate::error::{DoxError, Result};
use std::sync::RwLock;

/// Recording `CommandRunner` double
///
/// Every call is stored as the space-joined command line. A command fails
/// when one of its arguments equals the configured failure token.
#[derive(Debug, Default)]
pub struct MockRunner {
    commands: RwLock<Vec<String>>,
    interactive: RwLock<Vec<String>>,
    fail_on: RwLock<Option<String>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_on(&self, token: &str) {
        *self.fail_on.write().unwrap() = Some(token.to_string());
    }

    /// Every command line seen, interactive ones included, in call order
    pub fn get_commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }

    pub fn get_interactive_commands(&self) -> Vec<String> {
        self.interactive.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.commands.read().unwrap().len()
    }

    fn record(&self, argv: &[String]) -> Result<()> {
        let line = format_command(argv);
        self.commands.write().unwrap().push(line.clone());

        if let Some(token) = self.fail_on.read().unwrap().as_deref() {
            if argv.iter().any(|arg| arg == token) {
                return Err(DoxError::Subprocess {
                    command: line,
                    detail: format!("mock failure on: {token}"),
                });
            }
        }
        Ok(())
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, argv: &[String]) -> Result<String> {
        self.record(argv)?;
        Ok(format!("ran: {}\n", format_command(argv)))
    }

    fn run_interactive(&self, argv: &[String]) -> Result<()> {
        self.interactive
            .write()
            .unwrap()
            .push(format_command(argv));
        self.record(argv)
    }
}
