use crate::error::{DoxError, Result};
use std::fmt::Debug;

/// Trait for the subprocess boundary
pub trait CommandRunner: Send + Sync + Debug {
    /// Run a command and return its captured combined output
    fn run(&self, argv: &[String]) -> Result<String>;

    /// Run a command attached to the terminal (logs -f, exec -it)
    fn run_interactive(&self, argv: &[String]) -> Result<()>;

    /// Run commands in order, stopping at the first failure
    fn run_sequence(&self, commands: &[Vec<String>]) -> Result<String> {
        let total = commands.len();
        let mut output = String::new();

        for (i, argv) in commands.iter().enumerate() {
            let out = self.run(argv).map_err(|source| DoxError::SequenceStep {
                index: i + 1,
                total,
                source: Box::new(source),
            })?;
            output.push_str(&out);
        }

        Ok(output)
    }
}
