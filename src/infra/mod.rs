pub mod config;
pub mod file_discovery;
pub mod history;
pub mod process_runner;

pub use file_discovery::discover;
pub use process_runner::ProcessRunner;
