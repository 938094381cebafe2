pub mod command;
mod config;
mod context;
mod discovery;
mod history;
pub mod project;
pub mod traits;

pub use command::{
    ArgumentVector, CHAIN_OPERATOR, CommandSequence, ComposeSubcommand, Convenience, HookPoint,
};
pub use config::{Configuration, Defaults, Profile, ResolvedInvocation};
pub use context::InvocationContext;
pub use discovery::Discovery;
pub use history::{History, HistoryEntry};
pub use project::{GlobalConfig, ProjectEntry, ProjectReference};
pub use traits::CommandRunner;
