pub mod alias_expander;
mod command_builder;
pub mod hook_sequencer;
mod orchestrator;
pub mod profile_resolver;

pub use command_builder::{BASE_INVOCATION, CommandBuilder};
pub use orchestrator::{AliasListing, AliasScope, Operation, Orchestrator, Stage};
