pub mod cli;
pub mod domain;
pub mod error;
pub mod infra;
pub mod services;

// Make test_support available for integration tests
pub mod test_support;

pub use domain::{
    CommandRunner, ComposeSubcommand, Configuration, Convenience, Discovery, HookPoint,
    InvocationContext, Profile, ResolvedInvocation,
};
pub use error::DoxError;
pub use infra::{ProcessRunner, discover};
pub use services::{CommandBuilder, Operation, Orchestrator, Stage};
