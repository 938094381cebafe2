use crate::domain::{
    ArgumentVector, CommandSequence, ComposeSubcommand, Configuration, Convenience, Discovery,
    InvocationContext, ResolvedInvocation,
};
use crate::error::{DoxError, Result};
use crate::services::profile_resolver;

/// Program and subcommand every compose invocation starts with
pub const BASE_INVOCATION: [&str; 2] = ["docker", "compose"];

/// Builds `docker compose` invocations for one project directory
#[derive(Debug, Clone, Copy)]
pub struct CommandBuilder<'a> {
    ctx: &'a InvocationContext,
    config: &'a Configuration,
    discovery: &'a Discovery,
}

impl<'a> CommandBuilder<'a> {
    pub fn new(
        ctx: &'a InvocationContext,
        config: &'a Configuration,
        discovery: &'a Discovery,
    ) -> Self {
        Self {
            ctx,
            config,
            discovery,
        }
    }

    /// Profile from `--profile`, falling back to `defaults.profile`
    pub fn active_profile(&self) -> Option<&'a str> {
        self.ctx
            .profile
            .as_deref()
            .or_else(|| self.config.default_profile())
    }

    /// Files and env file for the active profile, or the discovered files
    /// when no profile applies. Fails when nothing resolves.
    pub fn resolve(&self) -> Result<ResolvedInvocation> {
        let resolved = match self.active_profile() {
            Some(profile) => profile_resolver::resolve(profile, self.config, self.discovery)?,
            None => ResolvedInvocation {
                files: self.discovery.files.clone(),
                env_file: None,
            },
        };

        if resolved.files.is_empty() {
            return Err(DoxError::NoComposeFilesFound {
                dir: self.ctx.dir.clone(),
            });
        }

        Ok(resolved)
    }

    pub fn build(&self, subcommand: ComposeSubcommand, args: &[String]) -> Result<ArgumentVector> {
        if args.is_empty() {
            if let Some(argument) = subcommand.required_argument() {
                return Err(DoxError::MissingRequiredArgument {
                    command: subcommand.as_str(),
                    argument,
                });
            }
        }

        let resolved = self.resolve()?;
        let mut argv = base(&resolved);
        argv.push(subcommand.as_str().to_string());
        argv.extend(args.iter().cloned());
        Ok(argv)
    }

    pub fn build_convenience(&self, operation: Convenience) -> Result<CommandSequence> {
        match operation {
            Convenience::Nuke => self.build_nuke(),
            Convenience::Fresh => self.build_fresh(),
            Convenience::Dup => self.build_dup(),
        }
    }

    /// `down -v --remove-orphans`
    pub fn build_nuke(&self) -> Result<CommandSequence> {
        let resolved = self.resolve()?;
        Ok(vec![with_tail(&resolved, &["down", "-v", "--remove-orphans"])])
    }

    /// `down -v`, then `up --build`
    pub fn build_fresh(&self) -> Result<CommandSequence> {
        let resolved = self.resolve()?;
        Ok(vec![
            with_tail(&resolved, &["down", "-v"]),
            with_tail(&resolved, &["up", "--build"]),
        ])
    }

    /// `down`, then `up`
    pub fn build_dup(&self) -> Result<CommandSequence> {
        let resolved = self.resolve()?;
        Ok(vec![
            with_tail(&resolved, &["down"]),
            with_tail(&resolved, &["up"]),
        ])
    }
}

/// `docker compose -f <file>... [--env-file <file>]`
fn base(resolved: &ResolvedInvocation) -> ArgumentVector {
    let mut argv: ArgumentVector = BASE_INVOCATION.iter().map(|s| s.to_string()).collect();

    for file in &resolved.files {
        argv.push("-f".to_string());
        argv.push(file.to_string_lossy().into_owned());
    }

    if let Some(env_file) = &resolved.env_file {
        argv.push("--env-file".to_string());
        argv.push(env_file.to_string_lossy().into_owned());
    }

    argv
}

fn with_tail(resolved: &ResolvedInvocation, tail: &[&str]) -> ArgumentVector {
    let mut argv = base(resolved);
    argv.extend(tail.iter().map(|s| s.to_string()));
    argv
}
