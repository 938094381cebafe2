use crate::domain::command::format_command;
use crate::domain::{
    ArgumentVector, CommandRunner, CommandSequence, ComposeSubcommand, Configuration, Convenience,
    Discovery, GlobalConfig, HookPoint, InvocationContext,
};
use crate::error::{DoxError, Result};
use crate::services::{CommandBuilder, alias_expander, hook_sequencer};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// A single operation requested on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Compose {
        subcommand: ComposeSubcommand,
        args: Vec<String>,
    },
    Convenience(Convenience),
    Alias {
        name: String,
    },
}

/// Progress of one `execute` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    FilesResolved,
    PreHooksRun,
    CommandExecuted,
    PostHooksRun,
    Done,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasScope {
    Project,
    Global,
}

impl fmt::Display for AliasScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project => write!(f, "project"),
            Self::Global => write!(f, "global"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasListing {
    pub name: String,
    pub definition: String,
    pub scope: AliasScope,
}

/// Ties file resolution, hooks and the runner together for one invocation
#[derive(Debug)]
pub struct Orchestrator {
    ctx: InvocationContext,
    config: Configuration,
    discovery: Discovery,
    global: GlobalConfig,
    runner: Arc<dyn CommandRunner>,
    stage: Stage,
}

impl Orchestrator {
    pub fn new(
        ctx: InvocationContext,
        config: Configuration,
        discovery: Discovery,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            ctx,
            config,
            discovery,
            global: GlobalConfig::default(),
            runner,
            stage: Stage::Idle,
        }
    }

    /// User-scoped config whose aliases back up the project ones
    pub fn with_global(mut self, global: GlobalConfig) -> Self {
        self.global = global;
        self
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn builder(&self) -> CommandBuilder<'_> {
        CommandBuilder::new(&self.ctx, &self.config, &self.discovery)
    }

    /// Project aliases then global ones, each sorted by name. A global alias
    /// shadowed by a project alias is left out.
    pub fn aliases(&self) -> Vec<AliasListing> {
        let mut listing: Vec<AliasListing> = self
            .config
            .alias_names()
            .into_iter()
            .map(|name| AliasListing {
                name: name.to_string(),
                definition: self.config.aliases[name].clone(),
                scope: AliasScope::Project,
            })
            .collect();

        let global = self
            .global
            .alias_names()
            .into_iter()
            .filter(|name| !self.config.aliases.contains_key(*name))
            .map(|name| AliasListing {
                name: name.to_string(),
                definition: self.global.aliases[name].clone(),
                scope: AliasScope::Global,
            });
        listing.extend(global);

        listing
    }

    pub fn execute(&mut self, operation: &Operation) -> Result<()> {
        self.stage = Stage::Idle;
        let result = self.drive(operation);

        match &result {
            Ok(()) => self.transition(Stage::Done),
            Err(e) => {
                debug!("Operation failed at {:?}: {}", self.stage, e);
                self.transition(Stage::Failed);
            }
        }

        result
    }

    fn drive(&mut self, operation: &Operation) -> Result<()> {
        match operation {
            Operation::Compose { subcommand, args } => self.run_compose(*subcommand, args),
            Operation::Convenience(kind) => {
                let commands = self.builder().build_convenience(*kind)?;
                self.transition(Stage::FilesResolved);
                self.run_sequence(&commands)?;
                self.transition(Stage::CommandExecuted);
                Ok(())
            }
            Operation::Alias { name } => self.run_alias(name),
        }
    }

    fn run_compose(&mut self, subcommand: ComposeSubcommand, args: &[String]) -> Result<()> {
        let argv = self.builder().build(subcommand, args)?;
        self.transition(Stage::FilesResolved);

        let hooks = subcommand.hook_points();

        if let Some((before, _)) = hooks {
            self.run_hooks(before)?;
            self.transition(Stage::PreHooksRun);
        }

        self.run_primary(subcommand, &argv)?;
        self.transition(Stage::CommandExecuted);

        if let Some((_, after)) = hooks {
            self.run_hooks(after)?;
            self.transition(Stage::PostHooksRun);
        }

        Ok(())
    }

    fn run_alias(&mut self, name: &str) -> Result<()> {
        let definition = self.lookup_alias(name)?.to_string();
        if self.ctx.verbose {
            println!("Executing alias '{name}': {definition}");
        }

        let with_context = |source: DoxError| DoxError::Alias {
            alias: name.to_string(),
            source: Box::new(source),
        };

        let commands = alias_expander::expand(&definition, &self.builder()).map_err(with_context)?;
        self.transition(Stage::FilesResolved);

        self.run_sequence(&commands).map_err(with_context)?;
        self.transition(Stage::CommandExecuted);
        Ok(())
    }

    fn lookup_alias(&self, name: &str) -> Result<&str> {
        if let Some(definition) = self.config.aliases.get(name) {
            return Ok(definition);
        }
        if let Some(definition) = self.global.alias(name) {
            debug!("Using global alias '{}'", name);
            return Ok(definition);
        }

        let available: BTreeSet<&String> = self
            .config
            .aliases
            .keys()
            .chain(self.global.aliases.keys())
            .collect();

        Err(DoxError::AliasNotFound {
            name: name.to_string(),
            available: available.into_iter().cloned().collect(),
        })
    }

    fn run_hooks(&self, point: HookPoint) -> Result<()> {
        hook_sequencer::run_hooks(point, &self.config, self.runner.as_ref(), &self.ctx)
    }

    fn run_primary(&self, subcommand: ComposeSubcommand, argv: &ArgumentVector) -> Result<()> {
        if self.ctx.echoes_commands() {
            println!("{}", format_command(argv));
        }
        if self.ctx.dry_run {
            return Ok(());
        }

        info!("Running {}", subcommand);
        if subcommand.is_interactive() {
            return self.runner.run_interactive(argv);
        }

        let output = self.runner.run(argv)?;
        print!("{output}");
        Ok(())
    }

    fn run_sequence(&self, commands: &CommandSequence) -> Result<()> {
        if self.ctx.echoes_commands() {
            for argv in commands {
                println!("{}", format_command(argv));
            }
        }
        if self.ctx.dry_run {
            return Ok(());
        }

        info!("Running {} command(s)", commands.len());
        let output = self.runner.run_sequence(commands)?;
        print!("{output}");
        Ok(())
    }

    fn transition(&mut self, next: Stage) {
        debug!("Stage {:?} -> {:?}", self.stage, next);
        self.stage = next;
    }
}
