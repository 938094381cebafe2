use crate::domain::command::tokenize;
use crate::domain::{CHAIN_OPERATOR, CommandSequence, ComposeSubcommand};
use crate::error::{DoxError, Result};
use crate::services::CommandBuilder;
use tracing::debug;

/// Expands an alias definition like `down -v && up --build -d`.
///
/// Parts starting with a compose subcommand become full compose invocations;
/// anything else (`echo done`, `./seed.sh`) runs verbatim. Tokens are split on
/// whitespace only.
pub fn expand(definition: &str, builder: &CommandBuilder<'_>) -> Result<CommandSequence> {
    if definition.trim().is_empty() {
        return Err(DoxError::EmptyAliasDefinition);
    }

    let mut commands = CommandSequence::new();

    for part in definition.split(CHAIN_OPERATOR) {
        let tokens = tokenize(part);
        let Some((head, rest)) = tokens.split_first() else {
            continue;
        };

        let argv = match head.parse::<ComposeSubcommand>() {
            Ok(subcommand) => builder.build(subcommand, rest)?,
            Err(_) => {
                debug!("Passing '{}' through verbatim", head);
                tokens
            }
        };
        commands.push(argv);
    }

    if commands.is_empty() {
        return Err(DoxError::EmptyAliasDefinition);
    }

    Ok(commands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Configuration, Discovery, InvocationContext};
    use std::path::PathBuf;

    fn strings(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    fn with_builder<T>(f: impl FnOnce(&CommandBuilder<'_>) -> T) -> T {
        let ctx = InvocationContext::new("/code/app");
        let config = Configuration::default();
        let discovery = Discovery::new(Some(PathBuf::from("compose.yaml")), Default::default());
        let builder = CommandBuilder::new(&ctx, &config, &discovery);
        f(&builder)
    }

    #[test]
    fn empty_definition_fails() {
        with_builder(|b| {
            assert!(matches!(expand("", b), Err(DoxError::EmptyAliasDefinition)));
            assert!(matches!(expand("   ", b), Err(DoxError::EmptyAliasDefinition)));
            assert!(matches!(expand("&& &&", b), Err(DoxError::EmptyAliasDefinition)));
        });
    }

    #[test]
    fn chain_yields_one_vector_per_part() {
        let commands = with_builder(|b| expand("down -v && up --build -d", b)).unwrap();

        assert_eq!(commands.len(), 2);
        assert_eq!(
            commands[0],
            strings(&["docker", "compose", "-f", "compose.yaml", "down", "-v"])
        );
        assert_eq!(
            commands[1],
            strings(&["docker", "compose", "-f", "compose.yaml", "up", "--build", "-d"])
        );
    }

    #[test]
    fn unknown_commands_pass_through() {
        let commands =
            with_builder(|b| expand("up -d && echo services ready && ./seed.sh", b)).unwrap();

        assert_eq!(commands.len(), 3);
        assert_eq!(commands[1], strings(&["echo", "services", "ready"]));
        assert_eq!(commands[2], strings(&["./seed.sh"]));
    }

    #[test]
    fn quotes_are_not_special() {
        let commands = with_builder(|b| expand(r#"echo "hello world""#, b)).unwrap();
        assert_eq!(commands[0], strings(&["echo", "\"hello", "world\""]));
    }

    #[test]
    fn empty_parts_are_skipped() {
        let commands = with_builder(|b| expand("ps &&  && logs", b)).unwrap();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].last().map(String::as_str), Some("ps"));
        assert_eq!(commands[1].last().map(String::as_str), Some("logs"));
    }

    #[test]
    fn builder_errors_propagate() {
        let err = with_builder(|b| expand("ps && exec", b)).unwrap_err();
        assert!(matches!(err, DoxError::MissingRequiredArgument { .. }));
    }

    #[test]
    fn every_known_subcommand_gets_compose_files() {
        let commands = with_builder(|b| expand("pull && stop api && config", b)).unwrap();
        for argv in &commands {
            assert_eq!(&argv[..4], &strings(&["docker", "compose", "-f", "compose.yaml"])[..]);
        }
    }
}
