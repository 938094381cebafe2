use std::fmt;
use std::str::FromStr;

/// One subprocess invocation
pub type ArgumentVector = Vec<String>;

/// Invocations executed in order, stopping at the first failure
pub type CommandSequence = Vec<ArgumentVector>;

/// Separator between chained commands in alias definitions
pub const CHAIN_OPERATOR: &str = "&&";

/// Compose subcommands that get the full `-f ... --env-file` treatment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComposeSubcommand {
    Up,
    Down,
    Ps,
    Logs,
    Restart,
    Exec,
    Build,
    Pull,
    Push,
    Start,
    Stop,
    Rm,
    Kill,
    Run,
    Pause,
    Unpause,
    Top,
    Events,
    Port,
    Config,
    Create,
    Version,
}

impl ComposeSubcommand {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Ps => "ps",
            Self::Logs => "logs",
            Self::Restart => "restart",
            Self::Exec => "exec",
            Self::Build => "build",
            Self::Pull => "pull",
            Self::Push => "push",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Rm => "rm",
            Self::Kill => "kill",
            Self::Run => "run",
            Self::Pause => "pause",
            Self::Unpause => "unpause",
            Self::Top => "top",
            Self::Events => "events",
            Self::Port => "port",
            Self::Config => "config",
            Self::Create => "create",
            Self::Version => "version",
        }
    }

    /// Positional argument this subcommand cannot run without
    pub fn required_argument(self) -> Option<&'static str> {
        match self {
            Self::Restart | Self::Exec => Some("service name"),
            _ => None,
        }
    }

    /// Hook points wrapping this subcommand, as (before, after)
    pub fn hook_points(self) -> Option<(HookPoint, HookPoint)> {
        match self {
            Self::Up => Some((HookPoint::PreUp, HookPoint::PostUp)),
            Self::Down => Some((HookPoint::PreDown, HookPoint::PostDown)),
            _ => None,
        }
    }

    /// Whether the command needs the terminal (streams or a TTY)
    pub fn is_interactive(self) -> bool {
        matches!(self, Self::Exec | Self::Logs | Self::Run)
    }
}

impl FromStr for ComposeSubcommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let subcommand = match s {
            "up" => Self::Up,
            "down" => Self::Down,
            "ps" => Self::Ps,
            "logs" => Self::Logs,
            "restart" => Self::Restart,
            "exec" => Self::Exec,
            "build" => Self::Build,
            "pull" => Self::Pull,
            "push" => Self::Push,
            "start" => Self::Start,
            "stop" => Self::Stop,
            "rm" => Self::Rm,
            "kill" => Self::Kill,
            "run" => Self::Run,
            "pause" => Self::Pause,
            "unpause" => Self::Unpause,
            "top" => Self::Top,
            "events" => Self::Events,
            "port" => Self::Port,
            "config" => Self::Config,
            "create" => Self::Create,
            "version" => Self::Version,
            other => return Err(format!("unknown compose subcommand '{other}'")),
        };
        Ok(subcommand)
    }
}

impl fmt::Display for ComposeSubcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed multi-step operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convenience {
    /// down -v --remove-orphans
    Nuke,
    /// down -v, then up --build
    Fresh,
    /// down, then up
    Dup,
}

/// Lifecycle juncture where user hooks run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPoint {
    PreUp,
    PostUp,
    PreDown,
    PostDown,
}

impl HookPoint {
    /// Key used under `hooks:` in dox.yaml
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PreUp => "pre_up",
            Self::PostUp => "post_up",
            Self::PreDown => "pre_down",
            Self::PostDown => "post_down",
        }
    }
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Splits on whitespace. Quotes are not interpreted: `echo "a b"` yields
/// `echo`, `"a`, `b"`. Existing alias and hook definitions rely on this.
pub fn tokenize(fragment: &str) -> ArgumentVector {
    fragment.split_whitespace().map(str::to_string).collect()
}

pub fn format_command(argv: &[String]) -> String {
    argv.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_subcommand_back_from_its_name() {
        let all = [
            ComposeSubcommand::Up,
            ComposeSubcommand::Down,
            ComposeSubcommand::Ps,
            ComposeSubcommand::Logs,
            ComposeSubcommand::Restart,
            ComposeSubcommand::Exec,
            ComposeSubcommand::Build,
            ComposeSubcommand::Pull,
            ComposeSubcommand::Push,
            ComposeSubcommand::Start,
            ComposeSubcommand::Stop,
            ComposeSubcommand::Rm,
            ComposeSubcommand::Kill,
            ComposeSubcommand::Run,
            ComposeSubcommand::Pause,
            ComposeSubcommand::Unpause,
            ComposeSubcommand::Top,
            ComposeSubcommand::Events,
            ComposeSubcommand::Port,
            ComposeSubcommand::Config,
            ComposeSubcommand::Create,
            ComposeSubcommand::Version,
        ];

        for sub in all {
            assert_eq!(sub.as_str().parse::<ComposeSubcommand>(), Ok(sub));
        }
    }

    #[test]
    fn rejects_unknown_names() {
        assert!("echo".parse::<ComposeSubcommand>().is_err());
        assert!("UP".parse::<ComposeSubcommand>().is_err());
    }

    #[test]
    fn only_up_and_down_have_hooks() {
        assert_eq!(
            ComposeSubcommand::Up.hook_points(),
            Some((HookPoint::PreUp, HookPoint::PostUp))
        );
        assert_eq!(
            ComposeSubcommand::Down.hook_points(),
            Some((HookPoint::PreDown, HookPoint::PostDown))
        );
        assert_eq!(ComposeSubcommand::Restart.hook_points(), None);
        assert_eq!(ComposeSubcommand::Start.hook_points(), None);
    }

    #[test]
    fn restart_and_exec_require_a_service() {
        assert!(ComposeSubcommand::Restart.required_argument().is_some());
        assert!(ComposeSubcommand::Exec.required_argument().is_some());
        assert!(ComposeSubcommand::Up.required_argument().is_none());
    }

    #[test]
    fn tokenize_does_not_honor_quotes() {
        assert_eq!(
            tokenize(r#"  echo "hello world"  "#),
            vec!["echo", "\"hello", "world\""]
        );
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn hook_point_keys() {
        assert_eq!(HookPoint::PreUp.to_string(), "pre_up");
        assert_eq!(HookPoint::PostDown.as_str(), "post_down");
    }
}
