use std::path::{Path, PathBuf};

/// Settings for a single dox invocation
///
/// Built once from the command line and handed to every component instead of
/// living in process-wide flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    /// Project directory (compose files, dox.yaml, hook working dir)
    pub dir: PathBuf,
    /// Profile requested with `--profile`
    pub profile: Option<String>,
    /// Print commands instead of running them
    pub dry_run: bool,
    /// Echo commands before running them
    pub verbose: bool,
}

impl InvocationContext {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            profile: None,
            dry_run: false,
            verbose: false,
        }
    }

    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile.filter(|p| !p.is_empty());
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether commands should be echoed to stdout
    pub fn echoes_commands(&self) -> bool {
        self.dry_run || self.verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_executing_quietly() {
        let ctx = InvocationContext::new("/srv/app");
        assert!(!ctx.dry_run);
        assert!(!ctx.verbose);
        assert!(!ctx.echoes_commands());
        assert_eq!(ctx.dir(), Path::new("/srv/app"));
    }

    #[test]
    fn dry_run_or_verbose_echo() {
        assert!(InvocationContext::new(".").with_dry_run(true).echoes_commands());
        assert!(InvocationContext::new(".").with_verbose(true).echoes_commands());
    }

    #[test]
    fn empty_profile_is_ignored() {
        let ctx = InvocationContext::new(".").with_profile(Some(String::new()));
        assert_eq!(ctx.profile, None);

        let ctx = InvocationContext::new(".").with_profile(Some("dev".into()));
        assert_eq!(ctx.profile.as_deref(), Some("dev"));
    }
}
