use crate::domain::command::tokenize;
use crate::domain::{CommandRunner, Configuration, HookPoint, InvocationContext};
use crate::error::{DoxError, Result};
use std::io::{self, Write};
use tracing::{debug, info};

/// Runs the hooks configured for `point` in order, printing their output.
///
/// The first failing fragment aborts the rest. In dry-run mode fragments are
/// printed and the runner is never called.
pub fn run_hooks(
    point: HookPoint,
    config: &Configuration,
    runner: &dyn CommandRunner,
    ctx: &InvocationContext,
) -> Result<()> {
    let mut stdout = io::stdout().lock();
    run_hooks_to(point, config, runner, ctx, &mut stdout)
}

/// Same as [`run_hooks`], writing echoes and hook output to `out`
pub fn run_hooks_to(
    point: HookPoint,
    config: &Configuration,
    runner: &dyn CommandRunner,
    ctx: &InvocationContext,
    out: &mut dyn Write,
) -> Result<()> {
    let hooks = config.hooks_for(point.as_str());
    if hooks.is_empty() {
        debug!("No {} hooks", point);
        return Ok(());
    }

    info!("Executing {} {} hook(s)", hooks.len(), point);
    if ctx.verbose {
        writeln!(out, "Executing {point} hooks...").map_err(output_error)?;
    }

    for fragment in hooks {
        if ctx.echoes_commands() {
            writeln!(out, "  hook: {fragment}").map_err(output_error)?;
        }

        if ctx.dry_run {
            continue;
        }

        let argv = tokenize(fragment);
        if argv.is_empty() {
            continue;
        }

        let output = runner
            .run(&argv)
            .map_err(|source| DoxError::HookExecution {
                point: point.to_string(),
                fragment: fragment.clone(),
                source: Box::new(source),
            })?;
        out.write_all(output.as_bytes()).map_err(output_error)?;
    }

    Ok(())
}

fn output_error(source: io::Error) -> DoxError {
    DoxError::io("<stdout>", source)
}
