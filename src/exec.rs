//! Hand-off to the target program.

use anyhow::{Context, Result};
use log::debug;
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

/// Run the resolved target with the residual arguments exactly as given
/// and return its exit code.
///
/// The target is spawned and waited on rather than exec-replaced; the
/// observable contract is exit-status forwarding. A target killed by a
/// signal maps to 128+signo, the shell convention, since a supervising
/// parent cannot die of the child's signal transparently.
pub fn run_target(program: &Path, args: &[OsString]) -> Result<i32> {
    debug!(
        "executing '{}' with {} argument(s)",
        program.display(),
        args.len()
    );

    let status = Command::new(program)
        .args(args)
        .status()
        .with_context(|| format!("spawn target program '{}'", program.display()))?;

    if let Some(code) = status.code() {
        return Ok(code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return Ok(128 + signal);
        }
    }

    Ok(1)
}
