//! Snapshot executor: unprivileged probe first, escalated retry second,
//! fatal after that.

use anyhow::{bail, Context, Result};
use log::debug;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::consts::LOOKUP_TOOL;
use crate::privilege;

/// Create a snapshot covering every path in `needed`, or fail.
///
/// The first attempt runs unprivileged with all diagnostics discarded: a
/// user without a prior grant is expected to fail here, so only the exit
/// code is observed. The escalated attempt is the authoritative one and
/// its output is surfaced.
pub fn ensure_snapshots(needed: &[PathBuf], suffix: &str, utc: bool) -> Result<()> {
    debug!(
        "requesting snapshot of {} path(s) with suffix '{}'",
        needed.len(),
        suffix
    );

    let probe = snap_command(None, needed, suffix, utc)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .with_context(|| format!("spawn '{LOOKUP_TOOL}' snapshot request"))?;
    if probe.success() {
        return Ok(());
    }

    let escalate = privilege::resolve_escalation()?;
    debug!(
        "unprivileged snapshot refused, retrying via '{}'",
        escalate.display()
    );

    let escalated = snap_command(Some(&escalate), needed, suffix, utc)
        .status()
        .with_context(|| {
            format!("spawn '{}' escalated snapshot request", escalate.display())
        })?;
    if !escalated.success() {
        bail!(
            "could not snapshot the paths given: verify you hold the snapshot privilege \
             on the datasets involved, or grant it with 'snapwrap --give-priv'"
        );
    }

    Ok(())
}

fn snap_command(escalate: Option<&Path>, needed: &[PathBuf], suffix: &str, utc: bool) -> Command {
    let mut cmd = match escalate {
        Some(program) => {
            let mut cmd = Command::new(program);
            cmd.arg(LOOKUP_TOOL);
            cmd
        }
        None => Command::new(LOOKUP_TOOL),
    };
    if utc {
        cmd.arg("--utc");
    }
    cmd.arg(format!("--snap={suffix}"));
    cmd.args(needed);
    cmd
}
