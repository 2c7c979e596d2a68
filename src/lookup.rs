//! Snapshot query client: asks the lookup tool which candidate paths still
//! lack a current snapshot.

use anyhow::{bail, Context, Result};
use log::debug;
use std::path::PathBuf;
use std::process::Command;

use crate::consts::LOOKUP_TOOL;

/// Paths from `candidates` whose live content has no qualifying prior
/// snapshot, in the lookup tool's output order. Computed fresh per call,
/// never cached.
pub fn paths_needing_snapshot(candidates: &[PathBuf]) -> Result<Vec<PathBuf>> {
    debug!(
        "querying '{}' for {} candidate path(s)",
        LOOKUP_TOOL,
        candidates.len()
    );

    let output = Command::new(LOOKUP_TOOL)
        .arg("--last-snap=no-ditto")
        .arg("--not-so-pretty")
        .args(candidates)
        .output()
        .with_context(|| format!("spawn '{LOOKUP_TOOL}' snapshot lookup"))?;

    if !output.status.success() {
        bail!(
            "snapshot lookup failed ({}): {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(parse_needed(&String::from_utf8_lossy(&output.stdout)))
}

/// One line per path needing a snapshot, colon-delimited, path in the
/// first field. A path that itself contains ':' or a newline cannot be
/// represented in this format; lines with an empty first field are
/// skipped.
pub fn parse_needed(raw: &str) -> Vec<PathBuf> {
    raw.lines()
        .filter_map(|line| line.split(':').next())
        .filter(|field| !field.is_empty())
        .map(PathBuf::from)
        .collect()
}
