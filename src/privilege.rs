//! Escalation program discovery.

use anyhow::{anyhow, Result};
use std::path::PathBuf;
use which::which;

use crate::consts::ESCALATION_PROGRAMS;

/// First escalation program on the search path, in preference order.
/// Resolved fresh every run; within a run callers resolve at most once,
/// lazily, and thread the result through as a value.
pub fn resolve_escalation() -> Result<PathBuf> {
    ESCALATION_PROGRAMS
        .iter()
        .find_map(|candidate| which(candidate).ok())
        .ok_or_else(|| {
            anyhow!(
                "no privilege escalation program found (tried {})",
                ESCALATION_PROGRAMS.join(", ")
            )
        })
}
