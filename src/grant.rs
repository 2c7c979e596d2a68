//! One-shot privilege grant: give the invoking user snapshot rights on
//! every pool, so the unprivileged snapshot probe can start succeeding.

use anyhow::{anyhow, bail, Context, Result};
use log::debug;
use nix::unistd::{geteuid, User};
use std::path::Path;
use std::process::Command;

use crate::consts::{GRANTED_PERMISSIONS, ZFS_COMMAND, ZPOOL_COMMAND};
use crate::privilege;

/// Grant the current user mount,snapshot rights on every visible pool.
/// All-or-nothing: the first pool that refuses the grant aborts the flow.
///
/// Must run as the unprivileged user the rights are granted to; under
/// root there is no identity left to grant anything to.
pub fn give_privileges() -> Result<()> {
    let euid = geteuid();
    if euid.is_root() {
        bail!("--give-priv must run as the unprivileged user receiving the rights, not as root");
    }

    let user = User::from_uid(euid)
        .context("look up the invoking user in passwd")?
        .ok_or_else(|| anyhow!("no passwd entry for uid {euid}"))?;

    let escalate = privilege::resolve_escalation()?;
    let pools = list_pools(&escalate)?;

    for pool in &pools {
        allow_on_pool(&escalate, &user.name, pool)?;
    }

    println!(
        "Granted {} rights to '{}' on pools: {}",
        GRANTED_PERMISSIONS,
        user.name,
        pools.join(", ")
    );
    Ok(())
}

/// Pool names from an escalated `zpool list -o name`, header filtered.
pub fn list_pools(escalate: &Path) -> Result<Vec<String>> {
    let output = Command::new(escalate)
        .args([ZPOOL_COMMAND, "list", "-o", "name"])
        .output()
        .with_context(|| format!("spawn '{ZPOOL_COMMAND}' pool listing"))?;

    if !output.status.success() {
        bail!(
            "pool enumeration failed ({}): {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(parse_pool_list(&String::from_utf8_lossy(&output.stdout)))
}

/// One pool name per line; the NAME header line and blanks are dropped.
pub fn parse_pool_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && *line != "NAME")
        .map(str::to_owned)
        .collect()
}

/// Escalated `zfs allow USER mount,snapshot POOL`; non-zero exit is fatal
/// for the whole grant flow.
pub fn allow_on_pool(escalate: &Path, user: &str, pool: &str) -> Result<()> {
    debug!("granting {GRANTED_PERMISSIONS} on '{pool}' to '{user}'");

    let status = Command::new(escalate)
        .args([ZFS_COMMAND, "allow", user, GRANTED_PERMISSIONS, pool])
        .status()
        .with_context(|| format!("spawn '{ZFS_COMMAND}' grant on pool '{pool}'"))?;

    if !status.success() {
        bail!("could not grant {GRANTED_PERMISSIONS} rights on pool '{pool}' to '{user}'");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_blank_lines_are_dropped() {
        let raw = "NAME\ntank\n\nbpool\n";
        assert_eq!(parse_pool_list(raw), vec!["tank".to_owned(), "bpool".to_owned()]);
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(parse_pool_list("  tank  \n"), vec!["tank".to_owned()]);
    }

    #[test]
    fn empty_listing_yields_no_pools() {
        assert!(parse_pool_list("NAME\n").is_empty());
        assert!(parse_pool_list("").is_empty());
    }
}
