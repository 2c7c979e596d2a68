//! Startup check for the external tools this wrapper drives.

use anyhow::{anyhow, Result};
use which::which;

use crate::consts::{LOOKUP_TOOL, ZFS_COMMAND};

/// Both the lookup/snapshot tool and the snapshot filesystem command must
/// be on the search path before any argument handling starts.
pub fn ensure_present() -> Result<()> {
    for tool in [LOOKUP_TOOL, ZFS_COMMAND] {
        which(tool).map_err(|_| {
            anyhow!("'{tool}' command not found. Make sure the command '{tool}' is in your path.")
        })?;
    }
    Ok(())
}
