//! Shared constants: collaborator command names and wrapper defaults.

// -------- External collaborators --------
// One binary serves both roles: version lookup and snapshot creation.
pub const LOOKUP_TOOL: &str = "httm";
pub const ZFS_COMMAND: &str = "zfs";
pub const ZPOOL_COMMAND: &str = "zpool";

// -------- Snapshot naming --------
pub const DEFAULT_SNAP_SUFFIX: &str = "ounceSnapFileMount";

// -------- Privilege escalation --------
// Tried in order; first one on the search path wins.
pub const ESCALATION_PROGRAMS: &[&str] = &["sudo", "doas", "pkexec"];

// -------- Rights granted by --give-priv --------
pub const GRANTED_PERMISSIONS: &str = "mount,snapshot";
