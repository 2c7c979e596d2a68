//! Candidate discovery: which residual arguments name something on disk.

use std::ffi::OsString;
use std::path::PathBuf;

/// Residual arguments that exist on the filesystem at scan time, scan
/// order and duplicates preserved. Existence is a point-in-time check;
/// the gap between this scan and the snapshot is inherent.
pub fn existing_paths(args: &[OsString]) -> Vec<PathBuf> {
    args.iter()
        .map(PathBuf::from)
        .filter(|p| p.exists())
        .collect()
}
