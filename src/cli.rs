//! Argument classification and dispatch.
//!
//! The wrapper's own surface is thin: a few leading flags, two one-shot
//! modes, and everything after the target name is opaque. The residual
//! argument list is never rewritten; the target program receives exactly
//! what the user typed after its name.

use anyhow::{anyhow, bail, Context, Result};
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::path::Path;

use crate::classify;
use crate::consts::DEFAULT_SNAP_SUFFIX;
use crate::deps;
use crate::exec;
use crate::grant;
use crate::lookup;
use crate::snapshot;

// clap's automatic help is disabled: usage is a refusal to execute, so it
// goes to stderr with a non-zero exit, and the flag is routed by hand.
#[derive(Parser, Debug)]
#[command(
    name = "snapwrap",
    version,
    about = "Runs a program, snapshotting its file arguments first",
    disable_help_flag = true,
    override_usage = "snapwrap [--suffix NAME] [--utc] TARGET [ARGS...]\n       snapwrap --give-priv\n       snapwrap -h | --help"
)]
pub struct Cli {
    /// Print usage to stderr and exit non-zero
    #[arg(short = 'h', long = "help")]
    pub help: bool,

    /// Grant the invoking user mount,snapshot rights on every pool, then exit
    #[arg(long = "give-priv", exclusive = true)]
    pub give_priv: bool,

    /// Suffix for the snapshot name
    #[arg(long, value_name = "NAME", default_value = DEFAULT_SNAP_SUFFIX)]
    pub suffix: String,

    /// Timestamp the snapshot name in UTC instead of local time
    #[arg(long)]
    pub utc: bool,

    /// Target program and its arguments, forwarded untouched
    #[arg(
        value_name = "TARGET [ARGS...]",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub target: Vec<OsString>,
}

pub fn run() -> Result<i32> {
    let argv: Vec<OsString> = std::env::args_os().collect();
    run_from(&argv)
}

/// Dispatch a raw argument vector (argv[0] included). Split out from
/// [`run`] so tests can drive the whole pipeline in-process.
pub fn run_from(argv: &[OsString]) -> Result<i32> {
    deps::ensure_present()?;

    // A first argument naming this wrapper itself would recurse forever.
    if names_self(argv) {
        bail!("refusing to wrap itself: remove the extra '{}'", own_name(argv));
    }

    let cli = match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(err) => {
            // clap picks the stream: version goes to stdout and exits 0,
            // malformed flags go to stderr and exit 1.
            let code = if err.use_stderr() { 1 } else { 0 };
            err.print().context("write argument diagnostics")?;
            return Ok(code);
        }
    };

    if cli.help {
        let mut cmd = Cli::command();
        eprint!("{}", cmd.render_help());
        return Ok(1);
    }

    if cli.give_priv {
        grant::give_privileges()?;
        return Ok(0);
    }

    if cli.suffix.is_empty() {
        bail!("--suffix requires a non-empty snapshot name");
    }

    let (target, residual) = cli
        .target
        .split_first()
        .ok_or_else(|| anyhow!("no target program given; see 'snapwrap --help'"))?;

    let program = which::which(target).map_err(|_| {
        anyhow!(
            "'{}' is not an executable on the search path",
            Path::new(target).display()
        )
    })?;

    let candidates = classify::existing_paths(residual);
    if !candidates.is_empty() {
        let needed = lookup::paths_needing_snapshot(&candidates)?;
        if !needed.is_empty() {
            snapshot::ensure_snapshots(&needed, &cli.suffix, cli.utc)?;
        }
    }

    exec::run_target(&program, residual)
}

/// True when the first real argument is this wrapper's own invocation name
/// (compared by basename, so `/usr/local/bin/snapwrap snapwrap ...` is
/// caught too).
fn names_self(argv: &[OsString]) -> bool {
    let own = argv.first().and_then(|p| Path::new(p).file_name());
    let first = argv.get(1).and_then(|p| Path::new(p).file_name());
    match (own, first) {
        (Some(own), Some(first)) => own == first,
        _ => false,
    }
}

fn own_name(argv: &[OsString]) -> String {
    argv.first()
        .and_then(|p| Path::new(p).file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "snapwrap".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("args must parse")
    }

    #[test]
    fn suffix_default_applies() {
        let cli = parse(&["snapwrap", "prog"]);
        assert_eq!(cli.suffix, DEFAULT_SNAP_SUFFIX);
        assert!(!cli.utc);
        assert_eq!(cli.target, vec![OsString::from("prog")]);
    }

    #[test]
    fn leading_flags_stop_at_target() {
        let cli = parse(&["snapwrap", "--suffix", "nightly", "--utc", "prog", "--utc", "-x", "a b"]);
        assert_eq!(cli.suffix, "nightly");
        assert!(cli.utc);
        // Everything after the target name is captured verbatim, flags
        // included.
        let expect: Vec<OsString> = ["prog", "--utc", "-x", "a b"]
            .iter()
            .map(OsString::from)
            .collect();
        assert_eq!(cli.target, expect);
    }

    #[test]
    fn suffix_without_value_is_rejected() {
        assert!(Cli::try_parse_from(["snapwrap", "--suffix"]).is_err());
    }

    #[test]
    fn give_priv_combines_with_nothing() {
        assert!(Cli::try_parse_from(["snapwrap", "--give-priv", "prog"]).is_err());
        assert!(Cli::try_parse_from(["snapwrap", "--utc", "--give-priv"]).is_err());
        assert!(parse(&["snapwrap", "--give-priv"]).give_priv);
    }

    #[test]
    fn self_invocation_is_detected_by_basename() {
        let argv: Vec<OsString> = ["/usr/local/bin/snapwrap", "snapwrap", "vi"]
            .iter()
            .map(OsString::from)
            .collect();
        assert!(names_self(&argv));

        let argv: Vec<OsString> = ["snapwrap", "vi", "snapwrap.conf"]
            .iter()
            .map(OsString::from)
            .collect();
        assert!(!names_self(&argv));
    }
}
