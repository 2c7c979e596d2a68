use anyhow::Result;
use std::env;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use snapwrap::lookup;

#[test]
fn lookup_parses_and_fails_loudly() -> Result<()> {
    let root = unique_root("lookup");
    fs::create_dir_all(&root)?;
    prepend_path(&root);

    // 1) two paths reported as needing a snapshot, output order kept
    write_stub(
        &root,
        "httm",
        r#"printf '/tmp/a.txt:"tank/home@snap"\n/tmp/b.txt:"tank/home@snap"\n'"#,
    );
    let needed = lookup::paths_needing_snapshot(&[
        PathBuf::from("/tmp/a.txt"),
        PathBuf::from("/tmp/b.txt"),
    ])?;
    assert_eq!(
        needed,
        vec![PathBuf::from("/tmp/a.txt"), PathBuf::from("/tmp/b.txt")]
    );

    // 2) empty output: nothing needs a snapshot
    write_stub(&root, "httm", "exit 0");
    assert!(lookup::paths_needing_snapshot(&[PathBuf::from("/tmp/a.txt")])?.is_empty());

    // 3) non-zero exit from the lookup tool is fatal
    write_stub(&root, "httm", "echo 'cannot determine datasets' >&2; exit 2");
    let err = lookup::paths_needing_snapshot(&[PathBuf::from("/tmp/a.txt")]).unwrap_err();
    assert!(err.to_string().contains("snapshot lookup failed"));
    assert!(err.to_string().contains("cannot determine datasets"));

    Ok(())
}

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("snapwrap-{}-{}-{}", prefix, pid, t))
}

fn write_stub(dir: &Path, name: &str, body: &str) {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perm = fs::metadata(&path).unwrap().permissions();
    perm.set_mode(0o755);
    fs::set_permissions(&path, perm).unwrap();
}

fn prepend_path(dir: &Path) {
    let orig = env::var_os("PATH").unwrap_or_default();
    let mut paths = vec![dir.to_path_buf()];
    paths.extend(env::split_paths(&orig));
    env::set_var("PATH", env::join_paths(paths).unwrap());
}
