// SPDX-License-Identifier: MIT

//! Failure-path tests against the built binary.
//!
//! Every case here must exit non-zero before `systemd-run` is ever
//! invoked. Success paths cannot be exercised this way: they replace the
//! child with the executor, and that is the point of the program.

use std::path::PathBuf;
use std::process::Command;

fn sdcage_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sdcage"))
}

#[test]
fn bogus_isolation_level_exits_nonzero_and_names_the_value() {
    let out = Command::new(sdcage_bin())
        .args(["--isolation", "bogus", "true"])
        .output()
        .expect("spawn sdcage");
    assert!(!out.status.success());
    // Rejected at the parse boundary, before any resolution or exec.
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("bogus"), "diagnostic names the value: {stderr}");
}

#[test]
fn unresolvable_program_exits_nonzero_and_names_the_program() {
    let out = Command::new(sdcage_bin())
        .arg("sdcage-no-such-program")
        .output()
        .expect("spawn sdcage");
    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("sdcage-no-such-program"),
        "diagnostic names the program: {stderr}"
    );
}

#[test]
fn missing_program_argument_is_a_usage_error() {
    let out = Command::new(sdcage_bin()).output().expect("spawn sdcage");
    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn identity_flags_after_the_program_belong_to_the_program() {
    // `--uid` is not a flag of sdcage; anything after the program name is
    // handed through as a program argument, so this still fails on
    // resolution rather than being parsed as a forged identity.
    let out = Command::new(sdcage_bin())
        .args(["sdcage-no-such-program", "--uid", "0"])
        .output()
        .expect("spawn sdcage");
    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("sdcage-no-such-program"), "{stderr}");
}

#[test]
fn deleted_working_directory_is_fatal_and_reported() {
    // The snapshot captures the working directory before anything else;
    // losing it under the process is the one environment error the binary
    // can hit at runtime. A shell removes its own cwd and then execs
    // sdcage from inside it.
    let dir = tempfile::tempdir().expect("create tempdir");
    let doomed = dir.path().join("doomed");
    std::fs::create_dir(&doomed).expect("create doomed dir");
    let out = Command::new("sh")
        .args(["-c", r#"cd "$1" && rmdir "$1" && exec "$2" true"#, "sh"])
        .arg(&doomed)
        .arg(sdcage_bin())
        .output()
        .expect("spawn shell");
    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("working directory"),
        "diagnostic names the failing step: {stderr}"
    );
}

#[test]
fn help_describes_the_isolation_presets() {
    let out = Command::new(sdcage_bin())
        .arg("--help")
        .output()
        .expect("spawn sdcage");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("--isolation"));
    assert!(stdout.contains("--tty"));
}
