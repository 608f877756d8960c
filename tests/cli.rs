//! Integration tests for the `v4l2-panel` CLI binary.
//!
//! These tests exercise the compiled binary via `std::process::Command`.
//! They do **not** require a video device; only argument handling, the
//! failure paths for missing devices and runs against `/dev/null` (a node
//! with no controls) are covered.

use std::process::Command;

const MISSING_DEVICE: &str = "/dev/v4l2-panel-test-no-such-device";

/// Opens fine but answers no V4L2 requests.
const NOT_A_CAPTURE_DEVICE: &str = "/dev/null";

/// Helper: run the binary with the given args.
fn run(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_v4l2-panel"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute binary")
}

// ── Help / usage ──────────────────────────────────────────────────────

#[test]
fn help_flag_shows_usage() {
    let out = run(&["--help"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Usage:"), "expected usage text");
    assert!(stdout.contains("--list"), "expected --list in help");
    assert!(stdout.contains("--config"), "expected --config in help");
    assert!(stdout.contains("EXAMPLES:"));
}

#[test]
fn version_flag_prints_version() {
    let out = run(&["--version"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

// ── Error paths (no hardware needed, just verify non-zero exit) ──────

#[test]
fn no_args_exits_nonzero() {
    let out = run(&[]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("<DEVICE>"), "expected missing-argument error");
}

#[test]
fn missing_device_exits_nonzero() {
    let out = run(&[MISSING_DEVICE]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains(MISSING_DEVICE), "error should name the device");
}

#[test]
fn list_on_missing_device_exits_nonzero() {
    let out = run(&["--list", MISSING_DEVICE]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn assignment_on_missing_device_exits_nonzero() {
    let out = run(&[MISSING_DEVICE, "Brightness", "128"]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn unknown_flag_exits_nonzero() {
    let out = run(&["--bogus-flag", MISSING_DEVICE]);
    assert!(!out.status.success());
}

// ── Nodes without controls ───────────────────────────────────────────

#[test]
fn trailing_name_is_a_warning_not_an_abort() {
    let out = run(&[NOT_A_CAPTURE_DEVICE, "Brightness", "50", "Contrast"]);
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("\"Contrast\""), "expected a warning naming the trailing argument");
    assert!(!stderr.contains("Brightness"), "complete pairs should not be reported");
}

#[test]
fn node_without_controls_warns() {
    let out = run(&["--list", NOT_A_CAPTURE_DEVICE]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("No controls found"));
}

// ── Build configuration ──────────────────────────────────────────────

#[test]
fn window_host_is_a_default_feature() {
    let manifest = std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml")).unwrap();
    let manifest: toml::Table = manifest.parse().unwrap();
    let defaults = manifest["features"]["default"].as_array().unwrap();
    assert!(defaults.iter().any(|f| f.as_str() == Some("gui")));
}
