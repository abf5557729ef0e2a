//! Tests for error handling and CLI flags.

use crate::support::*;

#[test]
fn test_help_lists_commands() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    for command in ["upload", "download", "copy", "completions"] {
        assert!(out.contains(command), "help missing '{command}': {out}");
    }
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_manifest_is_required() {
    let t = Test::new();

    let output = t.vault_cmd().arg("upload").output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "vault-handler");
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "vault-handler");
}

#[test]
fn test_missing_credentials() {
    let t = Test::with_files(DB_MANIFEST, DB_FILES);

    let output = t
        .cmd()
        .args(["upload", "--dry-run", MANIFEST_FILE])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "vault-token");
}

#[test]
fn test_token_conflicts_with_approle() {
    let t = Test::with_files(DB_MANIFEST, DB_FILES);

    let output = t
        .vault_cmd()
        .args(["--vault-role-id", "role", "upload", "--dry-run", MANIFEST_FILE])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "can't be combined");
}

#[test]
fn test_missing_manifest() {
    let t = Test::new();

    let output = t
        .vault_cmd()
        .args(["upload", "--dry-run", "nope.yaml"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to read manifest");
}

#[test]
fn test_malformed_manifest() {
    let t = Test::with_files("secrets:\n  db:\n    data: []\n", &[]);

    let output = t.upload(&["--dry-run"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse manifest");
}

#[test]
fn test_stops_at_first_failing_manifest() {
    let t = Test::with_files(DB_MANIFEST, DB_FILES);

    let output = t
        .vault_cmd()
        .args(["upload", "--dry-run", "nope.yaml", MANIFEST_FILE])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_excludes(&output, "dry-run: skipping vault write");
}

#[test]
fn test_verbose_shows_debug_logs() {
    let t = Test::with_files(DB_MANIFEST, DB_FILES);

    let output = t.upload(&["--dry-run", "--verbose"]);
    assert_success(&output);
    assert_stderr_contains(&output, "DEBUG");
}

#[test]
fn test_log_env_overrides_level() {
    let t = Test::with_files(DB_MANIFEST, DB_FILES);

    let output = t
        .vault_cmd()
        .env("VAULT_HANDLER_LOG", "off")
        .args(["upload", "--dry-run", MANIFEST_FILE])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stderr_excludes(&output, "INFO");
}
