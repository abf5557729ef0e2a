//! Tests for `vault-handler upload`.

use crate::support::*;

#[test]
fn test_upload_dry_run_needs_no_vault() {
    let t = Test::with_files(DB_MANIFEST, DB_FILES);

    let output = t.upload(&["--dry-run"]);
    assert_success(&output);
    assert_stdout_contains(&output, "dry-run");
    assert_stderr_contains(&output, "dry-run: skipping vault write");
}

#[test]
fn test_upload_dry_run_from_env_binding() {
    let t = Test::with_files(DB_MANIFEST, DB_FILES);

    let output = t
        .vault_cmd()
        .env("VAULT_HANDLER_DRY_RUN", "true")
        .args(["upload", MANIFEST_FILE])
        .output()
        .unwrap();
    assert_success(&output);
}

#[test]
fn test_upload_missing_file() {
    let t = Test::with_files(DB_MANIFEST, &[("db.user.txt", b"admin")]);

    let output = t.upload(&["--dry-run"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "db.password.txt");
}

#[test]
fn test_upload_missing_env_var() {
    let t = Test::with_files(ENV_MANIFEST, &[]);

    let output = t
        .vault_cmd()
        .env_remove("VAULT_HANDLER_TEST_API_TOKEN")
        .args(["upload", "--dry-run", MANIFEST_FILE])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "VAULT_HANDLER_TEST_API_TOKEN");
}

#[test]
fn test_upload_from_env_var() {
    let t = Test::with_files(ENV_MANIFEST, &[]);

    let output = t
        .vault_cmd()
        .env("VAULT_HANDLER_TEST_API_TOKEN", "abc")
        .args(["upload", "--dry-run", MANIFEST_FILE])
        .output()
        .unwrap();
    assert_success(&output);
}

#[test]
fn test_upload_duplicate_key() {
    let t = Test::with_files(DUPLICATE_MANIFEST, &[("a.token.", b"1"), ("b.token.", b"2")]);

    let output = t.upload(&["--dry-run"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "duplicate key 'token'");
}

#[test]
fn test_upload_input_dir() {
    let t = Test::with_files(DB_MANIFEST, &[]);
    std::fs::create_dir(t.path().join("in")).unwrap();
    for (name, content) in DB_FILES {
        std::fs::write(t.path().join("in").join(name), content).unwrap();
    }

    let output = t.upload(&["--dry-run", "--input-dir", "in"]);
    assert_success(&output);
}

#[test]
fn test_upload_unreachable_vault() {
    let t = Test::with_files(DB_MANIFEST, DB_FILES);

    let output = t.upload(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "request failed");
}
