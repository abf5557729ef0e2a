//! Tests for `vault-handler download`.

use crate::support::*;

#[test]
fn test_download_unreachable_vault() {
    let t = Test::with_files(DB_MANIFEST, &[]);

    let output = t.download(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "request failed");
    assert!(!t.path().join("db.user.txt").exists());
}

#[test]
fn test_download_missing_output_dir() {
    let t = Test::with_files(DB_MANIFEST, &[]);

    let output = t.download(&["--output-dir", "missing"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "directory not found");
}
