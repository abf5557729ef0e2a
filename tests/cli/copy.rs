//! Tests for `vault-handler copy`.

use crate::support::*;

#[test]
fn test_copy_missing_kube_config() {
    let t = Test::with_files(DB_MANIFEST, &[]);

    let output = t.copy(&["--kube-config", "missing-kube-config"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "kube-config not found");
}

#[test]
fn test_copy_in_cluster_conflicts_with_context() {
    let t = Test::with_files(DB_MANIFEST, &[]);

    let output = t.copy(&["--in-cluster", "--context", "dev"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "in-cluster");
}

#[test]
fn test_copy_empty_namespace() {
    let t = Test::with_files(DB_MANIFEST, &[]);

    let output = t.copy(&["--namespace", ""]);
    assert_failure(&output);
    assert_stderr_contains(&output, "namespace");
}
