//! Test fixtures and constants.

/// File name the test manifest is written to.
pub const MANIFEST_FILE: &str = "manifest.yaml";

/// A Vault address nothing listens on.
pub const UNREACHABLE_VAULT: &str = "http://127.0.0.1:1";

/// Two entries sharing one KV v2 path, one of them zipped.
pub const DB_MANIFEST: &str = r#"
secrets:
  db:
    path: secret/data/app
    type: Opaque
    data:
      - name: password
        extension: txt
        zip: true
      - name: user
        extension: txt
"#;

/// Input files for [`DB_MANIFEST`].
pub const DB_FILES: &[(&str, &[u8])] = &[
    ("db.password.txt", b"s3cr3t-p@ss\n"),
    ("db.user.txt", b"admin"),
];

/// An entry sourced from an environment variable.
pub const ENV_MANIFEST: &str = r#"
secrets:
  api:
    path: kv/api
    data:
      - name: token
        fromEnv: VAULT_HANDLER_TEST_API_TOKEN
"#;

/// Two groups writing the same key to the same path.
pub const DUPLICATE_MANIFEST: &str = r#"
secrets:
  a:
    path: kv/shared
    data:
      - name: token
  b:
    path: kv/shared
    data:
      - name: token
"#;
