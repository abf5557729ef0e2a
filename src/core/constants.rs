//! Constants used throughout vault-handler.
//!
//! Centralizes magic strings and configuration values.

/// Dot-env file name, written under the output directory.
pub const ENV_FILE: &str = ".env";

/// Permission mode for every file written by vault-handler.
pub const FILE_MODE: u32 = 0o600;

/// Default Vault address.
pub const DEFAULT_VAULT_ADDR: &str = "http://127.0.0.1:8200";

/// Default Kubernetes namespace.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Path prefix of the KV v2 mount; writes below it are wrapped in a `data` envelope.
pub const KV2_PREFIX: &str = "secret/data";

/// Envelope key used by KV v2 payloads.
pub const ENVELOPE_KEY: &str = "data";

/// Sibling of the envelope key in KV v2 read responses.
pub const METADATA_KEY: &str = "metadata";

/// AppRole login endpoint.
pub const APPROLE_LOGIN_PATH: &str = "auth/approle/login";

/// Environment variable controlling the log filter.
pub const LOG_ENV: &str = "VAULT_HANDLER_LOG";
