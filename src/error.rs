//! Error types.
//!
//! Every failure is fatal to the manifest being processed, so each variant
//! carries enough context (group, entry, storage path) to diagnose it from a
//! single log line.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("environment variable '{var}' is unset or empty (group '{group}', entry '{name}')")]
    MissingEnvVar {
        group: String,
        name: String,
        var: String,
    },

    #[error("payload of '{group}.{name}': {source}")]
    Payload {
        group: String,
        name: String,
        #[source]
        source: CodecError,
    },
}

/// Runtime configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{field} is not informed")]
    MissingField { field: &'static str },

    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("directory not found: {}", .0.display())]
    DirNotFound(PathBuf),

    #[error("kube-config not found: {}", .0.display())]
    KubeConfigNotFound(PathBuf),

    #[error("{0} is not available in this build")]
    Unsupported(&'static str),
}

/// Manifest loading errors.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("failed to read manifest {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Manifest content and aggregation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("duplicate key '{key}' at path '{path}' (group '{group}')")]
    DuplicateKey {
        group: String,
        key: String,
        path: String,
    },

    #[error("invalid entry name '{name}' in group '{group}': {reason}")]
    InvalidEntryName {
        group: String,
        name: String,
        reason: &'static str,
    },

    #[error("payload of '{group}.{name}' is not valid UTF-8, set 'zip: true' to store binary data")]
    NonUtf8Payload { group: String, name: String },
}

/// Filesystem errors.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("can't find file '{}'", .0.display())]
    NotFound(PathBuf),

    #[error("i/o error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Payload codec errors.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("empty payload is not a compressed stream")]
    Empty,

    #[error("invalid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("compression failed: {0}")]
    Compress(#[source] std::io::Error),

    #[error("decompression failed: {0}")]
    Decompress(#[source] std::io::Error),
}

/// Vault and cluster-store collaborator errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no data found on path '{path}' for key '{key}'")]
    NotFound { path: String, key: String },

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("kubernetes: {0}")]
    Cluster(String),
}

impl Error {
    /// Whether this is a vault "path/key has no data" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Store(StoreError::NotFound { .. }))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
