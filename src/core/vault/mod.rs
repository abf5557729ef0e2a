//! Vault collaborator.
//!
//! The reconcilers only need `read(path, key)` and `write(path, fields)`.
//! Both KV flavours are handled here so callers never know which one is
//! mounted:
//!
//! - KV v1 returns the field map as-is ([`KvData::Flat`]).
//! - KV v2 nests it under `data`, next to `metadata` ([`KvData::Enveloped`]),
//!   and expects writes to be wrapped the same way.

mod http;
mod memory;

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use crate::core::constants::{ENVELOPE_KEY, KV2_PREFIX, METADATA_KEY};
use crate::error::{Result, StoreError};

pub use http::HttpVault;
pub use memory::MemoryVault;

/// Secrets vault.
pub trait Vault {
    /// Read one key at a path.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the path or key holds no data.
    fn read(&self, path: &str, key: &str) -> Result<Vec<u8>>;

    /// Write every field of `data` to a path in one call.
    fn write(&self, path: &str, data: &BTreeMap<String, String>) -> Result<()>;
}

impl<V: Vault + ?Sized> Vault for &V {
    fn read(&self, path: &str, key: &str) -> Result<Vec<u8>> {
        (**self).read(path, key)
    }

    fn write(&self, path: &str, data: &BTreeMap<String, String>) -> Result<()> {
        (**self).write(path, data)
    }
}

impl<V: Vault + ?Sized> Vault for Box<V> {
    fn read(&self, path: &str, key: &str) -> Result<Vec<u8>> {
        (**self).read(path, key)
    }

    fn write(&self, path: &str, data: &BTreeMap<String, String>) -> Result<()> {
        (**self).write(path, data)
    }
}

/// How to authenticate against Vault.
#[derive(Clone, PartialEq, Eq)]
pub enum VaultAuth {
    Token(String),
    AppRole { role_id: String, secret_id: String },
}

impl std::fmt::Debug for VaultAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VaultAuth::Token(_) => f.write_str("Token(..)"),
            VaultAuth::AppRole { role_id, .. } => f
                .debug_struct("AppRole")
                .field("role_id", role_id)
                .finish_non_exhaustive(),
        }
    }
}

/// Field map of a read response, in one of the two KV shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum KvData {
    /// KV v1: fields at the top level.
    Flat(Map<String, Value>),
    /// KV v2: fields unwrapped from the `data` envelope.
    Enveloped(Map<String, Value>),
}

impl KvData {
    /// Classify a response's `data` object.
    ///
    /// It's an envelope when it holds an object under `data` and nothing
    /// else besides an optional `metadata` sibling.
    pub fn from_response(mut data: Map<String, Value>) -> Self {
        let enveloped = matches!(data.get(ENVELOPE_KEY), Some(Value::Object(_)))
            && data
                .keys()
                .all(|k| k == ENVELOPE_KEY || k == METADATA_KEY);

        if enveloped {
            if let Some(Value::Object(fields)) = data.remove(ENVELOPE_KEY) {
                return KvData::Enveloped(fields);
            }
        }
        KvData::Flat(data)
    }

    /// The unwrapped field map.
    pub fn fields(&self) -> &Map<String, Value> {
        match self {
            KvData::Flat(fields) | KvData::Enveloped(fields) => fields,
        }
    }

    /// Whether the response used the KV v2 envelope.
    pub fn is_enveloped(&self) -> bool {
        matches!(self, KvData::Enveloped(_))
    }

    /// Extract one key as bytes.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for a missing key and
    /// `StoreError::Decode` for a non-string value.
    pub fn extract(&self, path: &str, key: &str) -> Result<Vec<u8>> {
        match self.fields().get(key) {
            None | Some(Value::Null) => Err(StoreError::NotFound {
                path: path.to_string(),
                key: key.to_string(),
            }
            .into()),
            Some(Value::String(value)) => Ok(value.clone().into_bytes()),
            Some(other) => Err(StoreError::Decode(format!(
                "key '{key}' at '{path}' is not a string: {other}"
            ))
            .into()),
        }
    }
}

/// Whether a path lives under the KV v2 mount.
pub fn is_kv2(path: &str) -> bool {
    path.trim_start_matches('/').starts_with(KV2_PREFIX)
}

/// Request body for a write, wrapped in the envelope for KV v2 paths.
pub fn write_body(path: &str, data: &BTreeMap<String, String>) -> Value {
    let fields: Map<String, Value> = data
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();

    if is_kv2(path) {
        json!({ ENVELOPE_KEY: fields })
    } else {
        Value::Object(fields)
    }
}
