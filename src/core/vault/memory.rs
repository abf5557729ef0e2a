//! In-memory vault.
//!
//! Stores request bodies the way the server would return them, so KV v2
//! paths come back enveloped and KV v1 paths come back flat.

use std::cell::RefCell;
use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use super::{write_body, KvData, Vault};
use crate::error::{Result, StoreError};

/// A recorded `write` call.
pub type WriteCall = (String, BTreeMap<String, String>);

/// Vault kept in process memory, recording every write.
#[derive(Debug, Default)]
pub struct MemoryVault {
    paths: RefCell<BTreeMap<String, Map<String, Value>>>,
    writes: RefCell<Vec<WriteCall>>,
}

impl MemoryVault {
    /// Create an empty vault.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a path with a raw response `data` object.
    pub fn insert_raw(&self, path: &str, data: Map<String, Value>) {
        self.paths.borrow_mut().insert(path.to_string(), data);
    }

    /// Every `write` call so far, in order.
    pub fn writes(&self) -> Vec<WriteCall> {
        self.writes.borrow().clone()
    }

    /// Number of `write` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.borrow().len()
    }
}

impl Vault for MemoryVault {
    fn read(&self, path: &str, key: &str) -> Result<Vec<u8>> {
        let paths = self.paths.borrow();
        match paths.get(path) {
            Some(data) if !data.is_empty() => KvData::from_response(data.clone()).extract(path, key),
            _ => Err(StoreError::NotFound {
                path: path.to_string(),
                key: key.to_string(),
            }
            .into()),
        }
    }

    fn write(&self, path: &str, data: &BTreeMap<String, String>) -> Result<()> {
        debug!(path = %path, keys = data.len(), "memory vault write");
        self.writes
            .borrow_mut()
            .push((path.to_string(), data.clone()));

        if let Value::Object(body) = write_body(path, data) {
            self.paths.borrow_mut().insert(path.to_string(), body);
        }
        Ok(())
    }
}
