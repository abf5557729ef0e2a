//! vault-handler - manifest-driven secret distribution between Vault, the
//! local filesystem and Kubernetes.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── upload        # Files or env vars into Vault
//! │   ├── download      # Vault into files (and .env)
//! │   ├── copy          # Vault into Kubernetes secrets
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # Runtime options and validation
//!     ├── manifest      # YAML manifest model and traversal
//!     ├── path          # Vault path composition
//!     ├── codec         # gzip + base64 payload codec
//!     ├── file          # Entry container on disk
//!     ├── vault/        # Vault trait, HTTP and in-memory stores
//!     ├── cluster/      # Cluster store trait, Kubernetes and in-memory stores
//!     ├── diff          # Key-level secret diff
//!     ├── reconcile/    # Upload, download and copy reconcilers
//!     ├── dotenv        # .env projector
//!     └── handler       # Runs a manifest through a command
//! ```
//!
//! # Example
//!
//! ```
//! use tracing::Span;
//! use vault_handler::core::manifest::Manifest;
//! use vault_handler::core::reconcile::Downloader;
//! use vault_handler::core::vault::{MemoryVault, Vault};
//!
//! let vault = MemoryVault::new();
//! let mut fields = std::collections::BTreeMap::new();
//! fields.insert("user".to_string(), "admin".to_string());
//! vault.write("secret/data/app", &fields).unwrap();
//!
//! let manifest = Manifest::from_yaml(
//!     "secrets:\n  db:\n    path: secret/data/app\n    data:\n      - name: user\n",
//! )
//! .unwrap();
//!
//! let mut download = Downloader::new(&vault, ".", &Span::none());
//! download.prepare(&manifest).unwrap();
//! assert_eq!(download.files()[0].payload(), b"admin");
//! ```

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::config::Config;
pub use crate::core::handler::Handler;
pub use crate::core::manifest::Manifest;
pub use crate::error::{Error, Result};
