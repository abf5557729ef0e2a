//! Core library components.
//!
//! The manifest model, payload transcoding, the vault and cluster
//! collaborators, and the reconcilers that move secrets between them.

pub mod cluster;
pub mod codec;
pub mod config;
pub mod constants;
pub mod diff;
pub mod dotenv;
pub mod file;
pub mod fs;
pub mod handler;
pub mod manifest;
pub mod path;
pub mod reconcile;
pub mod vault;
