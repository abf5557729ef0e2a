//! Reconcilers.
//!
//! Each reconciler runs in two phases:
//!
//! 1. `prepare` reads, transcodes, validates and diffs, collecting what has
//!    to be written. It never mutates a store.
//! 2. `execute(dry_run)` persists the collected writes, or only logs them
//!    when `dry_run` is set.
//!
//! The first error aborts the run; nothing is rolled back.

mod copy;
mod download;
mod upload;

pub use copy::{Copier, PendingSecret};
pub use download::Downloader;
pub use upload::{Aggregate, Uploader};
