//! Persistence: session snapshots on disk.

pub mod file_store;
pub mod snapshot;
