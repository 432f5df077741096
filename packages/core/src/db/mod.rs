//! Database Layer
//!
//! This module handles all durable storage for tree nodes using an embedded
//! libsql database:
//!
//! - Connection management and versioned, idempotent schema setup
//! - Transactional merge-semantics upsert
//! - Index lookups by parent (roots and children) and full scans
//!
//! The database is owned by whoever constructs the [`DatabaseService`] and is
//! injected into [`TreeNodeStore`]; there is no process-wide singleton.

mod database;
mod error;
mod node_store;

pub use database::{DatabaseService, SCHEMA_GENERATION};
pub use error::StoreError;
pub use node_store::TreeNodeStore;
