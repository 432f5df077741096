//! AssetTree Core Persistence Layer
//!
//! This crate provides the data model, durable storage, and caching layer
//! for the AssetTree asset hierarchy browser.
//!
//! # Architecture
//!
//! - **Opaque ids, sentinel roots**: every node carries an opaque string id;
//!   top-level nodes reference the `ROOT` sentinel instead of a parent row
//! - **libsql**: embedded SQLite-compatible database, one file per store,
//!   versioned schema guarded by `PRAGMA user_version`
//! - **Capability-typed persistence**: widget-facing persistence is a sum
//!   type distinguishing basic load/save from child listing, so a missing
//!   capability is a compile-time case rather than a runtime probe
//!
//! # Modules
//!
//! - [`models`] - Data structures (NodeRecord, NodeData, NodeWrite)
//! - [`db`] - Database layer with libsql integration
//! - [`services`] - Persistence contracts, store adapter, and node cache

pub mod db;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use models::*;
pub use services::*;
