//! Node Data Structures
//!
//! Data types shared across the store, the persistence contracts, and the
//! widget layer.

mod node;

pub use node::{NodeData, NodeRecord, NodeWrite, ROOT_PARENT_ID};
