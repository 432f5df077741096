//! Persistence Services
//!
//! This module contains the layers between the durable store and the widget
//! layer:
//!
//! - `persistence` - the widget-facing persistence contracts and the
//!   capability sum type
//! - `store_adapter` - shape adaptation from store records to the widget
//!   contract
//! - `node_controller` - the in-memory read/write-through node cache

pub mod node_controller;
pub mod persistence;
pub mod store_adapter;

pub use node_controller::NodeController;
pub use persistence::{ChildNodePersistence, NodePersistence, PersistenceHandle};
pub use store_adapter::StorePersistenceAdapter;
