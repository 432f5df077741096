//! Node record and contract shapes
//!
//! This module defines the three shapes a tree node takes as it moves
//! through the system:
//!
//! - [`NodeRecord`] - the full durable record owned by the store
//! - [`NodeWrite`] - the write-side partial accepted by `save_node`
//! - [`NodeData`] - the minimal shape the widget layer consumes
//!
//! # Parent sentinel
//!
//! Top-level nodes do not reference a parent row; their `parent_id` is the
//! [`ROOT_PARENT_ID`] sentinel. The store never validates that a non-sentinel
//! `parent_id` names an existing record, so dangling parents are possible and
//! tolerated.
//!
//! # Examples
//!
//! ```rust
//! use assettree_core::models::{NodeWrite, ROOT_PARENT_ID};
//!
//! // A top-level asset
//! let building = NodeWrite::new("a1").with_name("Building");
//!
//! // A child asset, with the denormalized display path to its parent
//! let hvac = NodeWrite::new("b1")
//!     .with_name("HVAC System")
//!     .with_parent("a1")
//!     .with_ancestor_path("Building");
//! assert!(building.parent_id.is_none()); // store defaults it to ROOT
//! assert_eq!(hvac.parent_id.as_deref(), Some("a1"));
//! # let _ = ROOT_PARENT_ID;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel `parent_id` value marking a top-level node.
pub const ROOT_PARENT_ID: &str = "ROOT";

/// Full durable record for one tree node.
///
/// # Fields
///
/// - `id`: opaque unique identifier, immutable once assigned
/// - `name`: display string; empty only transiently during authoring
/// - `parent_id`: containing node id, or [`ROOT_PARENT_ID`] for top-level nodes
/// - `ancestor_name_path`: optional denormalized human-readable path from the
///   root down to this node's parent, computed once at child-creation time
/// - `created_at`: fixed at first write
/// - `updated_at`: refreshed (strictly advanced) on every write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: String,

    pub name: String,

    pub parent_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ancestor_name_path: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl NodeRecord {
    /// Whether this node sits at the top level of the hierarchy.
    pub fn is_root(&self) -> bool {
        self.parent_id == ROOT_PARENT_ID
    }
}

/// Minimal node shape consumed by the widget layer.
///
/// Produced by the persistence adapter from a [`NodeRecord`]; widgets never
/// see timestamps or any other store-internal field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub id: String,

    pub name: String,

    pub parent_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ancestor_name_path: Option<String>,
}

impl From<NodeRecord> for NodeData {
    fn from(record: NodeRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            parent_id: record.parent_id,
            ancestor_name_path: record.ancestor_name_path,
        }
    }
}

/// Write-side partial accepted by `save_node`.
///
/// Only `id` is required. The store applies merge semantics: an absent `name`
/// defaults to the empty string, an absent `parent_id` defaults to
/// [`ROOT_PARENT_ID`], an absent `ancestor_name_path` defaults to none, and
/// only `created_at` is carried over from an existing record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeWrite {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ancestor_name_path: Option<String>,
}

impl NodeWrite {
    /// Start a write for the given node id with every other field absent.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            parent_id: None,
            ancestor_name_path: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_ancestor_path(mut self, path: impl Into<String>) -> Self {
        self.ancestor_name_path = Some(path.into());
        self
    }
}
