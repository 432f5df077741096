//! Persistence Contracts
//!
//! The widget layer talks to storage exclusively through the traits defined
//! here. [`NodePersistence`] is the basic load/save contract; child listing
//! is a separate capability expressed as a supertrait, and
//! [`PersistenceHandle`] makes the presence or absence of that capability a
//! typed case instead of a runtime probe.
//!
//! Widgets can be handed either a raw store adapter or a cache-backed one
//! interchangeably; substitution is by capability, not by concrete type.

use crate::db::StoreError;
use crate::models::{NodeData, NodeWrite};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Basic persistence contract consumed by widgets
///
/// Implementations must be `Send + Sync` so handles can be shared across
/// async tasks.
#[async_trait]
pub trait NodePersistence: Send + Sync {
    /// Load the minimal node shape for an id
    ///
    /// `Ok(None)` means the node does not exist; database failures are
    /// errors, never absence.
    async fn load_node(&self, id: &str) -> Result<Option<NodeData>, StoreError>;

    /// Persist a partial write (merge semantics are the store's concern)
    async fn save_node(&self, write: NodeWrite) -> Result<(), StoreError>;
}

/// Persistence with the child-listing capability
#[async_trait]
pub trait ChildNodePersistence: NodePersistence {
    /// List the children of one parent (the `ROOT` sentinel lists
    /// top-level nodes)
    async fn load_child_nodes(&self, parent_id: &str) -> Result<Vec<NodeData>, StoreError>;
}

/// Capability-typed handle to a persistence implementation
///
/// The two cases distinguish "basic persistence" from "persistence with
/// child listing" at compile time. Callers that need child listing match on
/// the `Option` returned by [`PersistenceHandle::load_child_nodes`] and must
/// tolerate `None` (the capability is absent, not failing).
#[derive(Clone)]
pub enum PersistenceHandle {
    Basic(Arc<dyn NodePersistence>),
    WithChildren(Arc<dyn ChildNodePersistence>),
}

impl PersistenceHandle {
    pub async fn load_node(&self, id: &str) -> Result<Option<NodeData>, StoreError> {
        match self {
            Self::Basic(p) => p.load_node(id).await,
            Self::WithChildren(p) => p.load_node(id).await,
        }
    }

    pub async fn save_node(&self, write: NodeWrite) -> Result<(), StoreError> {
        match self {
            Self::Basic(p) => p.save_node(write).await,
            Self::WithChildren(p) => p.save_node(write).await,
        }
    }

    /// List children when the capability is present
    ///
    /// `Ok(None)` means this handle cannot list children at all;
    /// `Ok(Some(vec![]))` means it can, and there are none.
    pub async fn load_child_nodes(
        &self,
        parent_id: &str,
    ) -> Result<Option<Vec<NodeData>>, StoreError> {
        match self {
            Self::Basic(_) => Ok(None),
            Self::WithChildren(p) => p.load_child_nodes(parent_id).await.map(Some),
        }
    }

    pub fn supports_child_listing(&self) -> bool {
        matches!(self, Self::WithChildren(_))
    }
}

impl fmt::Debug for PersistenceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic(_) => f.write_str("PersistenceHandle::Basic"),
            Self::WithChildren(_) => f.write_str("PersistenceHandle::WithChildren"),
        }
    }
}
