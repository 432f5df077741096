//! Store Persistence Adapter
//!
//! Bridges the widget-facing persistence contracts with the durable
//! [`TreeNodeStore`]: pure shape translation plus delegation, no state and
//! no business logic of its own.

use crate::db::{StoreError, TreeNodeStore};
use crate::models::{NodeData, NodeWrite, ROOT_PARENT_ID};
use crate::services::persistence::{ChildNodePersistence, NodePersistence, PersistenceHandle};
use async_trait::async_trait;
use std::sync::Arc;

/// Adapter from the store's full record shape to the widget contract
pub struct StorePersistenceAdapter {
    store: Arc<TreeNodeStore>,
}

impl StorePersistenceAdapter {
    pub fn new(store: Arc<TreeNodeStore>) -> Self {
        Self { store }
    }

    /// Wrap this adapter in a child-listing-capable handle
    pub fn into_handle(self) -> PersistenceHandle {
        PersistenceHandle::WithChildren(Arc::new(self))
    }
}

#[async_trait]
impl NodePersistence for StorePersistenceAdapter {
    async fn load_node(&self, id: &str) -> Result<Option<NodeData>, StoreError> {
        let record = self.store.load_node(id).await?;
        Ok(record.map(NodeData::from))
    }

    async fn save_node(&self, write: NodeWrite) -> Result<(), StoreError> {
        self.store.save_node(write).await?;
        Ok(())
    }
}

#[async_trait]
impl ChildNodePersistence for StorePersistenceAdapter {
    async fn load_child_nodes(&self, parent_id: &str) -> Result<Vec<NodeData>, StoreError> {
        let records = if parent_id == ROOT_PARENT_ID {
            self.store.get_root_nodes().await?
        } else {
            self.store.get_child_nodes(parent_id).await?
        };

        Ok(records.into_iter().map(NodeData::from).collect())
    }
}
