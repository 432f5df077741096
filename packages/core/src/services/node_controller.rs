//! Node Controller - In-Memory Node Cache
//!
//! Provides the single in-memory lookup shared by all widgets rendered from
//! one fetch, avoiding redundant store round-trips and giving sibling
//! widgets a consistent "same generation" view.
//!
//! # Architecture
//!
//! The cache is a `HashMap<node id, NodeData>` behind a `tokio::sync::RwLock`,
//! in front of any [`NodePersistence`] implementation:
//!
//! - **Read-through**: `load_node` returns the cached entry when present and
//!   populates the cache on a hit from the underlying persistence. A
//!   not-found result is never cached, so a later successful save is visible
//!   on the next load.
//! - **Write-through, durable-first**: `save_node` delegates to the
//!   underlying persistence first; the cache is only merged after the
//!   durable write succeeds, so the cache never shows a value that failed to
//!   persist.
//!
//! # Cache invalidation
//!
//! Explicit only: per-key `invalidate_node` or bulk `clear_cache`. There is
//! no TTL and no eviction; the map grows for the life of the controller.

use crate::db::StoreError;
use crate::models::{NodeData, NodeWrite, ROOT_PARENT_ID};
use crate::services::persistence::NodePersistence;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Read/write-through cache in front of a persistence implementation
pub struct NodeController {
    persistence: Arc<dyn NodePersistence>,
    cache: Arc<RwLock<HashMap<String, NodeData>>>,
}

impl NodeController {
    /// Create a controller over the given persistence implementation
    pub fn new(persistence: Arc<dyn NodePersistence>) -> Self {
        Self {
            persistence,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Load node data, with caching
    ///
    /// Returns the cached entry if present; otherwise delegates to the
    /// underlying persistence and caches a non-null result before returning.
    pub async fn load_node(&self, id: &str) -> Result<Option<NodeData>, StoreError> {
        if let Some(data) = self.cache.read().await.get(id) {
            return Ok(Some(data.clone()));
        }

        let loaded = self.persistence.load_node(id).await?;
        if let Some(data) = &loaded {
            self.cache
                .write()
                .await
                .insert(id.to_string(), data.clone());
        }
        Ok(loaded)
    }

    /// Save node data and update the cache
    ///
    /// The durable write happens first; only after it succeeds is the
    /// partial merged into the cache entry. Fields absent from the partial
    /// keep their prior cached value (name falling back to the empty string
    /// and parent to the `ROOT` sentinel when nothing is known).
    pub async fn save_node(&self, write: NodeWrite) -> Result<(), StoreError> {
        self.persistence.save_node(write.clone()).await?;

        let mut cache = self.cache.write().await;
        let existing = cache.get(&write.id);
        let merged = NodeData {
            id: write.id.clone(),
            name: write
                .name
                .or_else(|| existing.map(|e| e.name.clone()))
                .unwrap_or_default(),
            parent_id: write
                .parent_id
                .or_else(|| existing.map(|e| e.parent_id.clone()))
                .unwrap_or_else(|| ROOT_PARENT_ID.to_string()),
            ancestor_name_path: write
                .ancestor_name_path
                .or_else(|| existing.and_then(|e| e.ancestor_name_path.clone())),
        };
        cache.insert(write.id, merged);

        Ok(())
    }

    /// Invalidate the cache entry for a specific node
    pub async fn invalidate_node(&self, id: &str) {
        self.cache.write().await.remove(id);
    }

    /// Clear all cached entries
    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
    }

    /// Peek at the cached entry without touching the underlying persistence
    pub async fn cached_node(&self, id: &str) -> Option<NodeData> {
        self.cache.read().await.get(id).cloned()
    }

    /// Mint a persistence adapter backed by this controller
    ///
    /// The returned adapter satisfies the same contract as a raw store
    /// adapter, so widgets can be handed either one interchangeably while
    /// every widget sharing this controller sees the same cache.
    pub fn create_node_adapter(self: Arc<Self>) -> Arc<dyn NodePersistence> {
        Arc::new(ControllerAdapter { controller: self })
    }
}

/// Persistence view of a shared controller
struct ControllerAdapter {
    controller: Arc<NodeController>,
}

#[async_trait]
impl NodePersistence for ControllerAdapter {
    async fn load_node(&self, id: &str) -> Result<Option<NodeData>, StoreError> {
        self.controller.load_node(id).await
    }

    async fn save_node(&self, write: NodeWrite) -> Result<(), StoreError> {
        self.controller.save_node(write).await
    }
}
