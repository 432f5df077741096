//! Root View
//!
//! Lists every top-level asset plus the root create button. Top-level
//! assets are fetched through the child-listing capability with the `ROOT`
//! sentinel; a handle without the capability renders an empty listing.

use crate::create_button::CreateNodeButton;
use crate::tree_node::TreeNode;
use assettree_core::db::StoreError;
use assettree_core::models::ROOT_PARENT_ID;
use assettree_core::services::PersistenceHandle;

/// View over the top level of the hierarchy
#[derive(Debug)]
pub struct RootView {
    handle: PersistenceHandle,
    nodes: Vec<TreeNode>,
    create_button: CreateNodeButton,
}

impl RootView {
    pub fn new(handle: PersistenceHandle) -> Self {
        Self {
            handle,
            nodes: Vec::new(),
            create_button: CreateNodeButton::new(true),
        }
    }

    /// Rebuild the listing from storage
    ///
    /// Drops any under-construction widgets; the shell re-inserts drafts it
    /// still cares about.
    pub async fn refresh(&mut self) -> Result<(), StoreError> {
        match self.handle.load_child_nodes(ROOT_PARENT_ID).await? {
            Some(list) => {
                self.nodes = list
                    .into_iter()
                    .map(|data| {
                        TreeNode::from_data(data)
                            .as_root()
                            .with_persistence(self.handle.clone())
                    })
                    .collect();
            }
            None => self.nodes.clear(),
        }
        Ok(())
    }

    /// Insert an under-construction top-level node
    pub fn begin_construction(&mut self, node_id: impl Into<String>) {
        let node = TreeNode::new(node_id)
            .as_root()
            .as_under_construction()
            .with_persistence(self.handle.clone());
        self.nodes.push(node);
    }

    /// Remove a widget by node id (cancelled drafts)
    pub fn remove_node(&mut self, node_id: &str) -> Option<TreeNode> {
        let index = self.nodes.iter().position(|n| n.node_id() == node_id)?;
        Some(self.nodes.remove(index))
    }

    pub fn node_mut(&mut self, node_id: &str) -> Option<&mut TreeNode> {
        self.nodes.iter_mut().find(|n| n.node_id() == node_id)
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn create_button(&self) -> &CreateNodeButton {
        &self.create_button
    }
}
