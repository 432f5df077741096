//! Child Container
//!
//! Layout container owning the child widgets of one parent node. Children
//! are populated through the handle's child-listing capability; a handle
//! without that capability leaves the container empty rather than failing.

use crate::tree_node::TreeNode;
use assettree_core::db::StoreError;
use assettree_core::services::PersistenceHandle;

/// Container for the children of one parent node
#[derive(Debug)]
pub struct ChildContainer {
    parent_id: String,
    children: Vec<TreeNode>,
}

impl ChildContainer {
    pub fn new(parent_id: impl Into<String>) -> Self {
        Self {
            parent_id: parent_id.into(),
            children: Vec::new(),
        }
    }

    /// Rebuild the children from storage
    ///
    /// A `Basic` handle has no child listing; the container stays empty.
    pub async fn refresh(&mut self, handle: &PersistenceHandle) -> Result<(), StoreError> {
        match handle.load_child_nodes(&self.parent_id).await? {
            Some(list) => {
                self.children = list
                    .into_iter()
                    .map(|data| {
                        TreeNode::from_data(data)
                            .as_child()
                            .with_persistence(handle.clone())
                    })
                    .collect();
            }
            None => self.children.clear(),
        }
        Ok(())
    }

    /// Add a widget (used for under-construction children)
    pub fn push(&mut self, node: TreeNode) {
        self.children.push(node);
    }

    /// Remove a widget by node id
    pub fn remove(&mut self, node_id: &str) -> Option<TreeNode> {
        let index = self.children.iter().position(|n| n.node_id() == node_id)?;
        Some(self.children.remove(index))
    }

    pub fn node_mut(&mut self, node_id: &str) -> Option<&mut TreeNode> {
        self.children.iter_mut().find(|n| n.node_id() == node_id)
    }

    pub fn parent_id(&self) -> &str {
        &self.parent_id
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }
}
