//! Asset View
//!
//! Shows one asset as a parent-mode tree node, its children in a
//! [`ChildContainer`], and the sub-asset create button.

use crate::container::ChildContainer;
use crate::create_button::CreateNodeButton;
use crate::tree_node::TreeNode;
use assettree_core::db::StoreError;
use assettree_core::services::PersistenceHandle;

/// View over one asset and its children
#[derive(Debug)]
pub struct AssetView {
    handle: PersistenceHandle,
    asset_id: String,
    node: TreeNode,
    children: ChildContainer,
    create_button: CreateNodeButton,
}

impl AssetView {
    /// Open an asset
    ///
    /// `is_new` opens the asset node in under-construction mode (the "name
    /// your new asset" flow).
    pub async fn open(
        asset_id: impl Into<String>,
        handle: PersistenceHandle,
        is_new: bool,
    ) -> Result<Self, StoreError> {
        let asset_id = asset_id.into();

        let mut node = TreeNode::new(&asset_id)
            .as_parent()
            .with_persistence(handle.clone());
        if is_new {
            node = node.as_under_construction();
        }
        node.hydrate().await;

        let mut children = ChildContainer::new(&asset_id);
        children.refresh(&handle).await?;

        Ok(Self {
            handle,
            asset_id,
            node,
            children,
            create_button: CreateNodeButton::new(false),
        })
    }

    /// Re-hydrate the asset node and rebuild its children from storage
    pub async fn refresh(&mut self) -> Result<(), StoreError> {
        self.node.hydrate().await;
        self.children.refresh(&self.handle).await
    }

    /// Insert an under-construction child of the open asset
    ///
    /// The child's ancestor name path is computed here, once, from the open
    /// asset's own path and name; it is stored redundantly so display never
    /// needs a walk.
    pub fn begin_child_construction(&mut self, node_id: impl Into<String>) {
        let ancestor_path = match self.node.ancestor_name_path() {
            Some(path) => format!("{} / {}", path, self.node.name()),
            None => self.node.name().to_string(),
        };

        let child = TreeNode::new(node_id)
            .as_child()
            .as_under_construction()
            .with_parent(&self.asset_id)
            .with_ancestor_path(ancestor_path)
            .with_persistence(self.handle.clone());
        self.children.push(child);
    }

    /// Remove a child widget by node id (cancelled drafts)
    pub fn remove_child(&mut self, node_id: &str) -> Option<TreeNode> {
        self.children.remove(node_id)
    }

    pub fn child_mut(&mut self, node_id: &str) -> Option<&mut TreeNode> {
        self.children.node_mut(node_id)
    }

    pub fn asset_id(&self) -> &str {
        &self.asset_id
    }

    pub fn node(&self) -> &TreeNode {
        &self.node
    }

    pub fn node_mut(&mut self) -> &mut TreeNode {
        &mut self.node
    }

    pub fn children(&self) -> &ChildContainer {
        &self.children
    }

    pub fn create_button(&self) -> &CreateNodeButton {
        &self.create_button
    }
}
