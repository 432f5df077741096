//! Tree Node Widget
//!
//! A headless tree node: a small state machine over the modes
//! {root, parent, child, under-construction}. The flags are not mutually
//! exclusive; under-construction overrides the others while a node is being
//! authored. State changes come back to the owner as [`NodeAction`] values.
//!
//! The widget owns no durable state, only the transient edit buffer while
//! under construction. Persistence goes through an optional
//! [`PersistenceHandle`]; a widget without one still transitions locally
//! (hosts use that for previews).

use crate::events::NodeAction;
use assettree_core::models::{NodeData, NodeWrite, ROOT_PARENT_ID};
use assettree_core::services::PersistenceHandle;

/// Placeholder shown for a node that has no name yet.
const UNNAMED_NODE_LABEL: &str = "New Asset";

/// Headless tree node widget
#[derive(Debug, Clone)]
pub struct TreeNode {
    node_id: String,
    name: String,
    parent_id: String,
    ancestor_name_path: Option<String>,
    is_root: bool,
    is_parent: bool,
    is_child: bool,
    under_construction: bool,
    persistence: Option<PersistenceHandle>,
}

impl TreeNode {
    /// Create a widget for the given node id, with no mode flags set and an
    /// empty edit buffer.
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            name: String::new(),
            parent_id: ROOT_PARENT_ID.to_string(),
            ancestor_name_path: None,
            is_root: false,
            is_parent: false,
            is_child: false,
            under_construction: false,
            persistence: None,
        }
    }

    /// Create a widget preloaded with node data (no hydrate needed).
    pub fn from_data(data: NodeData) -> Self {
        let mut node = Self::new(data.id);
        node.name = data.name;
        node.parent_id = data.parent_id;
        node.ancestor_name_path = data.ancestor_name_path;
        node
    }

    pub fn with_persistence(mut self, handle: PersistenceHandle) -> Self {
        self.persistence = Some(handle);
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = parent_id.into();
        self
    }

    pub fn with_ancestor_path(mut self, path: impl Into<String>) -> Self {
        self.ancestor_name_path = Some(path.into());
        self
    }

    pub fn as_root(mut self) -> Self {
        self.is_root = true;
        self
    }

    pub fn as_parent(mut self) -> Self {
        self.is_parent = true;
        self
    }

    pub fn as_child(mut self) -> Self {
        self.is_child = true;
        self
    }

    pub fn as_under_construction(mut self) -> Self {
        self.under_construction = true;
        self
    }

    /// Load this node's data through the persistence handle
    ///
    /// Tolerant by design: absence leaves the widget blank, and a load
    /// failure is logged and swallowed so the widget still renders.
    pub async fn hydrate(&mut self) {
        let Some(handle) = &self.persistence else {
            return;
        };

        match handle.load_node(&self.node_id).await {
            Ok(Some(data)) => {
                self.name = data.name;
                self.parent_id = data.parent_id;
                self.ancestor_name_path = data.ancestor_name_path;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(node_id = %self.node_id, "failed to load node data: {}", e);
            }
        }
    }

    /// Replace the edit buffer with the current input value
    pub fn set_name(&mut self, input: &str) {
        self.name = input.to_string();
    }

    /// Whether the save action is currently enabled
    ///
    /// Empty-name validation lives here, on the widget, not in the store.
    pub fn can_save(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Commit the edit buffer
    ///
    /// Returns `None` when the name is empty (save disabled). On durable
    /// success the widget leaves under-construction for parent mode and the
    /// owner receives [`NodeAction::Saved`]; on failure the mode is
    /// unchanged and the owner receives [`NodeAction::SaveFailed`] carrying
    /// a human-readable message.
    pub async fn save(&mut self) -> Option<NodeAction> {
        if !self.can_save() {
            return None;
        }

        if let Some(handle) = &self.persistence {
            let mut write = NodeWrite::new(&self.node_id)
                .with_name(&self.name)
                .with_parent(&self.parent_id);
            if let Some(path) = &self.ancestor_name_path {
                write = write.with_ancestor_path(path);
            }

            if let Err(e) = handle.save_node(write).await {
                return Some(NodeAction::SaveFailed {
                    node_id: self.node_id.clone(),
                    node_name: self.name.clone(),
                    error: e.to_string(),
                });
            }
        }

        self.under_construction = false;
        self.is_parent = true;
        Some(NodeAction::Saved {
            node_id: self.node_id.clone(),
            node_name: self.name.clone(),
        })
    }

    /// Abandon authoring: clears the edit buffer
    ///
    /// The owning container is expected to remove the widget.
    pub fn cancel(&mut self) -> NodeAction {
        self.name.clear();
        NodeAction::Cancelled {
            node_id: self.node_id.clone(),
            node_name: self.name.clone(),
        }
    }

    /// The up affordance, present only in parent mode
    pub fn navigate_up(&self) -> Option<NodeAction> {
        self.is_parent.then(|| NodeAction::NavigateUp {
            node_id: self.node_id.clone(),
            node_name: self.name.clone(),
        })
    }

    /// A click on the node body
    ///
    /// Navigates only from root/child mode; the parent node is already the
    /// open asset, and an under-construction node is not a link.
    pub fn click(&self) -> Option<NodeAction> {
        (!self.under_construction && !self.is_parent).then(|| NodeAction::NavigateTo {
            node_id: self.node_id.clone(),
            node_name: self.name.clone(),
        })
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name to render, with the placeholder for unnamed nodes
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            UNNAMED_NODE_LABEL
        } else {
            &self.name
        }
    }

    pub fn parent_id(&self) -> &str {
        &self.parent_id
    }

    pub fn ancestor_name_path(&self) -> Option<&str> {
        self.ancestor_name_path.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    pub fn is_parent(&self) -> bool {
        self.is_parent
    }

    pub fn is_child(&self) -> bool {
        self.is_child
    }

    pub fn is_under_construction(&self) -> bool {
        self.under_construction
    }
}
