//! Navigation Shell
//!
//! Owns the current view and consumes the action values widgets return.
//! This is the explicit message-passing replacement for the original
//! bubbling-notification coordination: a widget transition produces a
//! [`NodeAction`], the host feeds it to [`AppShell::handle_action`], and the
//! shell resolves what it means for navigation and view state.

use crate::events::{CreateNodeRequest, NodeAction};
use crate::views::{AssetView, RootView};
use assettree_core::db::StoreError;
use assettree_core::models::ROOT_PARENT_ID;
use assettree_core::services::PersistenceHandle;
use uuid::Uuid;

/// The view currently on screen
#[derive(Debug)]
pub enum CurrentView {
    Root(RootView),
    Asset(AssetView),
}

/// Two-view navigation shell
#[derive(Debug)]
pub struct AppShell {
    handle: PersistenceHandle,
    view: CurrentView,
}

impl AppShell {
    /// Start on the root view
    pub async fn new(handle: PersistenceHandle) -> Result<Self, StoreError> {
        let mut root = RootView::new(handle.clone());
        root.refresh().await?;
        Ok(Self {
            handle,
            view: CurrentView::Root(root),
        })
    }

    /// Consume one widget action
    ///
    /// Navigation actions switch views; `Saved` re-reads the current view
    /// from storage; `Cancelled` drops the abandoned draft widget;
    /// `SaveFailed` is logged and changes nothing; the failed user action
    /// must be re-initiated.
    pub async fn handle_action(&mut self, action: NodeAction) -> Result<(), StoreError> {
        match action {
            NodeAction::NavigateTo { node_id, .. } => self.open_asset(node_id, false).await,
            NodeAction::NavigateUp { node_id, .. } => {
                match self.handle.load_node(&node_id).await? {
                    Some(data) if data.parent_id != ROOT_PARENT_ID => {
                        self.open_asset(data.parent_id, false).await
                    }
                    // Top-level assets (and dangling ids) go back to the root view
                    _ => self.show_root().await,
                }
            }
            NodeAction::Saved { .. } => self.refresh().await,
            NodeAction::Cancelled { node_id, .. } => {
                match &mut self.view {
                    CurrentView::Root(view) => {
                        view.remove_node(&node_id);
                    }
                    CurrentView::Asset(view) => {
                        view.remove_child(&node_id);
                    }
                }
                Ok(())
            }
            NodeAction::SaveFailed {
                node_id, error, ..
            } => {
                tracing::warn!(node_id = %node_id, "node save failed: {}", error);
                Ok(())
            }
        }
    }

    /// Consume a create request, minting the new node's id
    ///
    /// The draft lands in the current view: a root request inserts a
    /// top-level draft (switching back to the root view if an asset is
    /// open); a sub-asset request inserts a child of the open asset.
    /// Returns the minted id so the host can address the draft widget.
    pub async fn handle_create(
        &mut self,
        request: CreateNodeRequest,
    ) -> Result<String, StoreError> {
        let node_id = Uuid::new_v4().to_string();

        if request.is_root {
            if !matches!(self.view, CurrentView::Root(_)) {
                self.show_root().await?;
            }
            if let CurrentView::Root(view) = &mut self.view {
                view.begin_construction(&node_id);
            }
        } else {
            match &mut self.view {
                CurrentView::Asset(view) => view.begin_child_construction(&node_id),
                // A sub-asset request only makes sense with an open asset;
                // from the root view it degrades to a top-level draft
                CurrentView::Root(view) => view.begin_construction(&node_id),
            }
        }

        Ok(node_id)
    }

    /// Switch to the asset view for the given id
    pub async fn open_asset(
        &mut self,
        asset_id: impl Into<String>,
        is_new: bool,
    ) -> Result<(), StoreError> {
        let view = AssetView::open(asset_id, self.handle.clone(), is_new).await?;
        self.view = CurrentView::Asset(view);
        Ok(())
    }

    /// Switch to the root view
    pub async fn show_root(&mut self) -> Result<(), StoreError> {
        let mut root = RootView::new(self.handle.clone());
        root.refresh().await?;
        self.view = CurrentView::Root(root);
        Ok(())
    }

    /// Re-read the current view from storage
    pub async fn refresh(&mut self) -> Result<(), StoreError> {
        match &mut self.view {
            CurrentView::Root(view) => view.refresh().await,
            CurrentView::Asset(view) => view.refresh().await,
        }
    }

    pub fn view(&self) -> &CurrentView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut CurrentView {
        &mut self.view
    }

    /// Id of the open asset, if an asset view is showing
    pub fn current_asset_id(&self) -> Option<&str> {
        match &self.view {
            CurrentView::Root(_) => None,
            CurrentView::Asset(view) => Some(view.asset_id()),
        }
    }
}
