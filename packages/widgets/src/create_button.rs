//! Create Node Button
//!
//! Emits a [`CreateNodeRequest`] when pressed; the owning view decides where
//! the new node goes.

use crate::events::CreateNodeRequest;

/// "Create new node" button
#[derive(Debug, Clone, Copy)]
pub struct CreateNodeButton {
    is_root: bool,
}

impl CreateNodeButton {
    pub fn new(is_root: bool) -> Self {
        Self { is_root }
    }

    /// Caption to render
    pub fn label(&self) -> &'static str {
        if self.is_root {
            "Create New Asset"
        } else {
            "Create New Sub-Asset Here"
        }
    }

    pub fn press(&self) -> CreateNodeRequest {
        CreateNodeRequest {
            is_root: self.is_root,
        }
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }
}
