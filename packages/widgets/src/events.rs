//! Widget Actions
//!
//! Every widget transition is expressed as an outward action value carried
//! back to the owning view shell. The serialized shape is the host-facing
//! notification contract: an internally tagged `action` discriminator in
//! kebab-case, camelCase fields, and an `error` message only on the failure
//! action.

use serde::{Deserialize, Serialize};

/// Action emitted by a tree node widget
///
/// Widgets hold no knowledge of navigation targets; resolving what a
/// navigation action means is the owning shell's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum NodeAction {
    /// Under-construction node was durably saved
    Saved { node_id: String, node_name: String },

    /// Authoring was abandoned; the widget should be removed
    Cancelled { node_id: String, node_name: String },

    /// Leave this asset for its parent
    NavigateUp { node_id: String, node_name: String },

    /// Open this node as the current asset
    NavigateTo { node_id: String, node_name: String },

    /// Durable save failed; the user must re-initiate
    SaveFailed {
        node_id: String,
        node_name: String,
        error: String,
    },
}

impl NodeAction {
    /// Id of the node this action concerns
    pub fn node_id(&self) -> &str {
        match self {
            Self::Saved { node_id, .. }
            | Self::Cancelled { node_id, .. }
            | Self::NavigateUp { node_id, .. }
            | Self::NavigateTo { node_id, .. }
            | Self::SaveFailed { node_id, .. } => node_id,
        }
    }

    /// The wire name of this action
    pub fn action_name(&self) -> &'static str {
        match self {
            Self::Saved { .. } => "saved",
            Self::Cancelled { .. } => "cancelled",
            Self::NavigateUp { .. } => "navigate-up",
            Self::NavigateTo { .. } => "navigate-to",
            Self::SaveFailed { .. } => "save-failed",
        }
    }
}

/// Request to author a new node, emitted by the create button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNodeRequest {
    /// Whether the new node is a top-level asset
    pub is_root: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Contract test: documents and enforces the exact JSON format for
    /// NodeAction. Hosts embedding the widget layer rely on this shape.
    ///
    /// Serde's `#[serde(tag = "action")]` produces an INTERNALLY-TAGGED
    /// format where the discriminator is merged with the fields (NOT nested).
    #[test]
    fn test_node_action_serialization_contract() {
        let action = NodeAction::NavigateUp {
            node_id: "a1".to_string(),
            node_name: "Building".to_string(),
        };

        let parsed: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&action).unwrap()).unwrap();

        assert_eq!(parsed.get("action").unwrap(), "navigate-up");
        assert_eq!(parsed.get("nodeId").unwrap(), "a1");
        assert_eq!(parsed.get("nodeName").unwrap(), "Building");
        assert!(
            parsed.get("error").is_none(),
            "error is only carried on save-failed"
        );
    }

    #[test]
    fn test_save_failed_carries_the_error_message() {
        let action = NodeAction::SaveFailed {
            node_id: "a1".to_string(),
            node_name: "Building".to_string(),
            error: "Transaction failed: simulated".to_string(),
        };

        let parsed: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&action).unwrap()).unwrap();

        assert_eq!(parsed.get("action").unwrap(), "save-failed");
        assert_eq!(parsed.get("error").unwrap(), "Transaction failed: simulated");
    }

    #[test]
    fn test_node_action_round_trip() {
        let original = NodeAction::Saved {
            node_id: "b1".to_string(),
            node_name: "HVAC".to_string(),
        };

        let json = serde_json::to_string(&original).unwrap();
        let back: NodeAction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
        assert_eq!(back.action_name(), "saved");
        assert_eq!(back.node_id(), "b1");
    }

    #[test]
    fn test_create_node_request_shape() {
        let request = CreateNodeRequest { is_root: true };
        let parsed: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&request).unwrap()).unwrap();
        assert_eq!(parsed.get("isRoot").unwrap(), true);
    }
}
