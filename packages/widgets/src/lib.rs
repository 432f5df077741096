//! AssetTree Widget Layer
//!
//! Headless widgets for browsing and authoring a shallow asset hierarchy,
//! composed into a two-view navigation shell. Widgets are state machines:
//! user intents go in as method calls, and every transition comes back out
//! as an explicit [`NodeAction`] / [`CreateNodeRequest`] value consumed by
//! the owning shell. There is no side-channel between widgets.
//!
//! Rendering is out of scope; a host embeds these types and draws from
//! their accessors.
//!
//! # Modules
//!
//! - [`events`] - action values widgets hand back to their owner
//! - [`tree_node`] - the self-naming tree node widget
//! - [`create_button`] - the "create new node" button
//! - [`container`] - layout container for one parent's children
//! - [`views`] - root view, asset view, and the navigation shell

pub mod container;
pub mod create_button;
pub mod events;
pub mod tree_node;
pub mod views;

pub use container::ChildContainer;
pub use create_button::CreateNodeButton;
pub use events::{CreateNodeRequest, NodeAction};
pub use tree_node::TreeNode;
pub use views::{AppShell, AssetView, CurrentView, RootView};
