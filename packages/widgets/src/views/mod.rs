//! View Shells
//!
//! The two-view navigation shell: a root view listing top-level assets and
//! an asset view showing one asset with its children, coordinated by
//! [`AppShell`]. The shell consumes the action values widgets return and
//! owns all navigation decisions; widgets never know where a click leads.

mod asset_view;
mod root_view;
mod shell;

pub use asset_view::AssetView;
pub use root_view::RootView;
pub use shell::{AppShell, CurrentView};
