//! Error types for the hub.

use dungeon_layout::LayoutError;

/// Errors that can occur talking to or starting the hub.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// The hub's control loop has stopped.
    #[error("hub is unavailable")]
    Unavailable,

    /// The first match could not be built.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
