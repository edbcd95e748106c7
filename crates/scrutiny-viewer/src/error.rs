//! Viewer error types.

use scrutiny_core::CoreError;
use scrutiny_render::RenderError;

/// Errors raised by the viewer itself (as opposed to failures recorded in a
/// report, which are data to display).
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// The report could not be loaded or is inconsistent with its graph.
    #[error(transparent)]
    Report(#[from] CoreError),

    /// A highlight targeted a state that was never drawn.
    #[error("no drawn node named '{name}'")]
    MissingNode { name: String },

    /// A highlight targeted an edge that was never drawn.
    #[error("no drawn edge '{from}' -> '{to}'")]
    MissingEdge { from: String, to: String },

    /// A scrub position past the end of the performed walk.
    #[error("scrub position {position} is outside 0..={max}")]
    PositionOutOfRange { position: usize, max: usize },

    /// A slider event whose value is not a position.
    #[error("invalid slider value '{0}'")]
    InvalidInput(String),

    /// Serializing the drawing failed.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Serializing the timeline or reading configuration failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
