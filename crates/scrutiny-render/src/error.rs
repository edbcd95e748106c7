//! Render error types.

/// Errors that can occur while laying out, serializing or saving a drawing.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The layout engine could not position the graph.
    #[error("layout failed: {0}")]
    Layout(#[from] dugong::LayoutError),

    /// Formatting the SVG text failed.
    #[error("format error: {0}")]
    Format(#[from] std::fmt::Error),

    /// Filesystem I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
