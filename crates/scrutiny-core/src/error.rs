//! Core error types for scrutiny-core.
//!
//! Uses `thiserror` for structured, matchable variants covering malformed
//! report input and every way a report can disagree with its own graph.

use thiserror::Error;

/// Errors produced while loading or validating an exploration report.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The report JSON could not be parsed into the expected shape.
    #[error("malformed report: {0}")]
    Parse(#[from] serde_json::Error),

    /// A failure record did not match either the `State` or `Transition` shape.
    #[error("invalid failure record: {reason}")]
    InvalidFailure { reason: String },

    /// A state is listed as a graph source more than once.
    #[error("state '{state}' appears as a graph source more than once")]
    DuplicateSource { state: String },

    /// A transition or failure names a state absent from the graph.
    #[error("transition #{index} references unknown state '{state}'")]
    UnknownState { index: usize, state: String },

    /// A transition or failure names an edge absent from the graph.
    #[error("transition #{index} references undiscovered edge '{from}' -> '{to}'")]
    UnknownEdge {
        index: usize,
        from: String,
        to: String,
    },
}
