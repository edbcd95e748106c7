//! Mutable visual styles of drawn nodes and edges.
//!
//! Values are CSS strings so they can be written straight into the SVG
//! `style` attribute and replayed by the report page.

use serde::{Deserialize, Serialize};

/// Node fill used when nothing is highlighted.
pub const NEUTRAL_FILL: &str = "none";
/// Edge stroke and arrowhead fill used when nothing is highlighted.
pub const DEFAULT_STROKE: &str = "black";
pub const DEFAULT_STROKE_WIDTH: &str = "2px";

/// Style of a node's primary shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeStyle {
    pub fill: String,
}

impl NodeStyle {
    pub fn neutral() -> Self {
        NodeStyle {
            fill: NEUTRAL_FILL.to_string(),
        }
    }

    pub fn to_css(&self) -> String {
        format!("fill: {}", self.fill)
    }
}

impl Default for NodeStyle {
    fn default() -> Self {
        NodeStyle::neutral()
    }
}

/// Style of an edge path and its arrowhead marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeStyle {
    pub stroke: String,
    pub stroke_width: String,
    pub marker_fill: String,
}

impl EdgeStyle {
    pub fn neutral() -> Self {
        EdgeStyle {
            stroke: DEFAULT_STROKE.to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH.to_string(),
            marker_fill: DEFAULT_STROKE.to_string(),
        }
    }

    /// CSS for the edge path itself.
    pub fn to_css(&self) -> String {
        format!(
            "stroke: {}; stroke-width: {}; fill: none",
            self.stroke, self.stroke_width
        )
    }

    /// CSS for the arrowhead shape.
    pub fn marker_css(&self) -> String {
        format!("fill: {}", self.marker_fill)
    }
}

impl Default for EdgeStyle {
    fn default() -> Self {
        EdgeStyle::neutral()
    }
}
