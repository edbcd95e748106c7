//! Serializable snapshots of what is visible at a scrub position.
//!
//! A [`Frame`] is the full picture at one position. A [`Timeline`] stores
//! the picture at position 0 plus one [`FrameDelta`] per performed
//! transition, which is all the report page needs to reach any position.

use serde::Serialize;

use scrutiny_core::{EdgeId, NodeId};

use crate::context::ViewerContext;
use crate::page::STEPS_LABEL;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeFrame {
    pub id: NodeId,
    pub name: String,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeFrame {
    pub id: EdgeId,
    pub from: String,
    pub to: String,
    pub stroke: String,
    pub stroke_width: String,
    pub marker_fill: String,
}

/// One failure explanation, pre-rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelBlock {
    pub html: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PanelFrame {
    pub visible: bool,
    pub html: String,
    pub text: String,
    pub blocks: Vec<PanelBlock>,
}

impl PanelFrame {
    fn push(&mut self, block: PanelBlock) {
        if !self.text.is_empty() {
            self.text.push_str("\n\n");
        }
        self.html.push_str(&block.html);
        self.text.push_str(&block.text);
        self.blocks.push(block);
        self.visible = true;
    }
}

/// Styles, step log and error panel at one position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub position: usize,
    pub steps: String,
    pub nodes: Vec<NodeFrame>,
    pub edges: Vec<EdgeFrame>,
    pub error_panel: PanelFrame,
}

impl Frame {
    /// Captures the context as currently displayed.
    pub fn capture(ctx: &ViewerContext) -> Frame {
        let drawing = ctx.drawing();
        let page = ctx.page();
        let mut error_panel = PanelFrame::default();
        for block in page.error_panel.blocks() {
            error_panel.push(PanelBlock {
                html: block.to_html(),
                text: block.to_text(),
            });
        }
        error_panel.visible = page.error_panel.is_visible();

        Frame {
            position: page.slider.value,
            steps: page.steps.to_text(),
            nodes: drawing
                .nodes()
                .map(|n| NodeFrame {
                    id: n.id,
                    name: n.name.clone(),
                    fill: n.style.fill.clone(),
                })
                .collect(),
            edges: drawing
                .edges()
                .map(|e| EdgeFrame {
                    id: e.id,
                    from: e.from.clone(),
                    to: e.to.clone(),
                    stroke: e.style.stroke.clone(),
                    stroke_width: e.style.stroke_width.clone(),
                    marker_fill: e.style.marker_fill.clone(),
                })
                .collect(),
            error_panel,
        }
    }

    pub fn node(&self, name: &str) -> Option<&NodeFrame> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn edge(&self, from: &str, to: &str) -> Option<&EdgeFrame> {
        self.edges.iter().find(|e| e.from == from && e.to == to)
    }
}

/// What changes when playback advances by one transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameDelta {
    /// Position reached after applying this delta.
    pub position: usize,
    /// Step log entry appended at this position.
    pub step: String,
    pub nodes: Vec<NodeFrame>,
    pub edges: Vec<EdgeFrame>,
    /// Panel blocks appended at this position.
    pub panel_blocks: Vec<PanelBlock>,
}

impl FrameDelta {
    /// Differences from `prev` to `next`, one position later.
    ///
    /// Both frames come from the same drawing, so elements line up by index.
    /// The panel of `next` extends the panel of `prev`.
    pub fn between(prev: &Frame, next: &Frame, step: String) -> FrameDelta {
        FrameDelta {
            position: next.position,
            step,
            nodes: next
                .nodes
                .iter()
                .zip(&prev.nodes)
                .filter(|(n, p)| n != p)
                .map(|(n, _)| n.clone())
                .collect(),
            edges: next
                .edges
                .iter()
                .zip(&prev.edges)
                .filter(|(e, p)| e != p)
                .map(|(e, _)| e.clone())
                .collect(),
            panel_blocks: next
                .error_panel
                .blocks
                .iter()
                .skip(prev.error_panel.blocks.len())
                .cloned()
                .collect(),
        }
    }
}

/// Every scrub position of a report: the frame at 0 plus forward deltas.
///
/// Its size grows with the graph plus the walk, not their product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timeline {
    pub base: Frame,
    pub deltas: Vec<FrameDelta>,
}

impl Timeline {
    /// Rebuilds the frame at `position` by replaying deltas onto the base.
    ///
    /// Returns `None` past the end of the walk.
    pub fn replay(&self, position: usize) -> Option<Frame> {
        if position > self.deltas.len() {
            return None;
        }
        let mut frame = self.base.clone();
        let mut entries: Vec<&str> = Vec::with_capacity(position);
        for delta in &self.deltas[..position] {
            entries.push(&delta.step);
            for node in &delta.nodes {
                if let Some(slot) = frame.nodes.iter_mut().find(|n| n.id == node.id) {
                    *slot = node.clone();
                }
            }
            for edge in &delta.edges {
                if let Some(slot) = frame.edges.iter_mut().find(|e| e.id == edge.id) {
                    *slot = edge.clone();
                }
            }
            for block in &delta.panel_blocks {
                frame.error_panel.push(block.clone());
            }
            frame.position = delta.position;
        }
        if !entries.is_empty() {
            frame.steps = format!("{STEPS_LABEL} {}", entries.join(", "));
        }
        Some(frame)
    }
}
