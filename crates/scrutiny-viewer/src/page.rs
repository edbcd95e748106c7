//! Host page elements the viewer writes to: the scrub slider, the step log
//! and the error panel.

use serde::Serialize;

use scrutiny_core::{Failure, Transition};

use crate::presenter::{present, PanelNode};

pub const STEPS_LABEL: &str = "Steps:";

/// The range input that drives playback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeInput {
    pub min: usize,
    pub max: usize,
    pub value: usize,
    /// Rendered width in pixels, matched to the drawing.
    pub width: f64,
}

/// Textual listing of the active transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StepLog {
    entries: Vec<String>,
}

impl StepLog {
    /// Replaces the listing with `transitions`.
    pub fn replace(&mut self, transitions: &[Transition]) {
        self.entries = transitions.iter().map(Transition::describe).collect();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// `"Steps: A --> B, B --> C"`.
    pub fn to_text(&self) -> String {
        if self.entries.is_empty() {
            STEPS_LABEL.to_string()
        } else {
            format!("{STEPS_LABEL} {}", self.entries.join(", "))
        }
    }
}

/// Panel explaining failures in the active transitions. Hidden when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorPanel {
    visible: bool,
    blocks: Vec<PanelNode>,
}

impl ErrorPanel {
    /// Hides the panel and drops its contents.
    pub fn clear(&mut self) {
        self.visible = false;
        self.blocks.clear();
    }

    /// Appends the explanation of `failure` and shows the panel.
    pub fn append(&mut self, failure: &Failure) {
        self.blocks.push(present(failure));
        self.visible = true;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn blocks(&self) -> &[PanelNode] {
        &self.blocks
    }

    pub fn to_html(&self) -> String {
        self.blocks.iter().map(PanelNode::to_html).collect()
    }

    pub fn to_text(&self) -> String {
        self.blocks
            .iter()
            .map(PanelNode::to_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// All host page elements for one loaded report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub slider: RangeInput,
    pub steps: StepLog,
    pub error_panel: ErrorPanel,
}

impl Page {
    /// A page for a walk of `len` transitions next to a drawing `width` wide.
    pub fn new(len: usize, width: f64) -> Self {
        Page {
            slider: RangeInput {
                min: 0,
                max: len,
                value: 0,
                width,
            },
            steps: StepLog::default(),
            error_panel: ErrorPanel::default(),
        }
    }
}
