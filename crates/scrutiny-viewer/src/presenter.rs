//! Error Presenter: turns a recorded failure into panel content.
//!
//! A failure renders as a heading naming its location, the root message, and
//! one nested section per inner exception:
//!
//! ```text
//! Error occurred in transition from: 'B' to: 'C' with message:
//! boom
//!   With inner exception
//!   io failed
//! ```
//!
//! Chains of any depth are built and rendered with explicit loops.

use serde::Serialize;

use scrutiny_core::{Exception, Failure};
use scrutiny_render::svg::escape_xml;

pub const INNER_EXCEPTION_TITLE: &str = "With inner exception";

/// Panel content tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PanelNode {
    Heading(String),
    Subheading(String),
    /// Monospace, whitespace-preserving text.
    Preformatted(String),
    /// Children rendered one nesting level deeper.
    Section(Vec<PanelNode>),
}

/// Builds the panel block for one failure.
pub fn present(failure: &Failure) -> PanelNode {
    let exception = failure.exception();
    let mut children = vec![
        PanelNode::Heading(failure.location()),
        PanelNode::Preformatted(exception.message.clone()),
    ];
    if let Some(inner) = present_causes(exception) {
        children.push(inner);
    }
    PanelNode::Section(children)
}

/// Nested sections for every cause below `root`, innermost built first.
fn present_causes(root: &Exception) -> Option<PanelNode> {
    let causes: Vec<&Exception> = root.causes().skip(1).collect();
    causes.into_iter().rev().fold(None, |nested, cause| {
        let mut children = vec![
            PanelNode::Subheading(INNER_EXCEPTION_TITLE.to_string()),
            PanelNode::Preformatted(cause.message.clone()),
        ];
        children.extend(nested);
        Some(PanelNode::Section(children))
    })
}

enum Step<'a> {
    Enter(&'a PanelNode),
    Leave,
}

impl PanelNode {
    /// HTML fragment; all text is escaped.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![Step::Enter(self)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Leave => out.push_str("</div>"),
                Step::Enter(node) => match node {
                    PanelNode::Heading(text) | PanelNode::Subheading(text) => {
                        out.push_str(&format!("<h3>{}</h3>", escape_xml(text)));
                    }
                    PanelNode::Preformatted(text) => {
                        out.push_str(&format!("<div><pre>{}</pre></div>", escape_xml(text)));
                    }
                    PanelNode::Section(children) => {
                        out.push_str("<div>");
                        stack.push(Step::Leave);
                        for child in children.iter().rev() {
                            stack.push(Step::Enter(child));
                        }
                    }
                },
            }
        }
        out
    }

    /// Plain text, two spaces of indent per nesting level below the
    /// outermost section.
    pub fn to_text(&self) -> String {
        let mut lines = Vec::new();
        let mut stack = vec![(self, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            let indent = "  ".repeat(depth.saturating_sub(1));
            match node {
                PanelNode::Heading(text)
                | PanelNode::Subheading(text)
                | PanelNode::Preformatted(text) => {
                    for line in text.lines() {
                        lines.push(format!("{indent}{line}"));
                    }
                }
                PanelNode::Section(children) => {
                    for child in children.iter().rev() {
                        stack.push((child, depth + 1));
                    }
                }
            }
        }
        lines.join("\n")
    }

    /// Number of message blocks in this tree.
    pub fn message_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                PanelNode::Preformatted(_) => count += 1,
                PanelNode::Section(children) => stack.extend(children),
                _ => {}
            }
        }
        count
    }
}
