//! Layout collaborator seam.
//!
//! The viewer never computes positions itself: it hands a [`GraphModel`] to a
//! [`LayoutEngine`] and receives boxes and edge paths back. [`DagreLayout`]
//! is the bundled engine, delegating to `dugong` (a port of dagre) with
//! `rankdir: LR`.

use dugong::graphlib::{Graph, GraphOptions};
use dugong::{EdgeLabel, GraphLabel, NodeLabel, RankDir};
use serde::{Deserialize, Serialize};

use scrutiny_core::{GraphModel, NodeId};

use crate::error::RenderError;

/// A positioned node. `x`/`y` are the box center.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeBox {
    pub id: NodeId,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A routed edge between two positioned nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgePath {
    pub from: NodeId,
    pub to: NodeId,
    /// How many times this pair was discovered.
    pub multiplicity: usize,
    /// Polyline from the source box boundary to the target box boundary.
    pub points: Vec<(f64, f64)>,
}

/// Computed positions plus content bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    pub nodes: Vec<NodeBox>,
    pub edges: Vec<EdgePath>,
    pub width: f64,
    pub height: f64,
}

/// Anything that can position a graph model.
pub trait LayoutEngine {
    fn layout(&self, model: &GraphModel) -> Result<Layout, RenderError>;
}

/// Spacing and sizing parameters for [`DagreLayout`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Gap between rank columns.
    pub rank_sep: f64,
    /// Gap between nodes of the same rank.
    pub node_sep: f64,
    pub edge_sep: f64,
    pub node_height: f64,
    /// Approximate advance of one label character.
    pub char_width: f64,
    /// Horizontal padding on each side of a label.
    pub label_padding: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            rank_sep: 50.0,
            node_sep: 50.0,
            edge_sep: 20.0,
            node_height: 40.0,
            char_width: 8.0,
            label_padding: 20.0,
        }
    }
}

impl LayoutOptions {
    pub fn node_width(&self, label: &str) -> f64 {
        label.chars().count() as f64 * self.char_width + 2.0 * self.label_padding
    }
}

/// Left-to-right layered layout computed by `dugong`.
///
/// Each distinct `(from, to)` pair becomes one dagre edge; node boxes are
/// sized from their label.
#[derive(Debug, Clone, Default)]
pub struct DagreLayout {
    pub options: LayoutOptions,
}

impl DagreLayout {
    pub fn new(options: LayoutOptions) -> Self {
        DagreLayout { options }
    }

    fn graph(&self, model: &GraphModel) -> Graph<NodeLabel, EdgeLabel, GraphLabel> {
        let opts = &self.options;
        let mut g = Graph::<NodeLabel, EdgeLabel, GraphLabel>::new(GraphOptions {
            directed: true,
            multigraph: false,
            compound: false,
        });
        g.set_graph(GraphLabel {
            rankdir: RankDir::LR,
            nodesep: opts.node_sep,
            ranksep: opts.rank_sep,
            edgesep: opts.edge_sep,
            ..Default::default()
        });

        for name in model.nodes() {
            g.set_node(
                name,
                NodeLabel {
                    width: opts.node_width(name),
                    height: opts.node_height,
                    ..Default::default()
                },
            );
        }
        for (from, to, _) in model.distinct_edges() {
            let (Some(v), Some(w)) = (model.node_name(from), model.node_name(to)) else {
                continue;
            };
            g.set_edge_with_label(
                v,
                w,
                EdgeLabel {
                    minlen: 1,
                    weight: 1.0,
                    ..Default::default()
                },
            );
        }
        g
    }
}

impl LayoutEngine for DagreLayout {
    fn layout(&self, model: &GraphModel) -> Result<Layout, RenderError> {
        if model.node_count() == 0 {
            return Ok(Layout::default());
        }

        let mut g = self.graph(model);
        dugong::layout(&mut g)?;

        let mut nodes = Vec::with_capacity(model.node_count());
        for (i, name) in model.nodes().enumerate() {
            let Some(n) = g.node(name) else {
                continue;
            };
            nodes.push(NodeBox {
                id: NodeId(i as u32),
                label: name.to_string(),
                x: n.x.unwrap_or(0.0),
                y: n.y.unwrap_or(0.0),
                width: n.width,
                height: n.height,
            });
        }

        let mut edges = Vec::new();
        for (from, to, multiplicity) in model.distinct_edges() {
            let (Some(v), Some(w)) = (model.node_name(from), model.node_name(to)) else {
                continue;
            };
            let Some(e) = g.edge(v, w, None) else {
                continue;
            };
            edges.push(EdgePath {
                from,
                to,
                multiplicity,
                points: e.points.iter().map(|p| (p.x, p.y)).collect(),
            });
        }

        let label = g.graph();
        tracing::debug!(
            width = label.width,
            height = label.height,
            nodes = nodes.len(),
            edges = edges.len(),
            "laid out graph"
        );

        Ok(Layout {
            nodes,
            edges,
            width: label.width,
            height: label.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrutiny_core::PageState;

    fn model(entries: &[(&str, &[&str])]) -> GraphModel {
        let entries: Vec<(PageState, Vec<PageState>)> = entries
            .iter()
            .map(|(s, succ)| {
                (
                    PageState::new(*s),
                    succ.iter().map(|n| PageState::new(*n)).collect(),
                )
            })
            .collect();
        GraphModel::build(&entries)
    }

    #[test]
    fn chain_runs_left_to_right() {
        let layout = DagreLayout::default()
            .layout(&model(&[("A", &["B"]), ("B", &["C"])]))
            .unwrap();
        assert_eq!(layout.nodes.len(), 3);
        assert!(layout.nodes[0].x < layout.nodes[1].x);
        assert!(layout.nodes[1].x < layout.nodes[2].x);
        assert!(layout.width >= 3.0 * 48.0);
        assert!(layout.height >= 40.0);
    }

    #[test]
    fn nodes_are_sized_from_labels() {
        let layout = DagreLayout::default()
            .layout(&model(&[("Home", &["Checkout"])]))
            .unwrap();
        assert_eq!(layout.nodes[0].label, "Home");
        assert_eq!(layout.nodes[0].width, 4.0 * 8.0 + 40.0);
        assert_eq!(layout.nodes[1].width, 8.0 * 8.0 + 40.0);
        assert_eq!(layout.nodes[1].height, 40.0);
    }

    #[test]
    fn nodes_fit_inside_reported_bounds() {
        let layout = DagreLayout::default()
            .layout(&model(&[("A", &["B", "C"]), ("B", &["A"]), ("C", &["C"])]))
            .unwrap();
        for node in &layout.nodes {
            assert!(node.x - node.width / 2.0 >= -1e-6);
            assert!(node.x + node.width / 2.0 <= layout.width + 1e-6);
            assert!(node.y - node.height / 2.0 >= -1e-6);
            assert!(node.y + node.height / 2.0 <= layout.height + 1e-6);
        }
        assert!(layout.edges.iter().all(|e| e.points.len() >= 2));
    }

    #[test]
    fn multi_edges_collapse_with_multiplicity() {
        let layout = DagreLayout::default()
            .layout(&model(&[("A", &["B", "B"])]))
            .unwrap();
        assert_eq!(layout.edges.len(), 1);
        assert_eq!(layout.edges[0].multiplicity, 2);
    }

    #[test]
    fn empty_model_has_empty_layout() {
        let layout = DagreLayout::default().layout(&model(&[])).unwrap();
        assert!(layout.nodes.is_empty());
        assert_eq!(layout.width, 0.0);
    }
}
