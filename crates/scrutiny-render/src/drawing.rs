//! The drawing handle: positioned elements with mutable styles.
//!
//! [`draw`] runs a layout engine over a [`GraphModel`], fits the result onto
//! the host page's drawing surface and returns a [`Drawing`]. After creation
//! the structure is frozen; only node and edge styles change, through
//! [`Drawing::node_mut`], [`Drawing::edge_mut`] or the [`StyleSurface`] trait.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use scrutiny_core::{EdgeId, GraphModel, NodeId};

use crate::error::RenderError;
use crate::layout::{LayoutEngine, NodeBox};
use crate::style::{EdgeStyle, NodeStyle};

/// Height and width headroom added around the laid-out content.
pub const SURFACE_MARGIN: f64 = 40.0;
/// Vertical offset of the content inside the surface.
pub const TOP_OFFSET: f64 = 20.0;

/// The host page's drawing surface before the graph is drawn into it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f64,
}

impl Default for Surface {
    fn default() -> Self {
        Surface { width: 960.0 }
    }
}

/// A drawn state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeElement {
    pub id: NodeId,
    pub name: String,
    pub bounds: NodeBox,
    pub style: NodeStyle,
}

/// A drawn `(from, to)` pair. Multi-edges share one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeElement {
    pub id: EdgeId,
    pub from: String,
    pub to: String,
    pub multiplicity: usize,
    pub points: Vec<(f64, f64)>,
    pub style: EdgeStyle,
}

/// Style-mutation access to drawn elements by name.
///
/// The highlight engine only ever needs these two lookups.
pub trait StyleSurface {
    fn node_style_mut(&mut self, name: &str) -> Option<&mut NodeStyle>;
    fn edge_style_mut(&mut self, from: &str, to: &str) -> Option<&mut EdgeStyle>;
}

/// A positioned drawing on a sized surface.
#[derive(Debug, Clone)]
pub struct Drawing {
    nodes: IndexMap<String, NodeElement>,
    edges: IndexMap<(String, String), EdgeElement>,
    translation: (f64, f64),
    width: f64,
    height: f64,
}

/// Lays out `model` with `engine` and fits it onto `surface`.
///
/// The surface is `max(surface.width, content width + SURFACE_MARGIN)` wide
/// and `content height + SURFACE_MARGIN` high, with the content centered
/// horizontally [`TOP_OFFSET`] below the top edge. A host wider than the
/// content keeps its width, so the surface (and the slider sized from it) is
/// only exactly `content width + SURFACE_MARGIN` when the content is at least
/// as wide as the host. Shrinking a wide host to the content after centering
/// against it would push the graph out of view.
pub fn draw(
    model: &GraphModel,
    engine: &dyn LayoutEngine,
    surface: Surface,
) -> Result<Drawing, RenderError> {
    let layout = engine.layout(model)?;

    let width = surface.width.max(layout.width + SURFACE_MARGIN);
    let height = layout.height + SURFACE_MARGIN;
    let translation = ((width - layout.width) / 2.0, TOP_OFFSET);

    let mut nodes = IndexMap::with_capacity(layout.nodes.len());
    for bounds in layout.nodes {
        let name = bounds.label.clone();
        nodes.insert(
            name.clone(),
            NodeElement {
                id: bounds.id,
                name,
                bounds,
                style: NodeStyle::neutral(),
            },
        );
    }

    let mut edges = IndexMap::with_capacity(layout.edges.len());
    for (i, path) in layout.edges.into_iter().enumerate() {
        let (Some(from), Some(to)) = (model.node_name(path.from), model.node_name(path.to)) else {
            continue;
        };
        edges.insert(
            (from.to_string(), to.to_string()),
            EdgeElement {
                id: EdgeId(i as u32),
                from: from.to_string(),
                to: to.to_string(),
                multiplicity: path.multiplicity,
                points: path.points,
                style: EdgeStyle::neutral(),
            },
        );
    }

    tracing::debug!(width, height, nodes = nodes.len(), edges = edges.len(), "drew graph");

    Ok(Drawing {
        nodes,
        edges,
        translation,
        width,
        height,
    })
}

impl Drawing {
    pub fn node(&self, name: &str) -> Option<&NodeElement> {
        self.nodes.get(name)
    }

    pub fn node_mut(&mut self, name: &str) -> Option<&mut NodeElement> {
        self.nodes.get_mut(name)
    }

    pub fn edge(&self, from: &str, to: &str) -> Option<&EdgeElement> {
        self.edges.get(&(from.to_string(), to.to_string()))
    }

    pub fn edge_mut(&mut self, from: &str, to: &str) -> Option<&mut EdgeElement> {
        self.edges.get_mut(&(from.to_string(), to.to_string()))
    }

    /// Drawn nodes in model order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeElement> {
        self.nodes.values()
    }

    /// Drawn edges in first-discovered order.
    pub fn edges(&self) -> impl Iterator<Item = &EdgeElement> {
        self.edges.values()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Offset applied to the content group.
    pub fn translation(&self) -> (f64, f64) {
        self.translation
    }
}

impl StyleSurface for Drawing {
    fn node_style_mut(&mut self, name: &str) -> Option<&mut NodeStyle> {
        self.node_mut(name).map(|n| &mut n.style)
    }

    fn edge_style_mut(&mut self, from: &str, to: &str) -> Option<&mut EdgeStyle> {
        self.edge_mut(from, to).map(|e| &mut e.style)
    }
}
