//! Layout and drawing for exploration graphs.
//!
//! This crate turns a [`scrutiny_core::GraphModel`] into a positioned
//! [`Drawing`] whose element styles can be mutated in place, and serializes
//! drawings to SVG.
//!
//! # Modules
//!
//! - [`layout`] -- the `LayoutEngine` seam and the dagre-backed layout
//! - [`drawing`] -- the drawing handle with node/edge lookups
//! - [`style`] -- node and edge styles
//! - [`svg`] -- SVG output
//! - [`error`] -- `RenderError`

pub mod drawing;
pub mod error;
pub mod layout;
pub mod style;
pub mod svg;

pub use drawing::{draw, Drawing, EdgeElement, NodeElement, StyleSurface, Surface};
pub use error::RenderError;
pub use layout::{DagreLayout, Layout, LayoutEngine, LayoutOptions};
pub use style::{EdgeStyle, NodeStyle};
