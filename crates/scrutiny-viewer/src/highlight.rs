//! Highlight Engine: styles derived from a transition subsequence.
//!
//! Playback always calls [`reset`] over the whole performed walk before
//! [`apply`] over the active prefix. The drawing is shared mutable state, so
//! the visible styles depend only on the current prefix, never on which
//! positions were shown before.

use scrutiny_core::{Failure, Transition};
use scrutiny_render::{EdgeStyle, NodeStyle, StyleSurface};

use crate::config::Palette;
use crate::error::ViewerError;
use crate::page::ErrorPanel;

fn node<'s, S: StyleSurface + ?Sized>(
    surface: &'s mut S,
    name: &str,
) -> Result<&'s mut NodeStyle, ViewerError> {
    surface
        .node_style_mut(name)
        .ok_or_else(|| ViewerError::MissingNode {
            name: name.to_string(),
        })
}

fn edge<'s, S: StyleSurface + ?Sized>(
    surface: &'s mut S,
    from: &str,
    to: &str,
) -> Result<&'s mut EdgeStyle, ViewerError> {
    surface
        .edge_style_mut(from, to)
        .ok_or_else(|| ViewerError::MissingEdge {
            from: from.to_string(),
            to: to.to_string(),
        })
}

/// Restores neutral styles on every element touched by `all` and empties
/// the error panel. Idempotent.
pub fn reset<S: StyleSurface + ?Sized>(
    surface: &mut S,
    panel: &mut ErrorPanel,
    all: &[Transition],
) -> Result<(), ViewerError> {
    panel.clear();
    for t in all {
        *node(surface, &t.from.name)? = NodeStyle::neutral();
        *node(surface, &t.to.name)? = NodeStyle::neutral();
        *edge(surface, &t.from.name, &t.to.name)? = EdgeStyle::neutral();
        // A failure may name an element other than the ones walked.
        match &t.error {
            None => {}
            Some(Failure::State { state, .. }) => *node(surface, state)? = NodeStyle::neutral(),
            Some(Failure::Transition { from, to, .. }) => {
                *edge(surface, from, to)? = EdgeStyle::neutral();
            }
        }
    }
    Ok(())
}

/// Styles every transition in `active`, in order. Later transitions
/// overwrite earlier styling of a shared element.
pub fn apply<S: StyleSurface + ?Sized>(
    surface: &mut S,
    panel: &mut ErrorPanel,
    active: &[Transition],
    palette: &Palette,
) -> Result<(), ViewerError> {
    for t in active {
        match &t.error {
            None => {
                node(surface, &t.from.name)?.fill = palette.visited.clone();
                node(surface, &t.to.name)?.fill = palette.reached.clone();
            }
            Some(failure @ Failure::State { state, .. }) => {
                node(surface, state)?.fill = palette.failed.clone();
                panel.append(failure);
            }
            Some(failure @ Failure::Transition { from, to, .. }) => {
                let style = edge(surface, from, to)?;
                style.stroke = palette.failed.clone();
                style.stroke_width = palette.failed_stroke_width.clone();
                style.marker_fill = palette.failed.clone();
                panel.append(failure);
            }
        }
    }
    Ok(())
}
