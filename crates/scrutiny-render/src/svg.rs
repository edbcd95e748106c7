//! SVG serialization of a [`Drawing`].
//!
//! Element ids are stable (`node-<i>`, `edge-<i>`, `arrow-<i>`) so that the
//! report page can restyle elements without knowing state names.

use std::fmt::Write;
use std::path::Path;

use crate::drawing::Drawing;
use crate::error::RenderError;

/// Escapes text for use in XML content and attribute values.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn path_data(points: &[(f64, f64)]) -> String {
    match points {
        [(x0, y0), rest @ ..] => {
            let mut d = format!("M {x0} {y0}");
            for (x, y) in rest {
                d.push_str(&format!(" L {x} {y}"));
            }
            d
        }
        [] => String::new(),
    }
}

/// Writes the full `<svg>` element for `drawing`.
pub fn write_svg<W: Write>(out: &mut W, drawing: &Drawing) -> std::fmt::Result {
    let (tx, ty) = drawing.translation();
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" id="graph" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = drawing.width(),
        h = drawing.height(),
    )?;
    writeln!(out, r#"<g transform="translate({tx}, {ty})">"#)?;

    writeln!(out, r#"<g class="edgePaths">"#)?;
    for edge in drawing.edges() {
        let id = edge.id;
        writeln!(
            out,
            r#"<g class="edgePath" id="edge-{id}" data-from="{from}" data-to="{to}">"#,
            from = escape_xml(&edge.from),
            to = escape_xml(&edge.to),
        )?;
        writeln!(
            out,
            r#"<path d="{d}" style="{css}" marker-end="url(#arrow-{id})"/>"#,
            d = path_data(&edge.points),
            css = edge.style.to_css(),
        )?;
        writeln!(
            out,
            r#"<defs><marker id="arrow-{id}" viewBox="0 0 10 10" refX="9" refY="5" markerUnits="strokeWidth" markerWidth="8" markerHeight="6" orient="auto"><path d="M 0 0 L 10 5 L 0 10 z" style="{css}"/></marker></defs>"#,
            css = edge.style.marker_css(),
        )?;
        if edge.multiplicity > 1 {
            let (mx, my) = midpoint(&edge.points);
            writeln!(
                out,
                r#"<text class="multiplicity" x="{mx}" y="{my}" text-anchor="middle">x{}</text>"#,
                edge.multiplicity
            )?;
        }
        writeln!(out, "</g>")?;
    }
    writeln!(out, "</g>")?;

    writeln!(out, r#"<g class="nodes">"#)?;
    for node in drawing.nodes() {
        let b = &node.bounds;
        writeln!(
            out,
            r#"<g class="node" id="node-{id}" transform="translate({x}, {y})">"#,
            id = node.id,
            x = b.x,
            y = b.y,
        )?;
        writeln!(
            out,
            r#"<rect rx="5" ry="5" x="{x}" y="{y}" width="{w}" height="{h}" style="{css}"/>"#,
            x = -b.width / 2.0,
            y = -b.height / 2.0,
            w = b.width,
            h = b.height,
            css = node.style.to_css(),
        )?;
        writeln!(
            out,
            r#"<text text-anchor="middle" dominant-baseline="central">{}</text>"#,
            escape_xml(&node.name)
        )?;
        writeln!(out, "</g>")?;
    }
    writeln!(out, "</g>")?;

    writeln!(out, "</g>")?;
    write!(out, "</svg>")
}

/// Middle routing point, or the midpoint of a straight two-point edge.
fn midpoint(points: &[(f64, f64)]) -> (f64, f64) {
    match points {
        [] => (0.0, 0.0),
        [a, b] => ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0),
        _ => points[points.len() / 2],
    }
}

/// Renders `drawing` to an SVG string.
pub fn to_svg(drawing: &Drawing) -> Result<String, RenderError> {
    let mut out = String::new();
    write_svg(&mut out, drawing)?;
    Ok(out)
}

/// Renders `drawing` and writes it to `path`.
pub fn save_svg(drawing: &Drawing, path: &Path) -> Result<(), RenderError> {
    let svg = to_svg(drawing)?;
    std::fs::write(path, svg)?;
    tracing::info!(path = %path.display(), "wrote svg");
    Ok(())
}
