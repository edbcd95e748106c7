//! Static report export.
//!
//! Produces one self-contained HTML page: the drawing as inline SVG, the
//! slider, step log and error panel, and the [`Timeline`] of the walk. The
//! bundled script replays timeline deltas when the slider moves; all
//! highlighting is decided here.

use std::path::Path;

use scrutiny_render::svg;

use crate::context::ViewerContext;
use crate::error::ViewerError;
use crate::frame::{Frame, FrameDelta, Timeline};
use crate::playback::PlaybackController;

const TEMPLATE: &str = include_str!("../static/report/index.html");
const APP_JS: &str = include_str!("../static/report/app.js");
const STYLES_CSS: &str = include_str!("../static/report/styles.css");

/// Drives `controller` through every position and records the timeline.
///
/// The controller is returned to its starting position afterwards.
pub fn capture_timeline(
    ctx: &mut ViewerContext,
    controller: &mut PlaybackController,
) -> Result<Timeline, ViewerError> {
    let start = controller.position();
    controller.on_input(ctx, 0)?;
    let base = Frame::capture(ctx);

    let mut deltas = Vec::with_capacity(controller.max());
    let mut prev = base.clone();
    for position in 1..=controller.max() {
        controller.on_input(ctx, position)?;
        let next = Frame::capture(ctx);
        let step = ctx.page().steps.entries().last().cloned().unwrap_or_default();
        deltas.push(FrameDelta::between(&prev, &next, step));
        prev = next;
    }

    controller.on_input(ctx, start)?;
    Ok(Timeline { base, deltas })
}

/// Substitutes `__NAME__` placeholders in one left-to-right pass over
/// `template`. Inserted values are never scanned again.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;
    while let Some((at, key, value)) = values
        .iter()
        .filter_map(|(k, v)| rest.find(k).map(|i| (i, *k, *v)))
        .min_by_key(|(i, _, _)| *i)
    {
        out.push_str(&rest[..at]);
        out.push_str(value);
        rest = &rest[at + key.len()..];
    }
    out.push_str(rest);
    out
}

/// Renders the full report page.
pub fn render_html(
    ctx: &mut ViewerContext,
    controller: &mut PlaybackController,
) -> Result<String, ViewerError> {
    let timeline = capture_timeline(ctx, controller)?;

    // The embedded SVG shows position 0.
    let start = controller.position();
    controller.on_input(ctx, 0)?;
    let svg = svg::to_svg(ctx.drawing())?;
    controller.on_input(ctx, start)?;

    // `<` only occurs inside JSON strings, so the escape keeps the data from
    // closing or commenting out its <script> element.
    let timeline_json = serde_json::to_string(&timeline)?.replace('<', "\\u003c");
    let slider = &ctx.page().slider;

    let html = fill_template(
        TEMPLATE,
        &[
            ("__STYLES__", STYLES_CSS),
            ("__APP_JS__", APP_JS),
            ("__SLIDER_MAX__", &slider.max.to_string()),
            ("__SLIDER_VALUE__", &slider.value.to_string()),
            ("__SLIDER_WIDTH__", &slider.width.to_string()),
            ("__SVG__", &svg),
            ("__TIMELINE__", &timeline_json),
        ],
    );

    tracing::info!(
        deltas = timeline.deltas.len(),
        bytes = html.len(),
        "rendered report page"
    );
    Ok(html)
}

/// Renders the report page and writes it to `path`.
pub fn save_html(
    ctx: &mut ViewerContext,
    controller: &mut PlaybackController,
    path: &Path,
) -> Result<(), ViewerError> {
    let html = render_html(ctx, controller)?;
    std::fs::write(path, html)?;
    tracing::info!(path = %path.display(), "wrote report page");
    Ok(())
}
