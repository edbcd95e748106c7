//! Application context for one loaded report.
//!
//! [`ViewerContext`] owns everything the viewer mutates or reads while the
//! report is open: the report, its graph model, the drawing and the host
//! page elements. It is created by [`ViewerContext::init`] together with the
//! [`PlaybackController`] that drives it, and discarded by
//! [`ViewerContext::teardown`].

use scrutiny_core::{validate_report, GraphModel, Report};
use scrutiny_render::{draw, DagreLayout, Drawing};

use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::page::Page;
use crate::playback::PlaybackController;

#[derive(Debug, Clone)]
pub struct ViewerContext {
    pub(crate) report: Report,
    pub(crate) model: GraphModel,
    pub(crate) drawing: Drawing,
    pub(crate) page: Page,
    pub(crate) config: ViewerConfig,
}

impl ViewerContext {
    /// Builds, validates and draws `report`, then shows scrub position 0.
    ///
    /// An inconsistent report is rejected before anything is drawn.
    pub fn init(
        report: Report,
        config: ViewerConfig,
    ) -> Result<(ViewerContext, PlaybackController), ViewerError> {
        let model = GraphModel::build(&report.graph);
        validate_report(&report, &model)?;

        let engine = DagreLayout::new(config.layout.clone());
        let drawing = draw(&model, &engine, config.surface)?;
        let page = Page::new(report.len(), drawing.width());

        tracing::info!(
            nodes = model.node_count(),
            edges = model.edge_count(),
            transitions = report.len(),
            failures = report.failure_count(),
            "loaded exploration report"
        );

        let mut ctx = ViewerContext {
            report,
            model,
            drawing,
            page,
            config,
        };
        let mut controller = PlaybackController::new(ctx.report.len());
        controller.on_input(&mut ctx, 0)?;
        Ok((ctx, controller))
    }

    /// Parses `json` and initializes a context from it.
    pub fn load_json(
        json: &str,
        config: ViewerConfig,
    ) -> Result<(ViewerContext, PlaybackController), ViewerError> {
        let report = Report::from_json(json)?;
        Self::init(report, config)
    }

    /// Discards the drawing and page state, handing back the report.
    pub fn teardown(self) -> Report {
        tracing::debug!("viewer context torn down");
        self.report
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn model(&self) -> &GraphModel {
        &self.model
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrutiny_core::CoreError;

    const REPORT: &str = r#"{
        "Graph": [[{"Name": "A"}, [{"Name": "B"}]], [{"Name": "B"}, []]],
        "PerformedTransitions": [{"From": {"Name": "A"}, "To": {"Name": "B"}}]
    }"#;

    #[test]
    fn init_draws_and_sizes_slider() {
        let (ctx, controller) = ViewerContext::load_json(REPORT, ViewerConfig::default()).unwrap();
        assert_eq!(controller.position(), 0);
        assert_eq!(ctx.page().slider.max, 1);
        assert_eq!(ctx.page().slider.width, ctx.drawing().width());
        assert_eq!(ctx.drawing().nodes().count(), 2);
        assert_eq!(ctx.page().steps.to_text(), "Steps:");
    }

    #[test]
    fn malformed_json_is_fatal() {
        let err = ViewerContext::load_json("{", ViewerConfig::default()).unwrap_err();
        assert!(matches!(err, ViewerError::Report(CoreError::Parse(_))));
    }

    #[test]
    fn inconsistent_report_is_rejected_before_drawing() {
        let json = r#"{
            "Graph": [[{"Name": "A"}, []]],
            "PerformedTransitions": [{"From": {"Name": "A"}, "To": {"Name": "Ghost"}}]
        }"#;
        let err = ViewerContext::load_json(json, ViewerConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ViewerError::Report(CoreError::UnknownState { state, .. }) if state == "Ghost"
        ));
    }

    #[test]
    fn teardown_returns_report() {
        let (ctx, _) = ViewerContext::load_json(REPORT, ViewerConfig::default()).unwrap();
        let report = ctx.teardown();
        assert_eq!(report.len(), 1);
    }
}
