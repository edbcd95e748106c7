//! Playback Controller: scrub position to visual state.
//!
//! The controller's states are the positions `0..=N` of the performed walk.
//! Every change of position fully re-derives the step log, the element
//! styles and the error panel from the active prefix.

use crate::context::ViewerContext;
use crate::error::ViewerError;
use crate::highlight;

/// Current scrub position over a walk of `len` transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackController {
    position: usize,
    len: usize,
}

impl PlaybackController {
    pub fn new(len: usize) -> Self {
        PlaybackController { position: 0, len }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Largest valid position.
    pub fn max(&self) -> usize {
        self.len
    }

    /// Moves to `value` and redraws.
    pub fn on_input(&mut self, ctx: &mut ViewerContext, value: usize) -> Result<(), ViewerError> {
        if value > self.len {
            return Err(ViewerError::PositionOutOfRange {
                position: value,
                max: self.len,
            });
        }

        let ViewerContext {
            report,
            drawing,
            page,
            config,
            ..
        } = ctx;
        let all = &report.performed_transitions;
        let active = &all[..value];

        page.steps.replace(active);
        page.slider.value = value;
        highlight::reset(drawing, &mut page.error_panel, all)?;
        highlight::apply(drawing, &mut page.error_panel, active, &config.palette)?;

        self.position = value;
        tracing::debug!(position = value, max = self.len, "scrubbed");
        Ok(())
    }

    /// Handles a raw slider event value.
    pub fn on_input_event(&mut self, ctx: &mut ViewerContext, raw: &str) -> Result<(), ViewerError> {
        let value = raw
            .trim()
            .parse::<usize>()
            .map_err(|_| ViewerError::InvalidInput(raw.to_string()))?;
        self.on_input(ctx, value)
    }

    pub fn step_forward(&mut self, ctx: &mut ViewerContext) -> Result<(), ViewerError> {
        self.on_input(ctx, (self.position + 1).min(self.len))
    }

    pub fn step_back(&mut self, ctx: &mut ViewerContext) -> Result<(), ViewerError> {
        self.on_input(ctx, self.position.saturating_sub(1))
    }

    pub fn seek_end(&mut self, ctx: &mut ViewerContext) -> Result<(), ViewerError> {
        self.on_input(ctx, self.len)
    }
}
