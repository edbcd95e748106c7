//! Playback and highlighting for exploration-run reports.
//!
//! A [`ViewerContext`] holds one loaded report, its drawing and the host page
//! elements. A [`PlaybackController`] maps a scrub position to the active
//! prefix of the performed walk and re-derives every visible style from that
//! prefix alone.
//!
//! # Modules
//!
//! - [`context`] -- application context lifecycle
//! - [`playback`] -- scrub position state machine
//! - [`highlight`] -- reset and apply passes over the drawing
//! - [`presenter`] -- failure explanations with nested causes
//! - [`page`] -- slider, step log and error panel
//! - [`frame`] -- per-position snapshots and the replayable timeline
//! - [`export`] -- self-contained HTML report
//! - [`config`] -- palette, surface and layout options

pub mod config;
pub mod context;
pub mod error;
pub mod export;
pub mod frame;
pub mod highlight;
pub mod page;
pub mod playback;
pub mod presenter;

pub use config::{Palette, ViewerConfig};
pub use context::ViewerContext;
pub use error::ViewerError;
pub use frame::{Frame, FrameDelta, Timeline};
pub use playback::PlaybackController;
