//! Report model and graph building for exploration-run reports.
//!
//! # Modules
//!
//! - [`report`] -- typed report input: states, transitions, exception chains
//! - [`failure`] -- the two failure locations and their wire form
//! - [`graph`] -- deduplicated node/edge model of the discovered graph
//! - [`validate`] -- consistency checks between the walk and the graph
//! - [`error`] -- `CoreError`

pub mod error;
pub mod failure;
pub mod graph;
pub mod id;
pub mod report;
pub mod validate;

pub use error::CoreError;
pub use failure::Failure;
pub use graph::GraphModel;
pub use id::{EdgeId, NodeId};
pub use report::{Causes, Exception, PageState, Report, Transition};
pub use validate::{collect_violations, validate_report};
