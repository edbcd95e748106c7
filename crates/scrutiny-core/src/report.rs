//! Typed representation of an exploration report.
//!
//! A [`Report`] is produced by the external exploration engine as JSON:
//!
//! ```json
//! {
//!   "Graph": [[{"Name": "A"}, [{"Name": "B"}]]],
//!   "PerformedTransitions": [{"From": {"Name": "A"}, "To": {"Name": "B"}}]
//! }
//! ```
//!
//! The types here carry shape only. Consistency between the performed walk
//! and the discovered graph is checked by [`crate::validate`].

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::failure::Failure;

/// A named vertex in the exploration graph. Identity is the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageState {
    #[serde(rename = "Name")]
    pub name: String,
}

impl PageState {
    pub fn new(name: impl Into<String>) -> Self {
        PageState { name: name.into() }
    }
}

/// An exception message with an optional owned cause.
///
/// Because each link owns the next, a chain is always finite and acyclic.
/// Chains are dropped link by link, so depth is bounded only by memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exception {
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(
        rename = "InnerException",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub inner: Option<Box<Exception>>,
}

impl Exception {
    pub fn new(message: impl Into<String>) -> Self {
        Exception {
            message: message.into(),
            inner: None,
        }
    }

    /// Attaches `inner` as the direct cause of this exception.
    pub fn with_inner(mut self, inner: Exception) -> Self {
        self.inner = Some(Box::new(inner));
        self
    }

    /// Walks the causal chain, starting with `self`.
    pub fn causes(&self) -> Causes<'_> {
        Causes { next: Some(self) }
    }

    /// Number of exceptions in the chain, including `self`.
    pub fn depth(&self) -> usize {
        self.causes().count()
    }
}

impl Drop for Exception {
    fn drop(&mut self) {
        let mut next = self.inner.take();
        while let Some(mut cause) = next {
            next = cause.inner.take();
        }
    }
}

/// Lazy iterator over an exception chain, root first.
#[derive(Debug, Clone)]
pub struct Causes<'a> {
    next: Option<&'a Exception>,
}

impl<'a> Iterator for Causes<'a> {
    type Item = &'a Exception;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.inner.as_deref();
        Some(current)
    }
}

/// One step of the performed walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    #[serde(rename = "From")]
    pub from: PageState,
    #[serde(rename = "To")]
    pub to: PageState,
    #[serde(rename = "Error", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Failure>,
}

impl Transition {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Transition {
            from: PageState::new(from),
            to: PageState::new(to),
            error: None,
        }
    }

    pub fn failed(mut self, failure: Failure) -> Self {
        self.error = Some(failure);
        self
    }

    /// `"<from> --> <to>"`, as listed in the step log.
    pub fn describe(&self) -> String {
        format!("{} --> {}", self.from.name, self.to.name)
    }
}

/// Top-level report: the discovered graph plus the performed walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Each discovered state with its successors, in discovery order.
    #[serde(rename = "Graph")]
    pub graph: Vec<(PageState, Vec<PageState>)>,
    /// The walk actually executed, in order.
    #[serde(rename = "PerformedTransitions")]
    pub performed_transitions: Vec<Transition>,
}

impl Report {
    /// Parses a report, failing on any shape mismatch.
    ///
    /// Exception chains may nest arbitrarily deep: the recursion limit is
    /// off and the stack grows on demand while parsing.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let mut de = serde_json::Deserializer::from_str(json);
        Self::parse(&mut de)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CoreError> {
        let mut de = serde_json::Deserializer::from_reader(reader);
        Self::parse(&mut de)
    }

    fn parse<'de, R: serde_json::de::Read<'de>>(
        de: &mut serde_json::Deserializer<R>,
    ) -> Result<Self, CoreError> {
        de.disable_recursion_limit();
        let report = Report::deserialize(serde_stacker::Deserializer::new(&mut *de))?;
        de.end()?;
        Ok(report)
    }

    /// Number of performed transitions, i.e. the maximum scrub position.
    pub fn len(&self) -> usize {
        self.performed_transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.performed_transitions.is_empty()
    }

    /// Number of transitions that carry a failure.
    pub fn failure_count(&self) -> usize {
        self.performed_transitions
            .iter()
            .filter(|t| t.error.is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "Graph": [
            [{"Name": "A"}, [{"Name": "B"}]],
            [{"Name": "B"}, [{"Name": "C"}]]
        ],
        "PerformedTransitions": [
            {"From": {"Name": "A"}, "To": {"Name": "B"}},
            {"From": {"Name": "B"}, "To": {"Name": "C"}, "Error": {
                "Case": "Transition",
                "Fields": ["B", "C", {"Message": "boom", "InnerException": {"Message": "cause"}}]
            }}
        ]
    }"#;

    #[test]
    fn parses_sample_report() {
        let report = Report::from_json(SAMPLE).unwrap();
        assert_eq!(report.graph.len(), 2);
        assert_eq!(report.graph[0].0, PageState::new("A"));
        assert_eq!(report.graph[1].1, vec![PageState::new("C")]);
        assert_eq!(report.len(), 2);
        assert_eq!(report.failure_count(), 1);
        assert!(report.performed_transitions[0].error.is_none());

        let failure = report.performed_transitions[1].error.as_ref().unwrap();
        let messages: Vec<&str> = failure
            .exception()
            .causes()
            .map(|e| e.message.as_str())
            .collect();
        assert_eq!(messages, vec!["boom", "cause"]);
    }

    #[test]
    fn null_error_is_absent() {
        let json = r#"{
            "Graph": [],
            "PerformedTransitions": [{"From": {"Name": "A"}, "To": {"Name": "B"}, "Error": null}]
        }"#;
        let report = Report::from_json(json).unwrap();
        assert!(report.performed_transitions[0].error.is_none());
    }

    #[test]
    fn missing_sections_fail_fast() {
        let err = Report::from_json(r#"{"Graph": []}"#).unwrap_err();
        assert!(matches!(err, CoreError::Parse(_)));
        assert!(err.to_string().contains("PerformedTransitions"));
    }

    #[test]
    fn non_string_names_fail_fast() {
        let json = r#"{"Graph": [[{"Name": 1}, []]], "PerformedTransitions": []}"#;
        assert!(Report::from_json(json).is_err());
    }

    #[test]
    fn exception_depth_counts_every_link() {
        let chain = Exception::new("outer")
            .with_inner(Exception::new("middle").with_inner(Exception::new("inner")));
        assert_eq!(chain.depth(), 3);
        assert_eq!(Exception::new("alone").depth(), 1);
    }

    fn nested_report(depth: usize) -> String {
        let mut exception = String::from(r#"{"Message": "level 0"}"#);
        for level in 1..depth {
            exception = format!(r#"{{"Message": "level {level}", "InnerException": {exception}}}"#);
        }
        format!(
            r#"{{"Graph": [[{{"Name": "A"}}, [{{"Name": "B"}}]]],
                "PerformedTransitions": [{{"From": {{"Name": "A"}}, "To": {{"Name": "B"}},
                "Error": {{"Case": "Transition", "Fields": ["A", "B", {exception}]}}}}]}}"#
        )
    }

    #[test]
    fn deep_exception_chains_parse() {
        let report = Report::from_json(&nested_report(1000)).unwrap();
        let exception = report.performed_transitions[0]
            .error
            .as_ref()
            .unwrap()
            .exception();
        assert_eq!(exception.depth(), 1000);
        assert_eq!(exception.message, "level 999");
        assert_eq!(exception.causes().last().unwrap().message, "level 0");

        let from_reader = Report::from_reader(nested_report(300).as_bytes()).unwrap();
        let failure = from_reader.performed_transitions[0].error.as_ref().unwrap();
        assert_eq!(failure.exception().depth(), 300);
    }

    #[test]
    fn very_long_chains_drop_without_recursion() {
        let mut exception = Exception::new("level 0");
        for level in 1..200_000 {
            exception = Exception::new(format!("level {level}")).with_inner(exception);
        }
        assert_eq!(exception.depth(), 200_000);
        drop(exception);
    }

    #[test]
    fn trailing_input_is_rejected() {
        let err = Report::from_json(r#"{"Graph": [], "PerformedTransitions": []} extra"#).unwrap_err();
        assert!(matches!(err, CoreError::Parse(_)));
    }

    #[test]
    fn describe_uses_arrow_form() {
        assert_eq!(Transition::new("Home", "Cart").describe(), "Home --> Cart");
    }

    #[test]
    fn report_round_trips_through_json() {
        let report = Report::from_json(SAMPLE).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(Report::from_json(&json).unwrap(), report);
    }
}
