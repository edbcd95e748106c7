//! Consistency checks between a report's performed walk and its graph.
//!
//! The highlight pass looks up every performed transition's endpoints and
//! edge, and every failure's node or edge, in the drawing built from the same
//! report. These checks run once at load so that no lookup can miss later.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::failure::Failure;
use crate::graph::GraphModel;
use crate::report::Report;

/// Returns the first inconsistency found, if any.
pub fn validate_report(report: &Report, model: &GraphModel) -> Result<(), CoreError> {
    match collect_violations(report, model).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Returns every inconsistency, in report order.
pub fn collect_violations(report: &Report, model: &GraphModel) -> Vec<CoreError> {
    let mut errors = Vec::new();

    let mut sources = HashSet::new();
    for (state, _) in &report.graph {
        if !sources.insert(state.name.as_str()) {
            errors.push(CoreError::DuplicateSource {
                state: state.name.clone(),
            });
        }
    }

    for (index, transition) in report.performed_transitions.iter().enumerate() {
        let mut endpoints_known = true;
        for state in [&transition.from.name, &transition.to.name] {
            if !model.contains_node(state) {
                endpoints_known = false;
                errors.push(CoreError::UnknownState {
                    index,
                    state: state.clone(),
                });
            }
        }
        if endpoints_known && !model.contains_edge(&transition.from.name, &transition.to.name) {
            errors.push(CoreError::UnknownEdge {
                index,
                from: transition.from.name.clone(),
                to: transition.to.name.clone(),
            });
        }

        match &transition.error {
            None => {}
            Some(Failure::State { state, .. }) => {
                if !model.contains_node(state) {
                    errors.push(CoreError::UnknownState {
                        index,
                        state: state.clone(),
                    });
                }
            }
            Some(Failure::Transition { from, to, .. }) => {
                if !model.contains_edge(from, to) {
                    errors.push(CoreError::UnknownEdge {
                        index,
                        from: from.clone(),
                        to: to.clone(),
                    });
                }
            }
        }
    }

    if !errors.is_empty() {
        tracing::warn!(violations = errors.len(), "report is inconsistent with its graph");
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Exception, PageState, Transition};

    fn report(graph: &[(&str, &[&str])], walk: Vec<Transition>) -> Report {
        Report {
            graph: graph
                .iter()
                .map(|(s, succ)| {
                    (
                        PageState::new(*s),
                        succ.iter().map(|n| PageState::new(*n)).collect(),
                    )
                })
                .collect(),
            performed_transitions: walk,
        }
    }

    fn check(report: &Report) -> Result<(), CoreError> {
        validate_report(report, &GraphModel::build(&report.graph))
    }

    #[test]
    fn consistent_report_passes() {
        let r = report(
            &[("A", &["B"]), ("B", &["C"])],
            vec![
                Transition::new("A", "B"),
                Transition::new("B", "C").failed(Failure::Transition {
                    from: "B".into(),
                    to: "C".into(),
                    exception: Exception::new("boom"),
                }),
            ],
        );
        assert!(check(&r).is_ok());
    }

    #[test]
    fn duplicate_source_is_rejected() {
        let r = report(&[("A", &["B"]), ("A", &["C"])], vec![]);
        assert!(matches!(
            check(&r),
            Err(CoreError::DuplicateSource { state }) if state == "A"
        ));
    }

    #[test]
    fn unknown_state_is_rejected() {
        let r = report(&[("A", &["B"])], vec![Transition::new("A", "Q")]);
        assert!(matches!(
            check(&r),
            Err(CoreError::UnknownState { index: 0, state }) if state == "Q"
        ));
    }

    #[test]
    fn undiscovered_edge_is_rejected() {
        let r = report(&[("A", &["B"]), ("B", &[])], vec![Transition::new("B", "A")]);
        assert!(matches!(check(&r), Err(CoreError::UnknownEdge { index: 0, .. })));
    }

    #[test]
    fn failure_targets_are_checked() {
        let r = report(
            &[("A", &["B"])],
            vec![Transition::new("A", "B").failed(Failure::State {
                state: "Missing".into(),
                exception: Exception::new("nope"),
            })],
        );
        assert!(matches!(
            check(&r),
            Err(CoreError::UnknownState { state, .. }) if state == "Missing"
        ));
    }

    #[test]
    fn collects_every_violation() {
        let r = report(
            &[("A", &["B"]), ("A", &[])],
            vec![Transition::new("A", "X"), Transition::new("B", "A")],
        );
        let violations = collect_violations(&r, &GraphModel::build(&r.graph));
        assert_eq!(violations.len(), 3);
    }
}
