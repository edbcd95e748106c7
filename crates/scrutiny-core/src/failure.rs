//! Failures recorded against performed transitions.
//!
//! The exploration engine serializes a failure as a tagged union with
//! positional fields: `{ "Case": "State"|"Transition", "Fields": [a, b, exc] }`.
//! [`Failure`] gives each case named fields; conversion to and from the wire
//! form goes through [`RawFailure`] via `#[serde(try_from, into)]`. The
//! exception is read straight from the stream rather than through a
//! [`Value`], so chains of any depth parse without an intermediate tree.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::report::Exception;

/// Where a failure happened during the exploration walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFailure", into = "RawFailure")]
pub enum Failure {
    /// A check failed while the walk was positioned at `state`.
    State { state: String, exception: Exception },
    /// A check failed while moving from `from` to `to`.
    Transition {
        from: String,
        to: String,
        exception: Exception,
    },
}

impl Failure {
    /// The root exception of this failure.
    pub fn exception(&self) -> &Exception {
        match self {
            Failure::State { exception, .. } | Failure::Transition { exception, .. } => exception,
        }
    }

    /// Human-readable heading naming the failure location.
    pub fn location(&self) -> String {
        match self {
            Failure::State { state, .. } => {
                format!("Error occurred in state: '{state}' with message:")
            }
            Failure::Transition { from, to, .. } => {
                format!("Error occurred in transition from: '{from}' to: '{to}' with message:")
            }
        }
    }

    /// The wire tag of this failure.
    pub fn case(&self) -> &'static str {
        match self {
            Failure::State { .. } => "State",
            Failure::Transition { .. } => "Transition",
        }
    }
}

/// Positional wire form of a [`Failure`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFailure {
    #[serde(rename = "Case")]
    pub case: String,
    /// Location names (the second is unused for `State`) and the exception.
    #[serde(rename = "Fields")]
    pub fields: (Value, Value, Exception),
}

fn string_field(field: Value, index: usize, case: &str) -> Result<String, CoreError> {
    match field {
        Value::String(name) => Ok(name),
        _ => Err(CoreError::InvalidFailure {
            reason: format!("{case} field {index} must be a string"),
        }),
    }
}

impl TryFrom<RawFailure> for Failure {
    type Error = CoreError;

    fn try_from(raw: RawFailure) -> Result<Self, Self::Error> {
        let (first, second, exception) = raw.fields;
        match raw.case.as_str() {
            // The second State field carries nothing the viewer uses.
            "State" => Ok(Failure::State {
                state: string_field(first, 0, "State")?,
                exception,
            }),
            "Transition" => Ok(Failure::Transition {
                from: string_field(first, 0, "Transition")?,
                to: string_field(second, 1, "Transition")?,
                exception,
            }),
            other => Err(CoreError::InvalidFailure {
                reason: format!("unknown case '{other}'"),
            }),
        }
    }
}

impl From<Failure> for RawFailure {
    fn from(failure: Failure) -> Self {
        let case = failure.case().to_string();
        let (first, second, exception) = match failure {
            Failure::State { state, exception } => (state, String::new(), exception),
            Failure::Transition {
                from,
                to,
                exception,
            } => (from, to, exception),
        };
        RawFailure {
            case,
            fields: (Value::String(first), Value::String(second), exception),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn state_failure_ignores_second_field() {
        let failure: Failure = serde_json::from_value(json!({
            "Case": "State",
            "Fields": ["Login", null, { "Message": "invariant broken" }]
        }))
        .unwrap();

        assert_eq!(
            failure,
            Failure::State {
                state: "Login".into(),
                exception: Exception::new("invariant broken"),
            }
        );
        assert_eq!(
            failure.location(),
            "Error occurred in state: 'Login' with message:"
        );
    }

    #[test]
    fn transition_failure_names_both_ends() {
        let failure: Failure = serde_json::from_value(json!({
            "Case": "Transition",
            "Fields": ["B", "C", { "Message": "boom" }]
        }))
        .unwrap();

        match &failure {
            Failure::Transition { from, to, .. } => {
                assert_eq!(from, "B");
                assert_eq!(to, "C");
            }
            other => panic!("expected transition failure, got {other:?}"),
        }
        assert_eq!(failure.exception().message, "boom");
        assert_eq!(
            failure.location(),
            "Error occurred in transition from: 'B' to: 'C' with message:"
        );
    }

    #[test]
    fn unknown_case_is_rejected() {
        let result: Result<Failure, _> = serde_json::from_value(json!({
            "Case": "Timeout",
            "Fields": ["A", "B", { "Message": "late" }]
        }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown case 'Timeout'"), "{err}");
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        let short: Result<Failure, _> = serde_json::from_value(json!({
            "Case": "Transition",
            "Fields": ["A", { "Message": "short" }]
        }));
        assert!(short.is_err());

        let long: Result<Failure, _> = serde_json::from_value(json!({
            "Case": "Transition",
            "Fields": ["A", "B", { "Message": "long" }, "extra"]
        }));
        assert!(long.is_err());
    }

    #[test]
    fn transition_target_must_be_a_string() {
        let result: Result<Failure, _> = serde_json::from_value(json!({
            "Case": "Transition",
            "Fields": ["A", null, { "Message": "x" }]
        }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Transition field 1 must be a string"), "{err}");
    }

    #[test]
    fn non_string_state_name_is_rejected() {
        let result: Result<Failure, _> = serde_json::from_value(json!({
            "Case": "State",
            "Fields": [42, "", { "Message": "x" }]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn serializes_back_to_positional_form() {
        let failure = Failure::Transition {
            from: "A".into(),
            to: "B".into(),
            exception: Exception::new("boom"),
        };
        let value = serde_json::to_value(&failure).unwrap();
        assert_eq!(value["Case"], "Transition");
        assert_eq!(value["Fields"][0], "A");
        assert_eq!(value["Fields"][1], "B");
        assert_eq!(value["Fields"][2]["Message"], "boom");
    }
}
