//! LLM lead judgment record
//!
//! A `LeadScore` is only ever built through [`LeadScore::from_object`], which
//! checks the two required fields for presence and type, or through
//! [`LeadScore::fallback`] when analysis gives up.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Score substituted when every analysis attempt failed
pub const FALLBACK_SCORE: i64 = 50;

/// Justification used when the model never produced a JSON object
pub const NO_JSON_JUSTIFICATION: &str = "Unable to analyze due to technical issues.";

/// Justification used when the generation call or validation errored
pub const ANALYSIS_ERROR_JUSTIFICATION: &str = "Error during analysis.";

/// LLM judgment of a lead's conversion likelihood
///
/// `score` is nominally 0-100 but the range is not enforced here; the
/// composite scorer bounds the final result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadScore {
    pub score: i64,
    pub justification: String,
}

/// Which class of failure produced a fallback record
///
/// The two classes carry distinct justifications so callers can tell a
/// model that answered in prose apart from a call that errored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackKind {
    /// Model replied, but no JSON object could be extracted
    NoJsonFound,
    /// Transport failure, empty completion, or schema violation
    AnalysisError,
}

/// Parsed object does not have the `{score, justification}` shape
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' must be {expected}, got {found}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("field 'justification' must not be empty")]
    EmptyJustification,
}

impl LeadScore {
    pub fn new(score: i64, justification: impl Into<String>) -> Self {
        Self {
            score,
            justification: justification.into(),
        }
    }

    /// Fixed record returned when analysis is abandoned
    pub fn fallback(kind: FallbackKind) -> Self {
        let justification = match kind {
            FallbackKind::NoJsonFound => NO_JSON_JUSTIFICATION,
            FallbackKind::AnalysisError => ANALYSIS_ERROR_JUSTIFICATION,
        };
        Self::new(FALLBACK_SCORE, justification)
    }

    /// Validate an extracted JSON object into a `LeadScore`
    ///
    /// `score` accepts a JSON integer, an integral float (`70.0`), or a string
    /// holding an integer (`"70"`). `justification` must be a non-blank
    /// string. Unrecognized keys are ignored.
    pub fn from_object(object: &Map<String, Value>) -> Result<Self, SchemaViolation> {
        let score = object
            .get("score")
            .ok_or(SchemaViolation::MissingField("score"))
            .and_then(coerce_score)?;

        let justification = match object.get("justification") {
            None => return Err(SchemaViolation::MissingField("justification")),
            Some(Value::String(text)) => text,
            Some(other) => {
                return Err(SchemaViolation::WrongType {
                    field: "justification",
                    expected: "a string",
                    found: json_type_name(other).to_string(),
                })
            }
        };

        if justification.trim().is_empty() {
            return Err(SchemaViolation::EmptyJustification);
        }

        Ok(Self::new(score, justification.clone()))
    }
}

fn coerce_score(value: &Value) -> Result<i64, SchemaViolation> {
    let wrong_type = || SchemaViolation::WrongType {
        field: "score",
        expected: "an integer",
        found: value.to_string(),
    };

    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            match number.as_f64() {
                Some(float) if float.fract() == 0.0 && float.abs() < i64::MAX as f64 => {
                    Ok(float as i64)
                }
                _ => Err(wrong_type()),
            }
        }
        Value::String(text) => text.trim().parse::<i64>().map_err(|_| wrong_type()),
        _ => Err(wrong_type()),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test fixture must be an object"),
        }
    }

    #[test]
    fn test_valid_object() {
        let score =
            LeadScore::from_object(&object(json!({"score": 70, "justification": "Good fit"})))
                .unwrap();
        assert_eq!(score, LeadScore::new(70, "Good fit"));
    }

    #[test]
    fn test_extra_keys_ignored() {
        let score = LeadScore::from_object(&object(json!({
            "score": 12,
            "justification": "Cold lead",
            "confidence": "low"
        })))
        .unwrap();
        assert_eq!(score.score, 12);
    }

    #[test]
    fn test_lax_integer_coercion() {
        let from_float =
            LeadScore::from_object(&object(json!({"score": 85.0, "justification": "x"}))).unwrap();
        assert_eq!(from_float.score, 85);

        let from_string =
            LeadScore::from_object(&object(json!({"score": " 40 ", "justification": "x"})))
                .unwrap();
        assert_eq!(from_string.score, 40);
    }

    #[test]
    fn test_out_of_range_score_is_not_rejected() {
        let score =
            LeadScore::from_object(&object(json!({"score": 140, "justification": "x"}))).unwrap();
        assert_eq!(score.score, 140);
    }

    #[test]
    fn test_fractional_score_rejected() {
        let err = LeadScore::from_object(&object(json!({"score": 72.5, "justification": "x"})))
            .unwrap_err();
        assert!(matches!(err, SchemaViolation::WrongType { field: "score", .. }));
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            LeadScore::from_object(&object(json!({"justification": "x"}))).unwrap_err(),
            SchemaViolation::MissingField("score")
        );
        assert_eq!(
            LeadScore::from_object(&object(json!({"score": 10}))).unwrap_err(),
            SchemaViolation::MissingField("justification")
        );
    }

    #[test]
    fn test_wrong_justification_type() {
        let err = LeadScore::from_object(&object(json!({"score": 10, "justification": ["a"]})))
            .unwrap_err();
        assert!(matches!(
            err,
            SchemaViolation::WrongType {
                field: "justification",
                ..
            }
        ));
    }

    #[test]
    fn test_blank_justification_rejected() {
        assert_eq!(
            LeadScore::from_object(&object(json!({"score": 10, "justification": "  "})))
                .unwrap_err(),
            SchemaViolation::EmptyJustification
        );
    }

    #[test]
    fn test_fallback_records_are_distinct() {
        let no_json = LeadScore::fallback(FallbackKind::NoJsonFound);
        let errored = LeadScore::fallback(FallbackKind::AnalysisError);

        assert_eq!(no_json.score, 50);
        assert_eq!(errored.score, 50);
        assert_eq!(no_json.justification, "Unable to analyze due to technical issues.");
        assert_eq!(errored.justification, "Error during analysis.");
    }
}
