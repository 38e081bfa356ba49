//! Typed default values and their canonical JSON encoding.
//!
//! Default values travel as JSON-encoded strings. `FieldValue` is the typed
//! form: `encode` produces the canonical string and `decode` parses it back
//! against the field type.

use super::field_type::ExtraFieldType;
use chrono::NaiveDateTime;
use serde_json::{json, Value};
use thiserror::Error;

/// Canonical datetime format of stored values
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(NaiveDateTime),
    /// Ordered `(min, max)`
    IntegerRange(i64, i64),
    /// Ordered `(min, max)`
    FloatRange(f64, f64),
    Choice(String),
    MultiChoice(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldValueError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
    #[error("expected {expected} for a {field_type} field")]
    WrongShape {
        field_type: ExtraFieldType,
        expected: &'static str,
    },
    #[error("invalid date/time '{0}', expected YYYY-MM-DD hh:mm:ss")]
    InvalidDateTime(String),
    #[error("range minimum {min} is greater than maximum {max}")]
    UnorderedRange { min: String, max: String },
    #[error("'{0}' is not one of the choices")]
    NotAChoice(String),
}

impl FieldValue {
    /// Integer range with bounds sorted ascending
    pub fn integer_range(a: i64, b: i64) -> Self {
        FieldValue::IntegerRange(a.min(b), a.max(b))
    }

    /// Float range with bounds sorted ascending
    pub fn float_range(a: f64, b: f64) -> Self {
        if a <= b {
            FieldValue::FloatRange(a, b)
        } else {
            FieldValue::FloatRange(b, a)
        }
    }

    /// Field type this value belongs to
    pub fn field_type(&self) -> ExtraFieldType {
        match self {
            FieldValue::Text(_) => ExtraFieldType::Text,
            FieldValue::Integer(_) => ExtraFieldType::Integer,
            FieldValue::Float(_) => ExtraFieldType::Float,
            FieldValue::Boolean(_) => ExtraFieldType::Boolean,
            FieldValue::DateTime(_) => ExtraFieldType::DateTime,
            FieldValue::IntegerRange(..) => ExtraFieldType::IntegerRange,
            FieldValue::FloatRange(..) => ExtraFieldType::FloatRange,
            FieldValue::Choice(_) | FieldValue::MultiChoice(_) => ExtraFieldType::Choice,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) | FieldValue::Choice(s) => json!(s),
            FieldValue::Integer(i) => json!(i),
            FieldValue::Float(f) => json!(f),
            FieldValue::Boolean(b) => json!(b),
            FieldValue::DateTime(dt) => json!(dt.format(DATETIME_FORMAT).to_string()),
            FieldValue::IntegerRange(min, max) => json!([min, max]),
            FieldValue::FloatRange(min, max) => json!([min, max]),
            FieldValue::MultiChoice(values) => json!(values),
        }
    }

    /// Canonical JSON string stored as `default_value`
    pub fn encode(&self) -> String {
        self.to_json().to_string()
    }

    /// Parse a stored `default_value`. Empty input and JSON `null` mean "no value".
    pub fn decode(
        field_type: ExtraFieldType,
        multi_choice: bool,
        raw: &str,
    ) -> Result<Option<Self>, FieldValueError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        let json: Value =
            serde_json::from_str(raw).map_err(|e| FieldValueError::InvalidJson(e.to_string()))?;
        if json.is_null() {
            return Ok(None);
        }
        Self::from_json(field_type, multi_choice, &json).map(Some)
    }

    pub fn from_json(
        field_type: ExtraFieldType,
        multi_choice: bool,
        json: &Value,
    ) -> Result<Self, FieldValueError> {
        let shape = |expected: &'static str| FieldValueError::WrongShape {
            field_type,
            expected,
        };

        match field_type {
            ExtraFieldType::Text => json
                .as_str()
                .map(|s| FieldValue::Text(s.to_string()))
                .ok_or_else(|| shape("a string")),
            ExtraFieldType::Integer => json
                .as_i64()
                .map(FieldValue::Integer)
                .ok_or_else(|| shape("an integer")),
            ExtraFieldType::Float => json
                .as_f64()
                .map(FieldValue::Float)
                .ok_or_else(|| shape("a number")),
            ExtraFieldType::Boolean => json
                .as_bool()
                .map(FieldValue::Boolean)
                .ok_or_else(|| shape("a boolean")),
            ExtraFieldType::DateTime => {
                let s = json.as_str().ok_or_else(|| shape("a date/time string"))?;
                NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
                    .map(FieldValue::DateTime)
                    .map_err(|_| FieldValueError::InvalidDateTime(s.to_string()))
            }
            ExtraFieldType::IntegerRange => {
                let pair = range_pair(json).ok_or_else(|| shape("a [min, max] integer array"))?;
                let (min, max) = match (pair[0].as_i64(), pair[1].as_i64()) {
                    (Some(min), Some(max)) => (min, max),
                    _ => return Err(shape("a [min, max] integer array")),
                };
                if min > max {
                    return Err(FieldValueError::UnorderedRange {
                        min: min.to_string(),
                        max: max.to_string(),
                    });
                }
                Ok(FieldValue::IntegerRange(min, max))
            }
            ExtraFieldType::FloatRange => {
                let pair = range_pair(json).ok_or_else(|| shape("a [min, max] number array"))?;
                let (min, max) = match (pair[0].as_f64(), pair[1].as_f64()) {
                    (Some(min), Some(max)) => (min, max),
                    _ => return Err(shape("a [min, max] number array")),
                };
                if min > max {
                    return Err(FieldValueError::UnorderedRange {
                        min: min.to_string(),
                        max: max.to_string(),
                    });
                }
                Ok(FieldValue::FloatRange(min, max))
            }
            ExtraFieldType::Choice if multi_choice => {
                let items = json.as_array().ok_or_else(|| shape("an array of strings"))?;
                items
                    .iter()
                    .map(|item| {
                        item.as_str()
                            .map(str::to_string)
                            .ok_or_else(|| shape("an array of strings"))
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(FieldValue::MultiChoice)
            }
            ExtraFieldType::Choice => json
                .as_str()
                .map(|s| FieldValue::Choice(s.to_string()))
                .ok_or_else(|| shape("a string")),
        }
    }

    /// Choice values referenced by this value (empty for non-choice values)
    pub fn choice_values(&self) -> Vec<&str> {
        match self {
            FieldValue::Choice(s) => vec![s.as_str()],
            FieldValue::MultiChoice(values) => values.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Every referenced choice must be present in `choices`
    pub fn check_choices(&self, choices: &[String]) -> Result<(), FieldValueError> {
        match self
            .choice_values()
            .into_iter()
            .find(|value| !choices.iter().any(|c| c == value))
        {
            Some(missing) => Err(FieldValueError::NotAChoice(missing.to_string())),
            None => Ok(()),
        }
    }
}

fn range_pair(json: &Value) -> Option<&Vec<Value>> {
    json.as_array().filter(|items| items.len() == 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_encode_canonical_shapes() {
        assert_eq!(FieldValue::Text("PLA".into()).encode(), "\"PLA\"");
        assert_eq!(FieldValue::Text(String::new()).encode(), "\"\"");
        assert_eq!(FieldValue::Integer(42).encode(), "42");
        assert_eq!(FieldValue::Float(1.75).encode(), "1.75");
        assert_eq!(FieldValue::Boolean(false).encode(), "false");
        assert_eq!(FieldValue::integer_range(5, 1).encode(), "[1,5]");
        assert_eq!(FieldValue::float_range(2.9, 1.5).encode(), "[1.5,2.9]");
        assert_eq!(
            FieldValue::MultiChoice(vec!["a".into(), "b".into()]).encode(),
            "[\"a\",\"b\"]"
        );

        let dt = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(14, 2, 26)
            .unwrap();
        assert_eq!(FieldValue::DateTime(dt).encode(), "\"2024-03-15 14:02:26\"");
    }

    #[test]
    fn test_decode_reads_back_encoded_values() {
        let dt = NaiveDate::from_ymd_opt(2023, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();
        let values = [
            (FieldValue::Text("x".into()), false),
            (FieldValue::Integer(-7), false),
            (FieldValue::Float(0.5), false),
            (FieldValue::Boolean(true), false),
            (FieldValue::DateTime(dt), false),
            (FieldValue::integer_range(180, 210), false),
            (FieldValue::float_range(1.5, 2.9), false),
            (FieldValue::Choice("red".into()), false),
            (FieldValue::MultiChoice(vec!["red".into()]), true),
        ];
        for (value, multi) in values {
            let decoded = FieldValue::decode(value.field_type(), multi, &value.encode()).unwrap();
            assert_eq!(decoded, Some(value));
        }
    }

    #[test]
    fn test_decode_empty_means_unset() {
        assert_eq!(FieldValue::decode(ExtraFieldType::Integer, false, ""), Ok(None));
        assert_eq!(FieldValue::decode(ExtraFieldType::Integer, false, "  "), Ok(None));
        assert_eq!(FieldValue::decode(ExtraFieldType::Text, false, "null"), Ok(None));
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        assert!(matches!(
            FieldValue::decode(ExtraFieldType::Integer, false, "\"12\""),
            Err(FieldValueError::WrongShape { .. })
        ));
        assert!(matches!(
            FieldValue::decode(ExtraFieldType::Integer, false, "1.5"),
            Err(FieldValueError::WrongShape { .. })
        ));
        assert!(matches!(
            FieldValue::decode(ExtraFieldType::IntegerRange, false, "[1,2,3]"),
            Err(FieldValueError::WrongShape { .. })
        ));
        assert!(matches!(
            FieldValue::decode(ExtraFieldType::Choice, true, "\"red\""),
            Err(FieldValueError::WrongShape { .. })
        ));
        assert!(matches!(
            FieldValue::decode(ExtraFieldType::Text, false, "{not json"),
            Err(FieldValueError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_decode_rejects_unordered_range() {
        assert_eq!(
            FieldValue::decode(ExtraFieldType::IntegerRange, false, "[210,180]"),
            Err(FieldValueError::UnorderedRange {
                min: "210".into(),
                max: "180".into()
            })
        );
    }

    #[test]
    fn test_decode_rejects_bad_datetime() {
        assert!(matches!(
            FieldValue::decode(ExtraFieldType::DateTime, false, "\"2024-03-15T14:02\""),
            Err(FieldValueError::InvalidDateTime(_))
        ));
    }

    #[test]
    fn test_check_choices() {
        let choices = vec!["red".to_string(), "blue".to_string()];
        assert!(FieldValue::Choice("red".into()).check_choices(&choices).is_ok());
        assert_eq!(
            FieldValue::MultiChoice(vec!["red".into(), "green".into()]).check_choices(&choices),
            Err(FieldValueError::NotAChoice("green".into()))
        );
        assert!(FieldValue::Integer(1).check_choices(&[]).is_ok());
    }
}
