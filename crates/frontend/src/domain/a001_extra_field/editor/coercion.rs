//! Conversion between the draft shown on screen and the stored field.

use super::draft::{Draft, DraftValue};
use crate::shared::text_format::parse_user_number;
use contracts::domain::a001_extra_field::{
    ExtraField, ExtraFieldParameters, ExtraFieldType, FieldValue,
};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static INTEGER_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(-?\d+)\s*-\s*(-?\d+)\s*$").expect("integer range pattern"));

static FLOAT_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(-?\d+(?:[.,]\d+)?)\s*-\s*(-?\d+(?:[.,]\d+)?)\s*$")
        .expect("float range pattern")
});

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoercionError {
    #[error("the default value does not fit a {0} field")]
    ShapeMismatch(ExtraFieldType),
    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),
    #[error("order '{0}' is not a whole number")]
    InvalidOrder(String),
}

pub fn parse_integer(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

/// Accepts `,` as decimal separator; spaces are ignored
pub fn parse_float(text: &str) -> Option<f64> {
    parse_user_number(text)
}

/// `"A - B"` → `(min, max)`
pub fn parse_integer_range(text: &str) -> Option<(i64, i64)> {
    let caps = INTEGER_RANGE.captures(text)?;
    let a: i64 = caps[1].parse().ok()?;
    let b: i64 = caps[2].parse().ok()?;
    Some((a.min(b), a.max(b)))
}

/// `"A - B"` with `.` or `,` decimals → `(min, max)`
pub fn parse_float_range(text: &str) -> Option<(f64, f64)> {
    let caps = FLOAT_RANGE.captures(text)?;
    let a = parse_float(&caps[1])?;
    let b = parse_float(&caps[2])?;
    Some(if a <= b { (a, b) } else { (b, a) })
}

/// Stored value → on-screen shape
pub fn to_screen(value: &FieldValue) -> DraftValue {
    match value {
        FieldValue::Text(s) => DraftValue::Text(s.clone()),
        FieldValue::Integer(i) => DraftValue::Number(i.to_string()),
        FieldValue::Float(f) => DraftValue::Number(f.to_string()),
        FieldValue::Boolean(b) => DraftValue::Checkbox(*b),
        FieldValue::DateTime(dt) => DraftValue::DateTime(*dt),
        FieldValue::IntegerRange(min, max) => DraftValue::Range(format!("{} - {}", min, max)),
        FieldValue::FloatRange(min, max) => DraftValue::Range(format!("{} - {}", min, max)),
        FieldValue::Choice(s) => DraftValue::Choice(s.clone()),
        FieldValue::MultiChoice(values) => DraftValue::Choices(values.clone()),
    }
}

/// Decode a field's stored default value for editing. Absent, empty or
/// undecodable values give an empty draft value.
pub fn decode_default(field: &ExtraField) -> DraftValue {
    match field.default_value() {
        Ok(Some(value)) => to_screen(&value),
        Ok(None) => DraftValue::Empty,
        Err(e) => {
            log::warn!(
                "Stored default of {}.{} is not a valid {}: {}",
                field.entity_type,
                field.key,
                field.field_type,
                e
            );
            DraftValue::Empty
        }
    }
}

/// On-screen default → typed value. A range that does not match the
/// `"A - B"` pattern leaves the default unset.
pub fn encode_default(draft: &Draft) -> Result<Option<FieldValue>, CoercionError> {
    let field_type = draft.field_type;
    let value = match (field_type, &draft.default_value) {
        (_, DraftValue::Empty) => None,
        (ExtraFieldType::Text, DraftValue::Text(s)) => Some(FieldValue::Text(s.clone())),
        (ExtraFieldType::Integer, DraftValue::Number(s)) if s.trim().is_empty() => None,
        (ExtraFieldType::Integer, DraftValue::Number(s)) => Some(FieldValue::Integer(
            parse_integer(s).ok_or_else(|| CoercionError::InvalidNumber(s.clone()))?,
        )),
        (ExtraFieldType::Float, DraftValue::Number(s)) if s.trim().is_empty() => None,
        (ExtraFieldType::Float, DraftValue::Number(s)) => Some(FieldValue::Float(
            parse_float(s).ok_or_else(|| CoercionError::InvalidNumber(s.clone()))?,
        )),
        (ExtraFieldType::IntegerRange, DraftValue::Range(s)) => {
            parse_integer_range(s).map(|(a, b)| FieldValue::integer_range(a, b))
        }
        (ExtraFieldType::FloatRange, DraftValue::Range(s)) => {
            parse_float_range(s).map(|(a, b)| FieldValue::float_range(a, b))
        }
        (ExtraFieldType::DateTime, DraftValue::DateTime(dt)) => Some(FieldValue::DateTime(*dt)),
        (ExtraFieldType::Boolean, DraftValue::Checkbox(b)) => Some(FieldValue::Boolean(*b)),
        (ExtraFieldType::Choice, DraftValue::Choice(s)) if !draft.multi_choice => {
            if s.is_empty() {
                None
            } else {
                Some(FieldValue::Choice(s.clone()))
            }
        }
        (ExtraFieldType::Choice, DraftValue::Choices(values)) if draft.multi_choice => {
            Some(FieldValue::MultiChoice(values.clone()))
        }
        _ => return Err(CoercionError::ShapeMismatch(field_type)),
    };
    Ok(value)
}

/// Validated draft → upsert payload
pub fn encode_draft(draft: &Draft) -> Result<ExtraFieldParameters, CoercionError> {
    let order = if draft.order.trim().is_empty() {
        0
    } else {
        draft
            .order
            .trim()
            .parse()
            .map_err(|_| CoercionError::InvalidOrder(draft.order.clone()))?
    };

    let unit = draft.unit.trim();
    let unit = if draft.field_type.is_numeric() && !unit.is_empty() {
        Some(unit.to_string())
    } else {
        None
    };

    let is_choice = draft.field_type == ExtraFieldType::Choice;

    Ok(ExtraFieldParameters {
        name: draft.name.trim().to_string(),
        order,
        unit,
        field_type: draft.field_type,
        default_value: encode_default(draft)?.map(|v| v.encode()),
        choices: is_choice.then(|| draft.choices.clone()),
        multi_choice: is_choice.then_some(draft.multi_choice),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draft(field_type: ExtraFieldType, value: DraftValue) -> Draft {
        let mut d = Draft::new_field();
        d.key = "test".into();
        d.name = "Test".into();
        d.field_type = field_type;
        d.default_value = value;
        d
    }

    fn encoded(d: &Draft) -> Option<String> {
        encode_draft(d).unwrap().default_value
    }

    #[test]
    fn test_integer_range_is_ordered() {
        let d = draft(ExtraFieldType::IntegerRange, DraftValue::Range("210 - 180".into()));
        assert_eq!(encoded(&d).as_deref(), Some("[180,210]"));

        let d = draft(ExtraFieldType::IntegerRange, DraftValue::Range("5-1".into()));
        assert_eq!(encoded(&d).as_deref(), Some("[1,5]"));
    }

    #[test]
    fn test_float_accepts_grouped_input() {
        assert_eq!(parse_float("1 234,5"), Some(1234.5));
        assert_eq!(parse_float(" 0.25 "), Some(0.25));
        assert_eq!(parse_float("1.2.3"), None);
    }

    #[test]
    fn test_float_range_accepts_comma_decimals() {
        let d = draft(ExtraFieldType::FloatRange, DraftValue::Range("1,5 - 2,90".into()));
        assert_eq!(encoded(&d).as_deref(), Some("[1.5,2.9]"));
    }

    #[test]
    fn test_negative_range_bounds() {
        assert_eq!(parse_integer_range("-5 - -10"), Some((-10, -5)));
        assert_eq!(parse_float_range("-1.5--0.5"), Some((-1.5, -0.5)));
    }

    #[test]
    fn test_unmatched_range_leaves_default_unset() {
        let d = draft(ExtraFieldType::IntegerRange, DraftValue::Range("about 200".into()));
        assert_eq!(encoded(&d), None);
        let d = draft(ExtraFieldType::IntegerRange, DraftValue::Range("1.5 - 2".into()));
        assert_eq!(encoded(&d), None);
    }

    #[test]
    fn test_empty_text_is_encoded() {
        let d = draft(ExtraFieldType::Text, DraftValue::Text(String::new()));
        assert_eq!(encoded(&d).as_deref(), Some("\"\""));
    }

    #[test]
    fn test_unchecked_boolean_is_false() {
        let d = draft(ExtraFieldType::Boolean, DraftValue::Checkbox(false));
        assert_eq!(encoded(&d).as_deref(), Some("false"));
    }

    #[test]
    fn test_datetime_format() {
        let dt = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let d = draft(ExtraFieldType::DateTime, DraftValue::DateTime(dt));
        assert_eq!(encoded(&d).as_deref(), Some("\"2024-01-02 03:04:05\""));
    }

    #[test]
    fn test_shape_mismatch_is_an_error() {
        let d = draft(ExtraFieldType::Integer, DraftValue::Checkbox(true));
        assert_eq!(
            encode_draft(&d),
            Err(CoercionError::ShapeMismatch(ExtraFieldType::Integer))
        );

        let mut d = draft(ExtraFieldType::Choice, DraftValue::Choice("a".into()));
        d.multi_choice = true;
        assert!(encode_draft(&d).is_err());
    }

    #[test]
    fn test_unit_and_choice_normalization() {
        let mut d = draft(ExtraFieldType::Float, DraftValue::Empty);
        d.unit = String::new();
        let params = encode_draft(&d).unwrap();
        assert_eq!(params.unit, None);
        assert_eq!(params.choices, None);
        assert_eq!(params.multi_choice, None);

        d.unit = " g ".into();
        assert_eq!(encode_draft(&d).unwrap().unit.as_deref(), Some("g"));

        let mut d = draft(ExtraFieldType::Text, DraftValue::Empty);
        d.unit = "mm".into();
        assert_eq!(encode_draft(&d).unwrap().unit, None);

        let mut d = draft(ExtraFieldType::Choice, DraftValue::Empty);
        d.choices = vec!["a".into()];
        let params = encode_draft(&d).unwrap();
        assert_eq!(params.multi_choice, Some(false));
        assert_eq!(params.choices, Some(vec!["a".to_string()]));
    }

    #[test]
    fn test_invalid_order() {
        let mut d = draft(ExtraFieldType::Text, DraftValue::Empty);
        d.order = "first".into();
        assert!(matches!(encode_draft(&d), Err(CoercionError::InvalidOrder(_))));
    }

    #[test]
    fn test_screen_values_survive_a_save() {
        let dt = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let cases = [
            (ExtraFieldType::Text, false, DraftValue::Text("PLA+".into())),
            (ExtraFieldType::Integer, false, DraftValue::Number("-3".into())),
            (ExtraFieldType::Float, false, DraftValue::Number("1.75".into())),
            (ExtraFieldType::Boolean, false, DraftValue::Checkbox(true)),
            (ExtraFieldType::DateTime, false, DraftValue::DateTime(dt)),
            (ExtraFieldType::IntegerRange, false, DraftValue::Range("180 - 210".into())),
            (ExtraFieldType::FloatRange, false, DraftValue::Range("1.5 - 2.9".into())),
            (ExtraFieldType::Choice, false, DraftValue::Choice("a".into())),
            (ExtraFieldType::Choice, true, DraftValue::Choices(vec!["a".into(), "b".into()])),
        ];

        for (field_type, multi_choice, value) in cases {
            let mut d = draft(field_type, value.clone());
            d.multi_choice = multi_choice;
            let stored = encode_default(&d).unwrap().unwrap();
            let raw = stored.encode();
            let decoded = FieldValue::decode(field_type, multi_choice, &raw).unwrap().unwrap();
            assert_eq!(to_screen(&decoded), value, "{} did not survive", field_type);
        }
    }

    #[test]
    fn test_range_input_is_normalized() {
        let d = draft(ExtraFieldType::FloatRange, DraftValue::Range("2,90-1,5".into()));
        let stored = encode_default(&d).unwrap().unwrap();
        assert_eq!(to_screen(&stored), DraftValue::Range("1.5 - 2.9".into()));
    }
}
