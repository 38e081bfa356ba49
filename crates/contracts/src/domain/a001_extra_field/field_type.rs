use serde::{Deserialize, Serialize};
use std::fmt;

/// Value type of an extra field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraFieldType {
    #[default]
    Text,
    Integer,
    IntegerRange,
    Float,
    FloatRange,
    #[serde(rename = "datetime")]
    DateTime,
    Boolean,
    Choice,
}

impl ExtraFieldType {
    pub fn code(&self) -> &'static str {
        match self {
            ExtraFieldType::Text => "text",
            ExtraFieldType::Integer => "integer",
            ExtraFieldType::IntegerRange => "integer_range",
            ExtraFieldType::Float => "float",
            ExtraFieldType::FloatRange => "float_range",
            ExtraFieldType::DateTime => "datetime",
            ExtraFieldType::Boolean => "boolean",
            ExtraFieldType::Choice => "choice",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ExtraFieldType::Text => "Text",
            ExtraFieldType::Integer => "Integer",
            ExtraFieldType::IntegerRange => "Integer range",
            ExtraFieldType::Float => "Float",
            ExtraFieldType::FloatRange => "Float range",
            ExtraFieldType::DateTime => "Date and time",
            ExtraFieldType::Boolean => "Boolean",
            ExtraFieldType::Choice => "Choice",
        }
    }

    pub fn all() -> Vec<ExtraFieldType> {
        vec![
            ExtraFieldType::Text,
            ExtraFieldType::Integer,
            ExtraFieldType::IntegerRange,
            ExtraFieldType::Float,
            ExtraFieldType::FloatRange,
            ExtraFieldType::DateTime,
            ExtraFieldType::Boolean,
            ExtraFieldType::Choice,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|t| t.code() == code)
    }

    /// Numeric types are the only ones that carry a unit
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ExtraFieldType::Integer
                | ExtraFieldType::IntegerRange
                | ExtraFieldType::Float
                | ExtraFieldType::FloatRange
        )
    }
}

impl fmt::Display for ExtraFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_matches_code() {
        for field_type in ExtraFieldType::all() {
            let json = serde_json::to_string(&field_type).unwrap();
            assert_eq!(json, format!("\"{}\"", field_type.code()));
            let back: ExtraFieldType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, field_type);
        }
    }

    #[test]
    fn test_numeric_types() {
        assert!(ExtraFieldType::FloatRange.is_numeric());
        assert!(ExtraFieldType::Integer.is_numeric());
        assert!(!ExtraFieldType::Text.is_numeric());
        assert!(!ExtraFieldType::Choice.is_numeric());
        assert!(!ExtraFieldType::DateTime.is_numeric());
    }
}
