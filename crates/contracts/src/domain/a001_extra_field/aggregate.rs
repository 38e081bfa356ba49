use super::entity_type::EntityType;
use super::field_type::ExtraFieldType;
use super::validation::{validate_key, validate_name, UNIT_MAX_LENGTH};
use super::value::{FieldValue, FieldValueError};
use serde::{Deserialize, Serialize};

/// Key of a field row that has not been saved yet
pub const NEW_FIELD_KEY: &str = "new_field";

/// A named, typed configuration entry attached to an entity category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraField {
    pub key: String,
    pub entity_type: EntityType,
    pub name: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub field_type: ExtraFieldType,
    /// JSON-encoded default value, see [`FieldValue`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_choice: Option<bool>,
}

/// Body of the upsert request; key and entity type travel in the URL
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtraFieldParameters {
    pub name: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub field_type: ExtraFieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_choice: Option<bool>,
}

impl ExtraField {
    /// Empty placeholder row for a field that is being created
    pub fn placeholder(entity_type: EntityType) -> Self {
        Self {
            key: NEW_FIELD_KEY.to_string(),
            entity_type,
            name: String::new(),
            order: 0,
            unit: None,
            field_type: ExtraFieldType::Text,
            default_value: None,
            choices: None,
            multi_choice: None,
        }
    }

    pub fn from_parameters(entity_type: EntityType, key: String, params: ExtraFieldParameters) -> Self {
        Self {
            key,
            entity_type,
            name: params.name,
            order: params.order,
            unit: params.unit,
            field_type: params.field_type,
            default_value: params.default_value,
            choices: params.choices,
            multi_choice: params.multi_choice,
        }
    }

    pub fn is_multi_choice(&self) -> bool {
        self.field_type == ExtraFieldType::Choice && self.multi_choice.unwrap_or(false)
    }

    pub fn choices(&self) -> &[String] {
        self.choices.as_deref().unwrap_or(&[])
    }

    /// Decoded default value; `None` when absent
    pub fn default_value(&self) -> Result<Option<FieldValue>, FieldValueError> {
        match self.default_value.as_deref() {
            Some(raw) => FieldValue::decode(self.field_type, self.is_multi_choice(), raw),
            None => Ok(None),
        }
    }

    /// Fold optional values into their stored form: empty unit becomes absent,
    /// a choice field always carries `multi_choice`
    pub fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        if self
            .unit
            .as_deref()
            .map(|u| u.trim().is_empty())
            .unwrap_or(false)
        {
            self.unit = None;
        }
        if self.field_type == ExtraFieldType::Choice && self.multi_choice.is_none() {
            self.multi_choice = Some(false);
        }
    }

    /// Structural validation of a field about to be stored
    pub fn validate(&self) -> Result<(), String> {
        validate_key(&self.key)?;
        validate_name(&self.name)?;

        if let Some(unit) = &self.unit {
            if !self.field_type.is_numeric() {
                return Err(format!(
                    "A unit is only allowed for numeric fields, not {}",
                    self.field_type
                ));
            }
            if unit.chars().count() > UNIT_MAX_LENGTH {
                return Err(format!("Unit must be at most {} characters", UNIT_MAX_LENGTH));
            }
        }

        if self.field_type == ExtraFieldType::Choice {
            let choices = self.choices();
            if choices.is_empty() {
                return Err("A choice field needs at least one choice".to_string());
            }
            if choices.iter().any(|c| c.trim().is_empty()) {
                return Err("Choices must not be empty".to_string());
            }
            for (i, choice) in choices.iter().enumerate() {
                if choices[..i].contains(choice) {
                    return Err(format!("Choice '{}' is listed twice", choice));
                }
            }
        } else {
            if self.choices.is_some() {
                return Err("Choices are only allowed for choice fields".to_string());
            }
            if self.multi_choice.is_some() {
                return Err("Multi choice is only allowed for choice fields".to_string());
            }
        }

        let default = self
            .default_value()
            .map_err(|e| format!("Invalid default value: {}", e))?;
        if let Some(value) = default {
            value
                .check_choices(self.choices())
                .map_err(|e| format!("Invalid default value: {}", e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(field_type: ExtraFieldType) -> ExtraField {
        ExtraField {
            key: "nozzle_temp".into(),
            entity_type: EntityType::Filament,
            name: "Nozzle temperature".into(),
            order: 0,
            unit: None,
            field_type,
            default_value: None,
            choices: None,
            multi_choice: None,
        }
    }

    #[test]
    fn test_valid_range_field() {
        let mut f = field(ExtraFieldType::IntegerRange);
        f.unit = Some("°C".into());
        f.default_value = Some("[180,210]".into());
        assert_eq!(f.validate(), Ok(()));
    }

    #[test]
    fn test_unit_only_for_numeric() {
        let mut f = field(ExtraFieldType::Text);
        f.unit = Some("mm".into());
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_choice_field_rules() {
        let mut f = field(ExtraFieldType::Choice);
        assert!(f.validate().is_err(), "choices are required");

        f.choices = Some(vec!["matte".into(), "glossy".into()]);
        f.multi_choice = Some(true);
        f.default_value = Some("[\"matte\"]".into());
        assert_eq!(f.validate(), Ok(()));

        f.default_value = Some("[\"silk\"]".into());
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_choices_rejected_for_other_types() {
        let mut f = field(ExtraFieldType::Integer);
        f.choices = Some(vec!["1".into()]);
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_placeholder_key_is_invalid() {
        let mut f = ExtraField::placeholder(EntityType::Spool);
        f.name = "Anything".into();
        assert_eq!(f.key, NEW_FIELD_KEY);
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_normalize() {
        let mut f = field(ExtraFieldType::Choice);
        f.unit = Some(" ".into());
        f.name = " Finish ".into();
        f.normalize();
        assert_eq!(f.unit, None);
        assert_eq!(f.multi_choice, Some(false));
        assert_eq!(f.name, "Finish");
    }

    #[test]
    fn test_serialization_omits_absent_values() {
        let f = field(ExtraFieldType::Boolean);
        let json = serde_json::to_value(&f).unwrap();
        assert!(json.get("unit").is_none());
        assert!(json.get("choices").is_none());
        assert_eq!(json["field_type"], "boolean");
        assert_eq!(json["entity_type"], "filament");
    }
}
