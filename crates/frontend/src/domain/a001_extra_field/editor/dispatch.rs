//! Field-type dispatch table.
//!
//! `column_spec` is a pure mapping from a column and the draft's
//! `(field_type, multi_choice)` to the input control, the validation rules
//! and whether the column can be edited. The view and `validate_draft` both
//! go through it, so it is re-evaluated whenever the type or the
//! multi-choice flag changes.

use super::coercion::{parse_float, parse_float_range, parse_integer, parse_integer_range};
use super::draft::{Draft, DraftValue};
use contracts::domain::a001_extra_field::validation::{
    is_reserved_key, is_valid_key_format, KEY_MAX_LENGTH, NAME_MAX_LENGTH, UNIT_MAX_LENGTH,
};
use contracts::domain::a001_extra_field::{ExtraField, ExtraFieldType, NEW_FIELD_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Key,
    Name,
    Order,
    FieldType,
    Unit,
    DefaultValue,
    Choices,
    MultiChoice,
}

impl Column {
    pub fn all() -> [Column; 8] {
        [
            Column::Key,
            Column::Name,
            Column::Order,
            Column::FieldType,
            Column::Unit,
            Column::DefaultValue,
            Column::Choices,
            Column::MultiChoice,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Column::Key => "Key",
            Column::Name => "Name",
            Column::Order => "Order",
            Column::FieldType => "Type",
            Column::Unit => "Unit",
            Column::DefaultValue => "Default value",
            Column::Choices => "Choices",
            Column::MultiChoice => "Multiple",
        }
    }
}

/// Input control rendered for an editable cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Integer,
    Float,
    IntegerRange,
    FloatRange,
    DateTime,
    Checkbox,
    /// Pick one of the draft's choices
    Select,
    /// Pick any number of the draft's choices
    MultiSelect,
    FieldTypeSelect,
    /// One choice per line
    ChoiceList,
    /// Not editable, the stored value is shown as text
    Display,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    MaxLength(usize),
    KeyFormat,
    NotReservedKey,
    Integer,
    Float,
    IntegerRange,
    FloatRange,
    /// Default value must be among the draft's choices
    OneOfChoices,
    NonEmptyChoices,
    /// Choices used by the stored default value cannot be removed
    KeepsStoredDefaultChoices,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub input: InputKind,
    pub rules: Vec<Rule>,
    pub editable: bool,
}

impl ColumnSpec {
    fn edit(input: InputKind, rules: Vec<Rule>) -> Self {
        Self {
            input,
            rules,
            editable: true,
        }
    }

    fn read_only() -> Self {
        Self {
            input: InputKind::Display,
            rules: Vec::new(),
            editable: false,
        }
    }
}

/// Inline error attached to one column of the row under edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub column: Column,
    pub message: String,
}

/// `is_new` is true while the field has never been saved; key and type are
/// fixed afterwards.
pub fn column_spec(
    column: Column,
    field_type: ExtraFieldType,
    multi_choice: bool,
    is_new: bool,
) -> ColumnSpec {
    let is_choice = field_type == ExtraFieldType::Choice;
    match column {
        Column::Key if is_new => ColumnSpec::edit(
            InputKind::Text,
            vec![
                Rule::Required,
                Rule::MaxLength(KEY_MAX_LENGTH),
                Rule::KeyFormat,
                Rule::NotReservedKey,
            ],
        ),
        Column::FieldType if is_new => ColumnSpec::edit(InputKind::FieldTypeSelect, Vec::new()),
        Column::Key | Column::FieldType => ColumnSpec::read_only(),
        Column::Name => ColumnSpec::edit(
            InputKind::Text,
            vec![Rule::Required, Rule::MaxLength(NAME_MAX_LENGTH)],
        ),
        Column::Order => ColumnSpec::edit(InputKind::Integer, vec![Rule::Integer]),
        Column::Unit if field_type.is_numeric() => {
            ColumnSpec::edit(InputKind::Text, vec![Rule::MaxLength(UNIT_MAX_LENGTH)])
        }
        Column::Unit => ColumnSpec::read_only(),
        Column::Choices if is_choice => ColumnSpec::edit(
            InputKind::ChoiceList,
            vec![Rule::NonEmptyChoices, Rule::KeepsStoredDefaultChoices],
        ),
        Column::MultiChoice if is_choice => ColumnSpec::edit(InputKind::Checkbox, Vec::new()),
        Column::Choices | Column::MultiChoice => ColumnSpec::read_only(),
        Column::DefaultValue => match field_type {
            ExtraFieldType::Text => ColumnSpec::edit(InputKind::Text, Vec::new()),
            ExtraFieldType::Integer => ColumnSpec::edit(InputKind::Integer, vec![Rule::Integer]),
            ExtraFieldType::Float => ColumnSpec::edit(InputKind::Float, vec![Rule::Float]),
            ExtraFieldType::IntegerRange => {
                ColumnSpec::edit(InputKind::IntegerRange, vec![Rule::IntegerRange])
            }
            ExtraFieldType::FloatRange => {
                ColumnSpec::edit(InputKind::FloatRange, vec![Rule::FloatRange])
            }
            ExtraFieldType::DateTime => ColumnSpec::edit(InputKind::DateTime, Vec::new()),
            ExtraFieldType::Boolean => ColumnSpec::edit(InputKind::Checkbox, Vec::new()),
            ExtraFieldType::Choice if multi_choice => {
                ColumnSpec::edit(InputKind::MultiSelect, vec![Rule::OneOfChoices])
            }
            ExtraFieldType::Choice => ColumnSpec::edit(InputKind::Select, vec![Rule::OneOfChoices]),
        },
    }
}

/// Run every rule of every editable column; at most one error per column.
/// `stored` is the saved version of the field, if any.
pub fn validate_draft(draft: &Draft, is_new: bool, stored: Option<&ExtraField>) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for column in Column::all() {
        let spec = column_spec(column, draft.field_type, draft.multi_choice, is_new);
        if !spec.editable {
            continue;
        }
        if let Some(message) = spec
            .rules
            .iter()
            .find_map(|rule| check_rule(*rule, column, draft, stored).err())
        {
            errors.push(FieldError { column, message });
        }
    }
    errors
}

fn column_text(column: Column, draft: &Draft) -> String {
    match column {
        Column::Key => draft.key.clone(),
        Column::Name => draft.name.clone(),
        Column::Order => draft.order.clone(),
        Column::Unit => draft.unit.clone(),
        Column::DefaultValue => draft.default_value.as_input_text(),
        _ => String::new(),
    }
}

fn check_rule(
    rule: Rule,
    column: Column,
    draft: &Draft,
    stored: Option<&ExtraField>,
) -> Result<(), String> {
    let text = column_text(column, draft);
    let text = text.trim();

    // Numeric rules on the default value only apply to numeric input
    let numeric_input = match column {
        Column::DefaultValue => matches!(
            draft.default_value,
            DraftValue::Empty | DraftValue::Number(_) | DraftValue::Range(_)
        ),
        _ => true,
    };

    match rule {
        Rule::Required if text.is_empty() => Err(format!("{} is required", column.label())),
        Rule::MaxLength(max) if text.chars().count() > max => Err(format!(
            "{} must be at most {} characters",
            column.label(),
            max
        )),
        Rule::KeyFormat if !is_valid_key_format(text) => {
            Err("Only lowercase letters, digits and underscores are allowed".to_string())
        }
        Rule::NotReservedKey if is_reserved_key(text) => {
            Err(format!("'{}' is reserved, choose another key", NEW_FIELD_KEY))
        }
        Rule::Integer | Rule::Float | Rule::IntegerRange | Rule::FloatRange if !numeric_input => {
            Err("Unexpected value for this field type".to_string())
        }
        Rule::Integer if !text.is_empty() && parse_integer(text).is_none() => {
            Err("Enter a whole number".to_string())
        }
        Rule::Float if !text.is_empty() && parse_float(text).is_none() => {
            Err("Enter a number".to_string())
        }
        Rule::IntegerRange if !text.is_empty() && parse_integer_range(text).is_none() => {
            Err("Enter a range of whole numbers, e.g. 180 - 210".to_string())
        }
        Rule::FloatRange if !text.is_empty() && parse_float_range(text).is_none() => {
            Err("Enter a range of numbers, e.g. 1.5 - 2.9".to_string())
        }
        Rule::OneOfChoices => match draft
            .default_value
            .choice_values()
            .into_iter()
            .find(|v| !draft.choices.iter().any(|c| c == v))
        {
            Some(missing) => Err(format!("'{}' is not one of the choices", missing)),
            None => Ok(()),
        },
        Rule::NonEmptyChoices if draft.choices.is_empty() => {
            Err("Add at least one choice".to_string())
        }
        Rule::KeepsStoredDefaultChoices => {
            let stored_default = stored
                .filter(|f| f.field_type == ExtraFieldType::Choice)
                .and_then(|f| f.default_value().ok().flatten());
            let Some(stored_default) = stored_default else {
                return Ok(());
            };
            match stored_default
                .choice_values()
                .into_iter()
                .find(|v| !draft.choices.iter().any(|c| c == v))
            {
                Some(missing) => Err(format!(
                    "'{}' is used by the saved default value and cannot be removed",
                    missing
                )),
                None => Ok(()),
            }
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_extra_field::EntityType;

    fn new_draft(field_type: ExtraFieldType) -> Draft {
        let mut d = Draft::new_field();
        d.key = "nozzle_temp".into();
        d.name = "Nozzle temperature".into();
        d.field_type = field_type;
        d
    }

    fn columns_with_errors(errors: &[FieldError]) -> Vec<Column> {
        errors.iter().map(|e| e.column).collect()
    }

    #[test]
    fn test_key_and_type_fixed_after_creation() {
        for field_type in ExtraFieldType::all() {
            assert!(column_spec(Column::Key, field_type, false, true).editable);
            assert!(column_spec(Column::FieldType, field_type, false, true).editable);
            assert!(!column_spec(Column::Key, field_type, false, false).editable);
            assert!(!column_spec(Column::FieldType, field_type, false, false).editable);
            assert!(column_spec(Column::Name, field_type, false, false).editable);
        }
    }

    #[test]
    fn test_unit_only_for_numeric_types() {
        for field_type in ExtraFieldType::all() {
            assert_eq!(
                column_spec(Column::Unit, field_type, false, false).editable,
                field_type.is_numeric()
            );
        }
    }

    #[test]
    fn test_choice_columns_only_for_choice() {
        for field_type in ExtraFieldType::all() {
            let is_choice = field_type == ExtraFieldType::Choice;
            assert_eq!(column_spec(Column::Choices, field_type, false, false).editable, is_choice);
            assert_eq!(
                column_spec(Column::MultiChoice, field_type, false, false).editable,
                is_choice
            );
        }
    }

    #[test]
    fn test_default_value_input_follows_type() {
        let input = |t, multi| column_spec(Column::DefaultValue, t, multi, false).input;
        assert_eq!(input(ExtraFieldType::Boolean, false), InputKind::Checkbox);
        assert_eq!(input(ExtraFieldType::FloatRange, false), InputKind::FloatRange);
        assert_eq!(input(ExtraFieldType::DateTime, false), InputKind::DateTime);
        assert_eq!(input(ExtraFieldType::Choice, false), InputKind::Select);
        assert_eq!(input(ExtraFieldType::Choice, true), InputKind::MultiSelect);
    }

    #[test]
    fn test_valid_new_draft() {
        let mut d = new_draft(ExtraFieldType::IntegerRange);
        d.default_value = DraftValue::Range("180 - 210".into());
        assert_eq!(validate_draft(&d, true, None), Vec::new());
    }

    #[test]
    fn test_placeholder_key_rejected() {
        let mut d = new_draft(ExtraFieldType::Text);
        d.key = NEW_FIELD_KEY.into();
        let errors = validate_draft(&d, true, None);
        assert_eq!(columns_with_errors(&errors), vec![Column::Key]);
        assert!(errors[0].message.contains("reserved"));
    }

    #[test]
    fn test_key_format_and_name_required() {
        let mut d = new_draft(ExtraFieldType::Text);
        d.key = "Nozzle Temp".into();
        d.name = "  ".into();
        let errors = validate_draft(&d, true, None);
        assert_eq!(columns_with_errors(&errors), vec![Column::Key, Column::Name]);
    }

    #[test]
    fn test_key_not_checked_for_saved_field() {
        let mut d = new_draft(ExtraFieldType::Text);
        d.key = "legacy-key".into();
        assert!(validate_draft(&d, false, None).is_empty());
    }

    #[test]
    fn test_numeric_defaults() {
        let mut d = new_draft(ExtraFieldType::Integer);
        d.default_value = DraftValue::Number("1.5".into());
        assert_eq!(columns_with_errors(&validate_draft(&d, true, None)), vec![Column::DefaultValue]);

        let mut d = new_draft(ExtraFieldType::Float);
        d.default_value = DraftValue::Number("1,5".into());
        assert!(validate_draft(&d, true, None).is_empty());

        let mut d = new_draft(ExtraFieldType::FloatRange);
        d.default_value = DraftValue::Range("1.5 to 2".into());
        assert_eq!(columns_with_errors(&validate_draft(&d, true, None)), vec![Column::DefaultValue]);
    }

    #[test]
    fn test_order_must_be_integer() {
        let mut d = new_draft(ExtraFieldType::Text);
        d.order = "x".into();
        assert_eq!(columns_with_errors(&validate_draft(&d, true, None)), vec![Column::Order]);
    }

    #[test]
    fn test_choice_default_must_be_a_choice() {
        let mut d = new_draft(ExtraFieldType::Choice);
        d.choices = vec!["matte".into()];
        d.default_value = DraftValue::Choice("silk".into());
        assert_eq!(columns_with_errors(&validate_draft(&d, true, None)), vec![Column::DefaultValue]);

        d.choices.clear();
        d.default_value = DraftValue::Empty;
        assert_eq!(columns_with_errors(&validate_draft(&d, true, None)), vec![Column::Choices]);
    }

    #[test]
    fn test_choice_used_by_stored_default_cannot_be_removed() {
        let stored = ExtraField {
            key: "finish".into(),
            entity_type: EntityType::Filament,
            name: "Finish".into(),
            order: 0,
            unit: None,
            field_type: ExtraFieldType::Choice,
            default_value: Some("\"matte\"".into()),
            choices: Some(vec!["matte".into(), "glossy".into()]),
            multi_choice: Some(false),
        };
        let mut d = Draft::from_field(&stored);

        d.choices = vec!["matte".into()];
        assert!(validate_draft(&d, false, Some(&stored)).is_empty());

        d.choices = vec!["glossy".into()];
        d.default_value = DraftValue::Empty;
        let errors = validate_draft(&d, false, Some(&stored));
        assert_eq!(columns_with_errors(&errors), vec![Column::Choices]);
        assert!(errors[0].message.contains("matte"));
    }
}
