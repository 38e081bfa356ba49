//! Read-mode text of table cells

use crate::shared::date_utils::format_datetime;
use crate::shared::text_format::{format_number, format_number_auto, format_with_unit};
use crate::domain::a001_extra_field::editor::Column;
use contracts::domain::a001_extra_field::{ExtraField, FieldValue};

/// Text of a column in a row that is not under edit
pub fn format_column(field: &ExtraField, column: Column) -> String {
    match column {
        Column::Key => field.key.clone(),
        Column::Name => field.name.clone(),
        Column::Order => field.order.to_string(),
        Column::FieldType => field.field_type.display_name().to_string(),
        Column::Unit => field.unit.clone().unwrap_or_default(),
        Column::DefaultValue => format_default_value(field),
        Column::Choices => format_choices(field),
        Column::MultiChoice => format_multi_choice(field),
    }
}

/// Default value as shown in a row that is not under edit. A stored value
/// that does not decode is shown raw.
pub fn format_default_value(field: &ExtraField) -> String {
    let value = match field.default_value() {
        Ok(Some(value)) => value,
        Ok(None) => return String::new(),
        Err(e) => {
            log::warn!("Cannot display default of field '{}': {}", field.key, e);
            return field.default_value.clone().unwrap_or_default();
        }
    };

    let text = match &value {
        FieldValue::Text(s) | FieldValue::Choice(s) => s.clone(),
        FieldValue::Integer(i) => format_number(*i as f64, 0),
        FieldValue::Float(f) => format_number_auto(*f),
        FieldValue::IntegerRange(min, max) => format!(
            "{} - {}",
            format_number(*min as f64, 0),
            format_number(*max as f64, 0)
        ),
        FieldValue::FloatRange(min, max) => {
            format!("{} - {}", format_number_auto(*min), format_number_auto(*max))
        }
        FieldValue::Boolean(b) => yes_no(*b).to_string(),
        FieldValue::DateTime(dt) => format_datetime(dt),
        FieldValue::MultiChoice(values) => values.join(", "),
    };

    if field.field_type.is_numeric() {
        format_with_unit(text, field.unit.as_deref())
    } else {
        text
    }
}

pub fn format_choices(field: &ExtraField) -> String {
    field.choices().join(", ")
}

/// Multi-choice flag; empty for non-choice fields
pub fn format_multi_choice(field: &ExtraField) -> String {
    match field.multi_choice {
        Some(multi) => yes_no(multi).to_string(),
        None => String::new(),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}
