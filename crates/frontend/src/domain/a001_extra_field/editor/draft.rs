use super::coercion::decode_default;
use chrono::NaiveDateTime;
use contracts::domain::a001_extra_field::{ExtraField, ExtraFieldType};

/// On-screen shape of a default value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DraftValue {
    #[default]
    Empty,
    Text(String),
    /// Raw text of a numeric input
    Number(String),
    Checkbox(bool),
    DateTime(NaiveDateTime),
    /// Free text `"A - B"`
    Range(String),
    Choice(String),
    Choices(Vec<String>),
}

impl DraftValue {
    /// Choice values referenced by the draft value
    pub fn choice_values(&self) -> Vec<&str> {
        match self {
            DraftValue::Choice(s) if !s.is_empty() => vec![s.as_str()],
            DraftValue::Choices(values) => values.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Text shown in a free-text input for this value
    pub fn as_input_text(&self) -> String {
        match self {
            DraftValue::Text(s)
            | DraftValue::Number(s)
            | DraftValue::Range(s)
            | DraftValue::Choice(s) => s.clone(),
            _ => String::new(),
        }
    }
}

/// Form state of the row under edit
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub key: String,
    pub name: String,
    /// Raw text of the order input
    pub order: String,
    pub field_type: ExtraFieldType,
    pub unit: String,
    pub default_value: DraftValue,
    pub choices: Vec<String>,
    pub multi_choice: bool,
}

impl Draft {
    /// Draft of a field that does not exist yet
    pub fn new_field() -> Self {
        Self {
            key: String::new(),
            name: String::new(),
            order: "0".to_string(),
            field_type: ExtraFieldType::Text,
            unit: String::new(),
            default_value: DraftValue::Empty,
            choices: Vec::new(),
            multi_choice: false,
        }
    }

    /// Load a stored field into the form, decoding its default value
    pub fn from_field(field: &ExtraField) -> Self {
        Self {
            key: field.key.clone(),
            name: field.name.clone(),
            order: field.order.to_string(),
            field_type: field.field_type,
            unit: field.unit.clone().unwrap_or_default(),
            default_value: decode_default(field),
            choices: field.choices().to_vec(),
            multi_choice: field.is_multi_choice(),
        }
    }

    /// A different type invalidates the entered default value
    pub fn set_field_type(&mut self, field_type: ExtraFieldType) {
        if self.field_type != field_type {
            self.field_type = field_type;
            self.default_value = DraftValue::Empty;
        }
    }

    /// Switching between single and multi choice invalidates the default value
    pub fn set_multi_choice(&mut self, multi_choice: bool) {
        if self.multi_choice != multi_choice {
            self.multi_choice = multi_choice;
            self.default_value = DraftValue::Empty;
        }
    }

    /// Choices from a textarea, one per line; blank lines and repeats dropped
    pub fn set_choices_text(&mut self, text: &str) {
        let mut choices: Vec<String> = Vec::new();
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if !choices.iter().any(|c| c == line) {
                choices.push(line.to_string());
            }
        }
        self.choices = choices;
    }

    pub fn choices_text(&self) -> String {
        self.choices.join("\n")
    }

    /// Add or remove one value of a multi-choice default, keeping the order
    /// of the choice list
    pub fn toggle_default_choice(&mut self, value: &str, selected: bool) {
        let mut current: Vec<String> = self
            .default_value
            .choice_values()
            .into_iter()
            .filter(|c| *c != value)
            .map(str::to_string)
            .collect();
        if selected {
            current.push(value.to_string());
        }
        let ordered: Vec<String> = self
            .choices
            .iter()
            .filter(|c| current.contains(c))
            .cloned()
            .collect();
        self.default_value = if ordered.is_empty() {
            DraftValue::Empty
        } else {
            DraftValue::Choices(ordered)
        };
    }
}
