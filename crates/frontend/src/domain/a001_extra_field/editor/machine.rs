//! Edit/save state machine of the extra-field table.
//!
//! ```text
//! Idle --start_edit/add_field--> Editing(key) --begin_save--> Submitting(key)
//!  ^                               |    ^                          |
//!  +------------cancel-------------+    +------server error--------+
//!  +------------------------------saved-----------------------------+
//! ```
//!
//! Only one row can be under edit; every transition not listed above is
//! ignored.

use super::coercion::encode_draft;
use super::dispatch::{validate_draft, Column, FieldError};
use super::draft::Draft;
use contracts::domain::a001_extra_field::validation::is_reserved_key;
use contracts::domain::a001_extra_field::{
    EntityType, ExtraField, ExtraFieldParameters, NEW_FIELD_KEY,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorState {
    #[default]
    Idle,
    Editing(String),
    Submitting(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SaveError {
    #[error("Please correct the highlighted fields")]
    Validation(Vec<FieldError>),
    #[error("The field could not be prepared for saving: {0}")]
    Coercion(String),
    #[error("A field with key '{0}' already exists")]
    DuplicateKey(String),
    #[error("{0}")]
    Server(String),
    #[error("No field is being edited")]
    NotEditing,
}

/// Upsert call to perform after a successful `begin_save`
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub entity_type: EntityType,
    pub key: String,
    pub params: ExtraFieldParameters,
}

#[derive(Debug, Clone)]
pub struct ExtraFieldEditor {
    entity_type: EntityType,
    fields: Vec<ExtraField>,
    /// Placeholder row of a field being created
    new_field: Option<ExtraField>,
    state: EditorState,
    draft: Option<Draft>,
    field_errors: Vec<FieldError>,
    message: Option<String>,
}

impl ExtraFieldEditor {
    pub fn new(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            fields: Vec::new(),
            new_field: None,
            state: EditorState::Idle,
            draft: None,
            field_errors: Vec::new(),
            message: None,
        }
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    pub fn fields(&self) -> &[ExtraField] {
        &self.fields
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn error_for(&self, column: Column) -> Option<&str> {
        self.field_errors
            .iter()
            .find(|e| e.column == column)
            .map(|e| e.message.as_str())
    }

    /// Consolidated error of the last save attempt
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Replace the known fields with the server's list. Rows carrying the
    /// reserved placeholder key are dropped.
    pub fn set_fields(&mut self, fields: Vec<ExtraField>) {
        let mut fields: Vec<ExtraField> = fields
            .into_iter()
            .filter(|f| {
                let reserved = is_reserved_key(&f.key);
                if reserved {
                    log::warn!(
                        "Ignoring {} field with reserved key '{}' from server",
                        self.entity_type,
                        f.key
                    );
                }
                !reserved
            })
            .collect();
        sort_fields(&mut fields);
        self.fields = fields;

        // a row deleted while under edit would leave the lock on a missing key
        let stale = self
            .editing_key()
            .filter(|key| *key != NEW_FIELD_KEY && !self.fields.iter().any(|f| f.key == *key))
            .map(str::to_string);
        if let Some(key) = stale {
            log::warn!(
                "{} field '{}' is gone from the server list, edit discarded",
                self.entity_type,
                key
            );
            self.reset_to_idle();
        }
    }

    /// Saved fields followed by the placeholder row, if any
    pub fn rows(&self) -> Vec<ExtraField> {
        let mut rows = self.fields.clone();
        rows.extend(self.new_field.iter().cloned());
        rows
    }

    pub fn editing_key(&self) -> Option<&str> {
        match &self.state {
            EditorState::Editing(key) | EditorState::Submitting(key) => Some(key),
            EditorState::Idle => None,
        }
    }

    pub fn is_row_editing(&self, key: &str) -> bool {
        self.editing_key() == Some(key)
    }

    /// Another row holds the edit lock
    pub fn is_row_locked(&self, key: &str) -> bool {
        matches!(self.editing_key(), Some(editing) if editing != key)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, EditorState::Submitting(_))
    }

    pub fn is_editing_new(&self) -> bool {
        self.editing_key() == Some(NEW_FIELD_KEY)
    }

    /// The add action is offered only when nothing is under edit and no
    /// new-field draft exists
    pub fn can_add(&self) -> bool {
        self.state == EditorState::Idle && self.new_field.is_none()
    }

    pub fn can_delete(&self, key: &str) -> bool {
        self.state == EditorState::Idle && key != NEW_FIELD_KEY
    }

    /// Create the placeholder row and start editing it
    pub fn add_field(&mut self) -> bool {
        if !self.can_add() {
            return false;
        }
        self.new_field = Some(ExtraField::placeholder(self.entity_type));
        self.enter_editing(NEW_FIELD_KEY.to_string(), Draft::new_field());
        true
    }

    /// Load a row into the draft. Ignored unless the editor is idle.
    pub fn start_edit(&mut self, key: &str) -> bool {
        if self.state != EditorState::Idle {
            log::debug!("start_edit({}) ignored, editor is {:?}", key, self.state);
            return false;
        }
        let Some(field) = self.fields.iter().find(|f| f.key == key) else {
            return false;
        };
        let draft = Draft::from_field(field);
        self.enter_editing(key.to_string(), draft);
        true
    }

    fn enter_editing(&mut self, key: String, draft: Draft) {
        log::debug!("Editing {} field '{}'", self.entity_type, key);
        self.draft = Some(draft);
        self.field_errors.clear();
        self.message = None;
        self.state = EditorState::Editing(key);
    }

    /// Apply a change to the draft and clear the column's inline error
    pub fn update_draft(&mut self, column: Column, change: impl FnOnce(&mut Draft)) -> bool {
        if !matches!(self.state, EditorState::Editing(_)) {
            return false;
        }
        let Some(draft) = self.draft.as_mut() else {
            return false;
        };
        change(draft);
        self.field_errors.retain(|e| e.column != column);
        true
    }

    /// Discard the draft; an unsaved new field disappears entirely
    pub fn cancel(&mut self) -> bool {
        let EditorState::Editing(key) = &self.state else {
            return false;
        };
        if key == NEW_FIELD_KEY {
            self.new_field = None;
        }
        log::debug!("Cancelled edit of '{}'", key);
        self.reset_to_idle();
        true
    }

    /// Validate, encode and check key uniqueness. On success the editor moves
    /// to `Submitting` and the caller performs the returned upsert.
    pub fn begin_save(&mut self) -> Result<SaveRequest, SaveError> {
        let EditorState::Editing(key) = self.state.clone() else {
            return Err(SaveError::NotEditing);
        };
        let Some(mut draft) = self.draft.clone() else {
            return Err(SaveError::NotEditing);
        };
        draft.key = draft.key.trim().to_string();
        let is_new = key == NEW_FIELD_KEY;
        let stored = self.fields.iter().find(|f| f.key == key).cloned();

        self.message = None;
        self.field_errors = validate_draft(&draft, is_new, stored.as_ref());
        if !self.field_errors.is_empty() {
            return Err(SaveError::Validation(self.field_errors.clone()));
        }

        let params = match encode_draft(&draft) {
            Ok(params) => params,
            Err(e) => return Err(self.fail(SaveError::Coercion(e.to_string()))),
        };

        let target_key = if is_new { draft.key.clone() } else { key.clone() };
        if self
            .fields
            .iter()
            .any(|f| f.key == target_key && f.key != key)
        {
            return Err(self.fail(SaveError::DuplicateKey(target_key)));
        }

        log::debug!("Submitting {} field '{}'", self.entity_type, target_key);
        self.state = EditorState::Submitting(key);
        Ok(SaveRequest {
            entity_type: self.entity_type,
            key: target_key,
            params,
        })
    }

    /// Outcome of the upsert started by `begin_save`. A server error returns
    /// to `Editing` with the draft intact.
    pub fn finish_save(&mut self, result: Result<ExtraField, String>) -> Result<(), SaveError> {
        let EditorState::Submitting(key) = self.state.clone() else {
            log::warn!("finish_save without a save in flight");
            return Err(SaveError::NotEditing);
        };
        match result {
            Ok(field) => {
                if key == NEW_FIELD_KEY {
                    self.new_field = None;
                }
                self.fields.retain(|f| f.key != field.key);
                self.fields.push(field);
                sort_fields(&mut self.fields);
                self.reset_to_idle();
                Ok(())
            }
            Err(message) => {
                log::warn!("Saving {} field failed: {}", self.entity_type, message);
                self.state = EditorState::Editing(key);
                Err(self.fail(SaveError::Server(message)))
            }
        }
    }

    fn fail(&mut self, error: SaveError) -> SaveError {
        self.message = Some(error.to_string());
        error
    }

    fn reset_to_idle(&mut self) {
        self.draft = None;
        self.field_errors.clear();
        self.message = None;
        self.state = EditorState::Idle;
    }
}

fn sort_fields(fields: &mut [ExtraField]) {
    fields.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.key.cmp(&b.key)));
}
