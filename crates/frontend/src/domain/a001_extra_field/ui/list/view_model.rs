use crate::domain::a001_extra_field::api;
use crate::domain::a001_extra_field::editor::{Column, Draft, ExtraFieldEditor};
use contracts::domain::a001_extra_field::EntityType;
use leptos::prelude::*;

/// ViewModel of the extra-field table of one entity type
#[derive(Clone, Copy)]
pub struct ExtraFieldsViewModel {
    pub editor: RwSignal<ExtraFieldEditor>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl ExtraFieldsViewModel {
    pub fn new(entity_type: EntityType) -> Self {
        Self {
            editor: RwSignal::new(ExtraFieldEditor::new(entity_type)),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn entity_type(&self) -> EntityType {
        self.editor.with_untracked(|e| e.entity_type())
    }

    /// Load fields from server
    pub fn load(&self) {
        let editor = self.editor;
        let loading = self.loading;
        let error = self.error;
        let entity_type = self.entity_type();

        loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match api::fetch_fields(entity_type).await {
                Ok(fields) => {
                    editor.update(|e| e.set_fields(fields));
                    error.set(None);
                }
                Err(e) => {
                    editor.update(|ed| ed.set_fields(Vec::new()));
                    error.set(Some(format!("Failed to load fields: {}", e)));
                }
            }
            loading.set(false);
        });
    }

    pub fn add_command(&self) {
        self.editor.update(|e| {
            e.add_field();
        });
    }

    pub fn edit_command(&self, key: &str) {
        self.editor.update(|e| {
            e.start_edit(key);
        });
    }

    pub fn cancel_command(&self) {
        self.editor.update(|e| {
            e.cancel();
        });
    }

    pub fn update_draft(&self, column: Column, change: impl FnOnce(&mut Draft)) {
        self.editor.update(|e| {
            e.update_draft(column, change);
        });
    }

    /// Validate the draft and send it; the editor stays locked until the
    /// server answers
    pub fn save_command(&self) {
        let request = match self.editor.try_update(|e| e.begin_save()) {
            Some(Ok(request)) => request,
            Some(Err(e)) => {
                log::debug!("Save not started: {}", e);
                return;
            }
            None => return,
        };

        let editor = self.editor;
        wasm_bindgen_futures::spawn_local(async move {
            let result =
                api::upsert_field(request.entity_type, &request.key, &request.params).await;
            editor.update(|e| {
                if e.finish_save(result).is_ok() {
                    log::info!("Saved {} field '{}'", request.entity_type, request.key);
                }
            });
        });
    }

    /// Delete after browser confirmation; the table is replaced by the
    /// server's remaining fields
    pub fn delete_command(&self, key: String) {
        if !self.editor.with_untracked(|e| e.can_delete(&key)) {
            return;
        }

        let confirmed = web_sys::window()
            .map(|win| {
                win.confirm_with_message(&format!("Delete field '{}'?", key))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        let editor = self.editor;
        let error = self.error;
        let entity_type = self.entity_type();
        wasm_bindgen_futures::spawn_local(async move {
            match api::delete_field(entity_type, &key).await {
                Ok(fields) => {
                    editor.update(|e| e.set_fields(fields));
                    error.set(None);
                }
                Err(e) => error.set(Some(format!("Failed to delete field: {}", e))),
            }
        });
    }
}
