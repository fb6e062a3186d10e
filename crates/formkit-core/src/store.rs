//! Form Schema Store: the form being edited plus the saved collection.

use chrono::Utc;
use uuid::Uuid;

use crate::error::{FormError, Result};
use crate::schema::{FormField, FormSchema, NewField, WorkingForm};
use crate::storage::{KeyValueStore, SchemaPersistence};

/// Owns the working form and the saved schemas.
///
/// Saved schemas are loaded from `persistence` when the store is built and
/// written back on every save or delete.
#[derive(Debug)]
pub struct FormStore<S> {
    current: WorkingForm,
    saved: Vec<FormSchema>,
    persistence: SchemaPersistence<S>,
}

impl<S: KeyValueStore> FormStore<S> {
    pub fn new(persistence: SchemaPersistence<S>) -> Self {
        let saved = persistence.load_all();
        tracing::debug!(saved = saved.len(), "loaded saved forms");
        Self {
            current: WorkingForm::default(),
            saved,
            persistence,
        }
    }

    pub fn current(&self) -> &WorkingForm {
        &self.current
    }

    pub fn saved_forms(&self) -> &[FormSchema] {
        &self.saved
    }

    pub fn persistence(&self) -> &SchemaPersistence<S> {
        &self.persistence
    }

    /// Append a field to the working form under a fresh id and return the id.
    pub fn add_field(&mut self, field: NewField) -> String {
        let id = Uuid::new_v4().to_string();
        tracing::debug!(field_id = %id, field_type = field.field_type.as_str(), "add field");
        self.current.fields.push(field.into_field(id.clone()));
        id
    }

    /// Replace the field with the same id in place.
    ///
    /// Returns `false` and changes nothing when no field has that id.
    pub fn update_field(&mut self, field: FormField) -> bool {
        match self.current.fields.iter_mut().find(|f| f.id == field.id) {
            Some(slot) => {
                tracing::debug!(field_id = %field.id, "update field");
                *slot = field;
                true
            }
            None => false,
        }
    }

    /// Remove the field with `id`; returns whether one was removed.
    pub fn delete_field(&mut self, id: &str) -> bool {
        let before = self.current.fields.len();
        self.current.fields.retain(|f| f.id != id);
        let removed = self.current.fields.len() != before;
        if removed {
            tracing::debug!(field_id = %id, "delete field");
        }
        removed
    }

    /// Replace the whole field list with `fields`, in the given order.
    pub fn reorder_fields(&mut self, fields: Vec<FormField>) {
        self.current.fields = fields;
    }

    pub fn set_form_name(&mut self, name: impl Into<String>) {
        self.current.name = name.into();
    }

    /// Save the working fields under `name` as a new schema.
    ///
    /// The schema gets a fresh id and the current time, is appended to the
    /// saved collection and persisted, and the working form is reset.
    ///
    /// # Errors
    ///
    /// Returns `FormError::InvalidInput` when `name` is blank; nothing is
    /// saved and the working form is left as it was.
    pub fn save_form(&mut self, name: &str) -> Result<FormSchema> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FormError::InvalidInput(
                "Form name cannot be empty".to_string(),
            ));
        }

        let form = FormSchema {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            fields: std::mem::take(&mut self.current.fields),
            created_at: Utc::now(),
        };
        self.persistence.save(&form);
        self.saved.push(form.clone());
        self.current = WorkingForm::default();

        tracing::debug!(form_id = %form.id, fields = form.fields.len(), "saved form");
        Ok(form)
    }

    /// Copy a saved schema's fields and name into the working form.
    pub fn load_form(&mut self, form: &FormSchema) {
        self.current = WorkingForm {
            fields: form.fields.clone(),
            name: form.name.clone(),
        };
    }

    pub fn clear_current_form(&mut self) {
        self.current = WorkingForm::default();
    }

    /// Look up a saved schema by exact id or by a unique id prefix.
    ///
    /// # Errors
    ///
    /// Returns `FormError::NotFound` when nothing matches and
    /// `FormError::InvalidInput` when a prefix matches several schemas.
    pub fn find_saved(&self, id_or_prefix: &str) -> Result<&FormSchema> {
        if let Some(form) = self.saved.iter().find(|f| f.id == id_or_prefix) {
            return Ok(form);
        }
        if id_or_prefix.is_empty() {
            return Err(FormError::NotFound("Form id is empty".to_string()));
        }

        let mut matches = self
            .saved
            .iter()
            .filter(|f| f.id.starts_with(id_or_prefix));
        match (matches.next(), matches.next()) {
            (Some(form), None) => Ok(form),
            (Some(_), Some(_)) => Err(FormError::InvalidInput(format!(
                "Form id prefix '{}' is ambiguous",
                id_or_prefix
            ))),
            (None, _) => Err(FormError::NotFound(format!(
                "Form '{}' not found",
                id_or_prefix
            ))),
        }
    }

    /// Remove a saved schema from the collection and from storage.
    ///
    /// # Errors
    ///
    /// Returns `FormError::NotFound` when no saved schema has `id`.
    pub fn delete_saved(&mut self, id: &str) -> Result<FormSchema> {
        let index = self
            .saved
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| FormError::NotFound(format!("Form '{}' not found", id)))?;
        let removed = self.saved.remove(index);
        self.persistence.delete(id);
        tracing::debug!(form_id = %id, "deleted saved form");
        Ok(removed)
    }
}
