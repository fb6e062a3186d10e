//! Saved form schemas under one storage key.
//!
//! The whole collection is a JSON array stored at [`SCHEMAS_KEY`]. Every
//! write rewrites the array. The infallible operations log failures with
//! `tracing::error!` and carry on, so an unreadable store looks empty and a
//! failed write leaves the previous contents in place.

use crate::error::Result;
use crate::schema::FormSchema;
use crate::storage::traits::KeyValueStore;

/// Storage key holding the saved-schema array.
pub const SCHEMAS_KEY: &str = "formBuilderForms";

/// Reads and writes the saved-schema array in a [`KeyValueStore`].
#[derive(Debug)]
pub struct SchemaPersistence<S> {
    store: S,
}

impl<S: KeyValueStore> SchemaPersistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Every saved schema, in stored order; empty when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns the backend error, or `FormError::Json` when the stored text
    /// is not a schema array.
    pub fn try_load_all(&self) -> Result<Vec<FormSchema>> {
        match self.store.get(SCHEMAS_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Replace the stored array with `forms`.
    pub fn try_write_all(&mut self, forms: &[FormSchema]) -> Result<()> {
        let raw = serde_json::to_string(forms)?;
        self.store.set(SCHEMAS_KEY, &raw)
    }

    /// Every saved schema; read or parse failures are logged and yield an
    /// empty list.
    pub fn load_all(&self) -> Vec<FormSchema> {
        match self.try_load_all() {
            Ok(forms) => forms,
            Err(err) => {
                tracing::error!(error = %err, key = SCHEMAS_KEY, "failed to load saved forms");
                Vec::new()
            }
        }
    }

    /// Append `form` to the stored array.
    ///
    /// When the stored array cannot be read the write is skipped, so the
    /// unreadable contents stay as they are.
    pub fn save(&mut self, form: &FormSchema) {
        let result = self.try_load_all().and_then(|mut forms| {
            forms.push(form.clone());
            self.try_write_all(&forms)
        });
        if let Err(err) = result {
            tracing::error!(error = %err, form_id = %form.id, "failed to save form");
        }
    }

    /// Remove every stored schema whose id is `id`; skipped like
    /// [`SchemaPersistence::save`] when the stored array is unreadable.
    pub fn delete(&mut self, id: &str) {
        let result = self.try_load_all().and_then(|mut forms| {
            forms.retain(|f| f.id != id);
            self.try_write_all(&forms)
        });
        if let Err(err) = result {
            tracing::error!(error = %err, form_id = %id, "failed to delete form");
        }
    }
}
