//! Filling in a form: entered values, derived values, and validation errors.
//!
//! A `FormSession` plays the part of the rendered form. It starts from the
//! fields' default values, keeps derived fields settled after every change,
//! and validates entered fields on demand.

use std::collections::HashMap;

use chrono::{Local, NaiveDate};

use crate::derive::{recompute_derived, Recomputation};
use crate::error::{FormError, Result};
use crate::schema::FormField;
use crate::validation::validate_field;
use crate::value::{FieldValue, FormValues};

/// A validation message attached to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field_id: String,
    pub message: String,
}

/// Values and errors for one pass through a form.
#[derive(Debug, Clone)]
pub struct FormSession {
    fields: Vec<FormField>,
    values: FormValues,
    errors: HashMap<String, String>,
    cycle: Option<Vec<String>>,
    today: NaiveDate,
}

impl FormSession {
    /// Start a session evaluated against the local current date.
    pub fn new(fields: Vec<FormField>) -> Self {
        Self::with_today(fields, Local::now().date_naive())
    }

    /// Start a session whose age computations use `today`.
    ///
    /// Entered fields start at their default values; derived fields are
    /// computed immediately. A dependency cycle does not prevent the
    /// session from starting; it is available from [`FormSession::cycle`].
    pub fn with_today(fields: Vec<FormField>, today: NaiveDate) -> Self {
        let values: FormValues = fields
            .iter()
            .filter(|f| !f.is_derived)
            .map(|f| (f.id.clone(), f.default_value.clone()))
            .collect();

        let mut session = Self {
            fields,
            values,
            errors: HashMap::new(),
            cycle: None,
            today,
        };
        let _ = session.recompute();
        session
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Current value of a field; unset fields read as absent.
    pub fn value(&self, id: &str) -> &FieldValue {
        static ABSENT: FieldValue = FieldValue::Absent;
        self.values.get(id).unwrap_or(&ABSENT)
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Field ids along the last dependency cycle found, if any.
    pub fn cycle(&self) -> Option<&[String]> {
        self.cycle.as_deref()
    }

    /// Set an entered field's value and bring derived fields up to date.
    ///
    /// The field's validation error, if any, is cleared.
    ///
    /// # Errors
    ///
    /// - `FormError::NotFound` when no field has `id`
    /// - `FormError::InvalidInput` when the field is derived
    /// - `FormError::DependencyCycle` when derived fields loop; the new value
    ///   and everything computed before the loop was detected are kept
    pub fn set_value(&mut self, id: &str, value: FieldValue) -> Result<Recomputation> {
        let field = self
            .fields
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| FormError::NotFound(format!("Field '{}' not found", id)))?;
        if field.is_derived {
            return Err(FormError::InvalidInput(format!(
                "Field '{}' is derived and cannot be set",
                field.label
            )));
        }

        self.values.insert(id.to_string(), value);
        self.errors.remove(id);
        self.recompute()
    }

    /// Like [`FormSession::set_value`], parsing `raw` the way the field's
    /// input would.
    pub fn set_input(&mut self, id: &str, raw: &str) -> Result<Recomputation> {
        let field_type = self
            .fields
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.field_type)
            .ok_or_else(|| FormError::NotFound(format!("Field '{}' not found", id)))?;
        self.set_value(id, FieldValue::from_input(field_type, raw))
    }

    /// Validate every entered field and replace the stored errors.
    ///
    /// Derived fields are not validated. Errors come back in field order.
    pub fn validate(&mut self) -> Vec<FieldError> {
        self.errors.clear();
        for field in self.fields.iter().filter(|f| !f.is_derived) {
            if let Some(message) = validate_field(self.value(&field.id), &field.validation_rules) {
                self.errors.insert(field.id.clone(), message.to_string());
            }
        }
        self.errors()
    }

    /// Validate, then hand back the values when nothing failed.
    pub fn submit(&mut self) -> std::result::Result<FormValues, Vec<FieldError>> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self.values.clone())
        } else {
            Err(errors)
        }
    }

    /// Stored validation errors in field order.
    pub fn errors(&self) -> Vec<FieldError> {
        self.fields
            .iter()
            .filter_map(|f| {
                self.errors.get(&f.id).map(|message| FieldError {
                    field_id: f.id.clone(),
                    message: message.clone(),
                })
            })
            .collect()
    }

    pub fn error(&self, id: &str) -> Option<&str> {
        self.errors.get(id).map(String::as_str)
    }

    fn recompute(&mut self) -> Result<Recomputation> {
        match recompute_derived(&self.fields, &mut self.values, self.today) {
            Ok(outcome) => {
                self.cycle = None;
                Ok(outcome)
            }
            Err(FormError::DependencyCycle { fields }) => {
                self.cycle = Some(fields.clone());
                Err(FormError::DependencyCycle { fields })
            }
            Err(err) => Err(err),
        }
    }
}
