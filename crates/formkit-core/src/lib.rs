//! # Formkit Core
//!
//! Core library for Formkit - a form builder that defines forms as typed
//! fields, validates entered values, and computes derived fields.
//!
//! This crate provides the form model, both evaluators, the schema store
//! and its storage backends, independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **value**: Field values and conversions between them
//! - **schema**: Fields, rules, derivations, saved schemas, and lint
//! - **validation**: First-failing-rule validation
//! - **derive**: Derived values, formula evaluation, and recomputation
//! - **session**: Filling in a form against both evaluators
//! - **store**: Working form and saved-schema collection
//! - **storage**: Key-value backends and saved-schema persistence

pub mod derive;
pub mod error;
pub mod fs;
pub mod numeric;
pub mod schema;
pub mod session;
pub mod storage;
pub mod store;
pub mod validation;
pub mod value;

pub use derive::{compute_derived_value, compute_derived_value_on, recompute_derived};
pub use error::{FormError, Result};
pub use schema::{
    lint_fields, ComputationType, DerivedConfig, FieldIssue, FieldType, FormField, FormSchema,
    NewField, RuleKind, ValidationRule, WorkingForm,
};
pub use session::{FieldError, FormSession};
pub use storage::{FileStore, KeyValueStore, MemoryStore, SchemaPersistence, SqliteStore};
pub use store::FormStore;
pub use validation::validate_field;
pub use value::{FieldValue, FormValues};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
