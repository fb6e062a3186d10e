//! Form schema model and configuration checks.

pub mod lint;
pub mod types;

pub use lint::{lint_fields, FieldIssue, IssueKind};
pub use types::{
    ComputationType, DerivedConfig, FieldType, FormField, FormSchema, NewField, RuleKind,
    ValidationRule, WorkingForm,
};
