//! Output formatting helpers for the CLI.
//!
//! This module provides formatting utilities for displaying forms and
//! filled-in values as JSON or text.

mod json;
mod text;

// Re-export public API
pub use json::{fill_json, form_json, form_summary_json};
pub use text::{print_fill, print_form, print_issues};
