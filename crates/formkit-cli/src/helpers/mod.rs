//! Input and parsing helper functions for the CLI.
//!
//! This module provides utilities for:
//! - Reading form drafts from JSON or TOML (`draft`)
//! - Assignment, date, and field lookup parsing (`parsing`)

mod draft;
mod parsing;

// Re-export public API
pub use draft::read_draft;
pub use parsing::{parse_assignment, parse_date, parse_position, resolve_field};
