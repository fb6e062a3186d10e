//! UI primitives for the Formkit CLI.
//!
//! This module provides:
//! - **Context**: Environment detection (TTY, width, color)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badges and owo-colors styles
//! - **Render**: Tables, headers, receipts, hints
//! - **Format**: String utilities (truncate, short ids, dates)

mod context;
pub mod format;
mod mode;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use mode::OutputMode;
pub use theme::Badge;

pub use render::{badge, header, hint, kv, print, receipt, table, Column};

pub use format::{format_datetime, short_id, single_line, truncate};
