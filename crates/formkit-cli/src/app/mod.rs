//! Application-level utilities for the Formkit CLI.
//!
//! This module provides:
//! - Path resolution for config and store locations
//! - The per-invocation context shared by command handlers

mod context;
mod resolver;

// Re-export public API
pub use context::AppContext;
pub use resolver::{open_store, resolve_config_path, StoreLocation};
