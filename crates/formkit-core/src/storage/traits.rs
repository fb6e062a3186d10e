//! Key-value store trait definition.
//!
//! Saved forms live under a single string key, the way a browser keeps
//! them in local storage. `KeyValueStore` is that contract; backends only
//! move strings in and out and know nothing about forms.

use crate::error::Result;

/// String key-value storage.
///
/// Implementations must ensure:
/// - `set` replaces the whole value for a key
/// - a value written by `set` is returned by the next `get`
/// - `remove` on a missing key is not an error
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Returns
    ///
    /// Returns `Ok(None)` when nothing is stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `FormError::Storage` (or a backend-specific variant) when the
    /// backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `FormError::Storage` (or a backend-specific variant) when the
    /// value cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete the value stored under `key`.
    fn remove(&mut self, key: &str) -> Result<()>;
}
