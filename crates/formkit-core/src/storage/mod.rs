//! Key-value storage backends and saved-schema persistence.

pub mod file;
pub mod memory;
pub mod schemas;
pub mod sqlite;
pub mod traits;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use schemas::{SchemaPersistence, SCHEMAS_KEY};
pub use sqlite::SqliteStore;
pub use traits::KeyValueStore;

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> crate::error::Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> crate::error::Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> crate::error::Result<()> {
        (**self).remove(key)
    }
}
