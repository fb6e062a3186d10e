//! Path resolution for config and store locations.

use std::path::PathBuf;

use formkit_core::{FileStore, FormStore, KeyValueStore, SchemaPersistence, SqliteStore};

use crate::config::{default_config_path, default_store_path, Backend, FormkitConfig};

/// Where saved forms live and how they are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLocation {
    pub backend: Backend,
    pub path: PathBuf,
}

/// Resolve the config file path, checking FORMKIT_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("FORMKIT_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the store from the `--store` flag, then the config, then defaults.
///
/// A `--store` path that matches the configured one keeps the configured
/// backend; any other path has its backend inferred.
pub fn resolve_store_location(
    store_flag: Option<&str>,
    config: Option<&FormkitConfig>,
) -> anyhow::Result<StoreLocation> {
    match (store_flag, config) {
        (Some(flag), Some(config)) if flag == config.store.path => Ok(StoreLocation {
            backend: config.store.backend,
            path: PathBuf::from(flag),
        }),
        (Some(flag), _) => {
            let path = PathBuf::from(flag);
            Ok(StoreLocation {
                backend: Backend::infer(&path),
                path,
            })
        }
        (None, Some(config)) => Ok(StoreLocation {
            backend: config.store.backend,
            path: PathBuf::from(&config.store.path),
        }),
        (None, None) => Ok(StoreLocation {
            backend: Backend::Sqlite,
            path: default_store_path(Backend::Sqlite)?,
        }),
    }
}

/// Open the form store at `location`, creating it if needed.
pub fn open_store(location: &StoreLocation) -> anyhow::Result<FormStore<Box<dyn KeyValueStore>>> {
    let backend: Box<dyn KeyValueStore> = match location.backend {
        Backend::Sqlite => {
            if let Some(parent) = location.path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        anyhow::anyhow!(
                            "Failed to create store directory {}: {}",
                            parent.display(),
                            e
                        )
                    })?;
                }
            }
            Box::new(SqliteStore::open(&location.path)?)
        }
        Backend::Files => Box::new(FileStore::open(&location.path)?),
    };
    tracing::debug!(
        backend = location.backend.as_str(),
        path = %location.path.display(),
        "opened form store"
    );
    Ok(FormStore::new(SchemaPersistence::new(backend)))
}
