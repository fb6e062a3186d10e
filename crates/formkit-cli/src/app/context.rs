//! Application context for the Formkit CLI.
//!
//! Provides a unified context that combines CLI arguments with the
//! lazily-loaded config file.

use once_cell::unsync::OnceCell;

use formkit_core::{FormStore, KeyValueStore};

use crate::cli::Cli;
use crate::config::{read_config, FormkitConfig};
use crate::ui::UiContext;

use super::resolver::{open_store, resolve_config_path, resolve_store_location, StoreLocation};

/// Application context that bundles CLI args with configuration.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<FormkitConfig>>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the config file contents, loading them lazily.
    ///
    /// Returns `None` when no config file exists.
    pub fn config(&self) -> anyhow::Result<Option<&FormkitConfig>> {
        let config = self.config.get_or_try_init(|| -> anyhow::Result<_> {
            let path = resolve_config_path()?;
            if path.exists() {
                Ok(Some(read_config(&path)?))
            } else {
                Ok(None)
            }
        })?;
        Ok(config.as_ref())
    }

    /// Where this invocation reads and writes saved forms.
    pub fn store_location(&self) -> anyhow::Result<StoreLocation> {
        resolve_store_location(self.cli.store.as_deref(), self.config()?)
    }

    /// Open the form store, creating it on first use.
    pub fn open_store(&self) -> anyhow::Result<FormStore<Box<dyn KeyValueStore>>> {
        open_store(&self.store_location()?)
    }

    /// Build the UI context for a command's output flags.
    pub fn ui_context(&self, json: bool) -> UiContext {
        UiContext::from_env(json)
    }
}
