use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::BackendArg;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormkitConfig {
    pub store: StoreSection,
    #[serde(default)]
    pub log: LogSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSection {
    pub backend: Backend,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LogSection {
    /// `tracing` filter directive, e.g. `formkit_core=debug`
    pub filter: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    #[default]
    Sqlite,
    Files,
}

impl From<BackendArg> for Backend {
    fn from(value: BackendArg) -> Self {
        match value {
            BackendArg::Sqlite => Backend::Sqlite,
            BackendArg::Files => Backend::Files,
        }
    }
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Sqlite => "sqlite",
            Backend::Files => "files",
        }
    }

    /// Guess the backend from an existing path: directories hold files.
    pub fn infer(path: &Path) -> Self {
        if path.is_dir() || (path.extension().is_none() && !path.exists()) {
            Backend::Files
        } else {
            Backend::Sqlite
        }
    }
}

impl FormkitConfig {
    pub fn new(backend: Backend, store_path: PathBuf) -> Self {
        Self {
            store: StoreSection {
                backend,
                path: store_path.to_string_lossy().to_string(),
            },
            log: LogSection::default(),
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_store_path(backend: Backend) -> anyhow::Result<PathBuf> {
    let dir = xdg_data_dir()?;
    Ok(match backend {
        Backend::Sqlite => dir.join("forms.db"),
        Backend::Files => dir.join("forms"),
    })
}

pub fn read_config(path: &Path) -> anyhow::Result<FormkitConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &FormkitConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("formkit"));
        }
    }
    Ok(home_dir()?.join(".config").join("formkit"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("formkit"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("formkit"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
