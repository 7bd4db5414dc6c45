//! Configuration loading
//!
//! A single TOML file. A missing file means "all defaults"; a present but
//! malformed file is an error naming the path.

pub mod schema;

pub use schema::Config;

use crate::error::{StageError, StageResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Result of `ConfigManager::init`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Written,
    /// A file was already there and `force` was not set
    Kept,
}

/// Locates, reads and initializes the config file
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Use `explicit` (from `--config` or `PACKSTAGE_CONFIG`) or the per-user default
    pub fn locate(explicit: Option<PathBuf>) -> Self {
        Self {
            path: explicit.unwrap_or_else(Self::default_path),
        }
    }

    /// `<config dir>/packstage/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("packstage")
            .join("config.toml")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> StageResult<Config> {
        let text = match fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no config file, using defaults");
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(StageError::io(
                    format!("reading config {}", self.path.display()),
                    e,
                ))
            }
        };

        toml::from_str(&text).map_err(|e| StageError::ConfigInvalid {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Write a default config, leaving an existing file alone unless `force`
    pub async fn init(&self, force: bool) -> StageResult<InitOutcome> {
        if !force && fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(InitOutcome::Kept);
        }
        self.save(&Config::default()).await?;
        Ok(InitOutcome::Written)
    }

    pub async fn save(&self, config: &Config) -> StageResult<()> {
        if let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .await
                .map_err(|source| StageError::ConfigDirCreate {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }

        let text = toml::to_string_pretty(config)?;
        fs::write(&self.path, text)
            .await
            .map_err(|e| StageError::io(format!("writing config {}", self.path.display()), e))?;
        debug!(path = %self.path.display(), "config saved");
        Ok(())
    }
}
