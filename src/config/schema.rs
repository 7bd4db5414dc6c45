//! Configuration schema for packstage
//!
//! Configuration is stored at `~/.config/packstage/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Buildpack cache settings
    pub cache: CacheConfig,

    /// Order file settings
    pub order: OrderConfig,

    /// Fetch transport settings
    pub fetch: FetchConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Buildpack cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Root directory holding `<key>/` entries and `<key>.tgz` artifacts
    pub dir: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("packstage")
                .join("buildpacks"),
        }
    }
}

/// Order file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderConfig {
    /// Where `order.toml` is written
    pub path: PathBuf,

    /// One group per buildpack instead of one group for all
    pub auto_detect: bool,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("order.toml"),
            auto_detect: false,
        }
    }
}

/// Fetch transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Whole-request timeout for downloads in seconds (0 = none)
    pub timeout_secs: u64,

    /// User-Agent header sent with downloads
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 300,
            user_agent: format!("packstage/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
