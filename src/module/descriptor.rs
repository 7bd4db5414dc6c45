//! Buildpack descriptor parsing
//!
//! Each buildpack bundle carries a `buildpack.toml` at its root describing
//! its id, version and supported stacks. The order file is built from these
//! ids, never from cache keys.

use crate::error::{StageError, StageResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name of the descriptor inside a bundle
pub const DESCRIPTOR_FILE: &str = "buildpack.toml";

/// Executables a buildpack is expected to ship
pub const ENTRY_POINTS: [&str; 2] = ["bin/detect", "bin/build"];

/// Parsed `buildpack.toml`
#[derive(Debug, Clone, Deserialize)]
pub struct BuildpackDescriptor {
    /// Buildpack API version the bundle targets
    #[serde(default)]
    pub api: Option<String>,

    /// Buildpack metadata
    pub buildpack: BuildpackInfo,

    /// Stacks the buildpack declares support for
    #[serde(default)]
    pub stacks: Vec<StackInfo>,
}

/// `[buildpack]` section
#[derive(Debug, Clone, Deserialize)]
pub struct BuildpackInfo {
    /// Buildpack id (e.g. `paketo-buildpacks/java`)
    pub id: String,

    #[serde(default)]
    pub version: Option<String>,

    /// Human-readable name
    #[serde(default)]
    pub name: Option<String>,
}

/// `[[stacks]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct StackInfo {
    pub id: String,
}

impl BuildpackDescriptor {
    /// Read the descriptor from a bundle directory
    pub async fn from_dir(dir: &Path) -> StageResult<Self> {
        let path = dir.join(DESCRIPTOR_FILE);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StageError::DescriptorMissing(path))
            }
            Err(e) => {
                return Err(StageError::io(
                    format!("reading buildpack descriptor {}", path.display()),
                    e,
                ))
            }
        };
        Self::parse_at(&content, path)
    }

    /// Parse a descriptor from a TOML string
    pub fn parse(content: &str) -> StageResult<Self> {
        Self::parse_at(content, PathBuf::from(DESCRIPTOR_FILE))
    }

    fn parse_at(content: &str, path: PathBuf) -> StageResult<Self> {
        let descriptor: Self =
            toml::from_str(content).map_err(|e| StageError::DescriptorInvalid {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        if descriptor.buildpack.id.trim().is_empty() {
            return Err(StageError::DescriptorInvalid {
                path,
                reason: "buildpack.id must not be empty".to_string(),
            });
        }

        Ok(descriptor)
    }

    pub fn id(&self) -> &str {
        &self.buildpack.id
    }

    pub fn version(&self) -> Option<&str> {
        self.buildpack.version.as_deref()
    }
}

/// Entry points from [`ENTRY_POINTS`] missing under `dir`
pub fn missing_entry_points(dir: &Path) -> Vec<&'static str> {
    ENTRY_POINTS
        .iter()
        .copied()
        .filter(|p| !dir.join(p).exists())
        .collect()
}
