//! Order file generation
//!
//! The detect phase reads `order.toml` to decide which buildpacks to try and
//! in which combinations. Two grouping policies are supported:
//!
//! - joint: one group with every buildpack, in input order
//! - independent: one single-buildpack group per input, in input order
//!
//! With no buildpacks, joint writes one empty group and independent writes
//! no groups at all. The file is always written.

use crate::error::{StageError, StageResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// How buildpacks are grouped for detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingPolicy {
    /// All buildpacks in one group that must pass detection together
    #[default]
    Joint,
    /// Each buildpack in its own group (auto-detection)
    Independent,
}

impl GroupingPolicy {
    /// Policy for the `auto_detect` flag
    pub fn from_auto_detect(auto_detect: bool) -> Self {
        if auto_detect {
            Self::Independent
        } else {
            Self::Joint
        }
    }
}

impl fmt::Display for GroupingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Joint => write!(f, "joint"),
            Self::Independent => write!(f, "independent"),
        }
    }
}

/// A buildpack identity inside a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupEntry {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl GroupEntry {
    pub fn new(id: impl Into<String>, version: Option<String>) -> Self {
        Self {
            id: id.into(),
            version,
        }
    }
}

/// One detection group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderGroup {
    #[serde(default)]
    pub group: Vec<GroupEntry>,
}

/// Contents of `order.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderToml {
    #[serde(default)]
    pub order: Vec<OrderGroup>,
}

impl OrderToml {
    /// Empty order for a policy: one empty group (joint) or none (independent)
    pub fn empty(policy: GroupingPolicy) -> Self {
        match policy {
            GroupingPolicy::Joint => Self {
                order: vec![OrderGroup::default()],
            },
            GroupingPolicy::Independent => Self { order: Vec::new() },
        }
    }

    /// Build an order from entries already in input order
    pub fn from_entries(entries: impl IntoIterator<Item = GroupEntry>, policy: GroupingPolicy) -> Self {
        let mut order = Self::empty(policy);
        for entry in entries {
            order.push(entry, policy);
        }
        order
    }

    /// Append an entry under `policy`
    pub fn push(&mut self, entry: GroupEntry, policy: GroupingPolicy) {
        match policy {
            GroupingPolicy::Joint => match self.order.first_mut() {
                Some(group) => group.group.push(entry),
                None => self.order.push(OrderGroup { group: vec![entry] }),
            },
            GroupingPolicy::Independent => self.order.push(OrderGroup { group: vec![entry] }),
        }
    }

    /// Parse an order file's contents
    pub fn parse(content: &str) -> StageResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize to TOML text
    pub fn to_toml(&self) -> StageResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Write the order file.
    ///
    /// Goes through a temporary sibling and a rename so a reader never sees
    /// a half-written file.
    pub async fn write_to(&self, path: &Path) -> StageResult<()> {
        let content = self.to_toml()?;
        let write_err = |source| StageError::OrderWrite {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "order.toml".to_string());
        let tmp = path.with_file_name(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4()));

        tokio::fs::write(&tmp, content).await.map_err(write_err)?;
        if let Err(e) = tokio::fs::rename(&tmp, path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(write_err(e));
        }

        debug!(path = %path.display(), groups = self.order.len(), "wrote order file");
        Ok(())
    }
}
