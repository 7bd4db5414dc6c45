//! Cache entry probing and listing

use crate::cache::key::CacheKey;
use crate::error::{StageError, StageResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// State of a cache path on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheState {
    /// Nothing exists at the path
    Absent,
    /// A directory exists at the path
    Present,
    /// Something other than a directory exists at the path
    Inconsistent,
}

impl CacheState {
    /// Whether the entry can be used as-is
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present)
    }

    /// Turn an inconsistent state into the fatal error for `path`
    pub fn into_result(self, path: &Path) -> StageResult<Self> {
        match self {
            Self::Inconsistent => Err(StageError::CacheInconsistent(path.to_path_buf())),
            state => Ok(state),
        }
    }
}

impl fmt::Display for CacheState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "absent"),
            Self::Present => write!(f, "present"),
            Self::Inconsistent => write!(f, "inconsistent"),
        }
    }
}

/// Classify a cache path. Follows symlinks, so a link to a directory is present.
pub fn probe(path: &Path) -> StageResult<CacheState> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(CacheState::Present),
        Ok(_) => {
            debug!(path = %path.display(), "cache path exists but is not a directory");
            Ok(CacheState::Inconsistent)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(CacheState::Absent),
        Err(e) => Err(StageError::io(
            format!("probing cache path {}", path.display()),
            e,
        )),
    }
}

/// Probe and fail on inconsistency, mapping to "is it cached"
pub fn is_cached(path: &Path) -> StageResult<bool> {
    Ok(probe(path)?.into_result(path)?.is_present())
}

/// A key-named path found under the cache root
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Directory name (the cache key)
    pub key: String,
    /// Full path of the entry
    pub path: PathBuf,
    /// Present or inconsistent
    pub state: CacheState,
    /// Whether `<key>.tgz` sits next to the entry
    pub packaged: bool,
    /// Last modification time, when available
    pub modified_at: Option<DateTime<Utc>>,
}

/// List key-named entries under the cache root, sorted by key.
///
/// A missing cache root lists as empty.
pub fn list_entries(cache_root: &Path) -> StageResult<Vec<CacheEntry>> {
    let read_dir = match std::fs::read_dir(cache_root) {
        Ok(rd) => rd,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(StageError::io(
                format!("reading cache directory {}", cache_root.display()),
                e,
            ))
        }
    };

    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| {
            StageError::io(format!("reading cache directory {}", cache_root.display()), e)
        })?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !CacheKey::is_key_name(&name) {
            continue;
        }

        let path = entry.path();
        let state = probe(&path)?;
        let modified_at = std::fs::symlink_metadata(&path)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Utc>::from);
        let packaged = cache_root.join(format!("{}.tgz", name)).is_file();

        entries.push(CacheEntry {
            key: name,
            path,
            state,
            packaged,
            modified_at,
        });
    }

    entries.sort_by(|a, b| a.key.cmp(&b.key));
    debug!("Found {} cache entries", entries.len());
    Ok(entries)
}
