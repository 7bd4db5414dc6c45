//! Buildpack acquisition
//!
//! Resolves each reference to a cache entry, fetching only on a miss, and
//! writes the order file from the descriptors of the resolved buildpacks.
//!
//! References are processed one at a time in input order. Duplicates are not
//! filtered: a repeated reference is a cache hit, but still contributes its
//! own order entry.

use crate::archive;
use crate::cache::{self, CacheKey, CacheState};
use crate::error::{StageError, StageResult};
use crate::fetch::Fetcher;
use crate::module::descriptor::{missing_entry_points, BuildpackDescriptor};
use crate::order::{GroupEntry, GroupingPolicy, OrderToml};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// How a reference was satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// Downloaded and extracted during this run
    Fetched,
    /// Already in the cache
    Reused,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetched => write!(f, "fetched"),
            Self::Reused => write!(f, "reused"),
        }
    }
}

/// A reference resolved to a cache entry
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedBuildpack {
    pub reference: String,
    pub key: String,
    pub path: PathBuf,
    pub id: String,
    pub version: Option<String>,
    pub resolution: Resolution,
}

impl ResolvedBuildpack {
    fn group_entry(&self) -> GroupEntry {
        GroupEntry::new(self.id.clone(), self.version.clone())
    }
}

/// Outcome of a successful acquisition run
#[derive(Debug, Clone, Serialize)]
pub struct AcquireReport {
    /// One element per input reference, in input order
    pub buildpacks: Vec<ResolvedBuildpack>,
    pub policy: GroupingPolicy,
    pub order_path: PathBuf,
    #[serde(skip)]
    pub order: OrderToml,
}

impl AcquireReport {
    pub fn fetched(&self) -> usize {
        self.buildpacks
            .iter()
            .filter(|b| b.resolution == Resolution::Fetched)
            .count()
    }

    pub fn reused(&self) -> usize {
        self.buildpacks.len() - self.fetched()
    }
}

/// Resolve every reference into `cache_root` and write the order file.
///
/// Fails on the first transport, extraction, descriptor or cache error; the
/// order file is only written once every reference has resolved.
pub async fn acquire(
    references: &[String],
    cache_root: &Path,
    fetcher: &dyn Fetcher,
    order_path: &Path,
    policy: GroupingPolicy,
) -> StageResult<AcquireReport> {
    tokio::fs::create_dir_all(cache_root).await.map_err(|e| {
        StageError::io(format!("creating cache directory {}", cache_root.display()), e)
    })?;

    debug!(
        count = references.len(),
        cache = %cache_root.display(),
        %policy,
        transport = fetcher.name(),
        "acquiring buildpacks"
    );

    let mut order = OrderToml::empty(policy);
    let mut buildpacks = Vec::with_capacity(references.len());

    for reference in references {
        let resolved = resolve(reference, cache_root, fetcher).await?;
        order.push(resolved.group_entry(), policy);
        buildpacks.push(resolved);
    }

    order.write_to(order_path).await?;
    info!(
        path = %order_path.display(),
        groups = order.order.len(),
        "order file written"
    );

    Ok(AcquireReport {
        buildpacks,
        policy,
        order_path: order_path.to_path_buf(),
        order,
    })
}

/// Resolve one reference: probe, fetch on miss, read the descriptor
async fn resolve(
    reference: &str,
    cache_root: &Path,
    fetcher: &dyn Fetcher,
) -> StageResult<ResolvedBuildpack> {
    let key = CacheKey::of(reference);
    let path = key.entry_path(cache_root);

    let state = cache::probe(&path)?.into_result(&path)?;
    let resolution = match state {
        CacheState::Present => Resolution::Reused,
        _ => {
            let reader = fetcher.fetch(reference).await?;
            let dest = path.clone();
            tokio::task::spawn_blocking(move || archive::extract_bundle(reader, &dest))
                .await
                .map_err(|e| StageError::Internal(format!("extract task failed: {e}")))?
                .map_err(|source| StageError::Extract {
                    reference: reference.to_string(),
                    path: path.clone(),
                    source,
                })?;
            Resolution::Fetched
        }
    };

    let descriptor = BuildpackDescriptor::from_dir(&path).await?;
    let missing = missing_entry_points(&path);
    if !missing.is_empty() {
        warn!(
            reference = %reference,
            id = descriptor.id(),
            missing = ?missing,
            "buildpack has no executable entry points at the expected paths"
        );
    }

    info!(
        reference = %reference,
        key = %key,
        id = descriptor.id(),
        version = descriptor.version().unwrap_or("-"),
        %resolution,
        "buildpack {}",
        resolution
    );

    Ok(ResolvedBuildpack {
        reference: reference.to_string(),
        key: key.to_string(),
        path,
        id: descriptor.id().to_string(),
        version: descriptor.version().map(str::to_string),
        resolution,
    })
}
