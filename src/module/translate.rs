//! Packaging cached buildpacks for transport
//!
//! Rewrites a reference list so that every buildpack already in the cache is
//! replaced by a `file://` URI to a freshly written `<key>.tgz` next to its
//! cache entry. References that were never cached pass through unchanged.

use crate::archive;
use crate::cache::{self, CacheKey};
use crate::error::{StageError, StageResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Translate `references`, preserving order and length.
///
/// Each occurrence is handled independently, so a duplicated reference
/// rewrites its archive twice with identical content.
pub async fn translate(references: &[String], cache_root: &Path) -> StageResult<Vec<String>> {
    let mut translated = Vec::with_capacity(references.len());

    for reference in references {
        let key = CacheKey::of(reference);
        let entry = key.entry_path(cache_root);

        if !cache::is_cached(&entry)? {
            debug!(reference = %reference, "not cached, passing through");
            translated.push(reference.clone());
            continue;
        }

        let dest = absolute(&key.archive_path(cache_root))?;
        let src = entry.clone();
        let out = dest.clone();
        tokio::task::spawn_blocking(move || archive::write_tgz(&src, &out))
            .await
            .map_err(|e| StageError::Internal(format!("archive task failed: {e}")))??;

        let uri = file_uri(&dest);
        info!(reference = %reference, key = %key, archive = %dest.display(), "buildpack packaged");
        translated.push(uri);
    }

    Ok(translated)
}

/// `file://` URI for an absolute path
pub fn file_uri(path: &Path) -> String {
    format!("file://{}", path.display())
}

fn absolute(path: &Path) -> StageResult<PathBuf> {
    std::path::absolute(path)
        .map_err(|e| StageError::io(format!("resolving absolute path of {}", path.display()), e))
}
