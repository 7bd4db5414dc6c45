//! Local filesystem transport
//!
//! Directories are packed into an anonymous spool file and streamed from
//! there; files are streamed as-is and must already be a tar or tgz bundle.

use crate::archive;
use crate::error::{StageError, StageResult};
use crate::fetch::{BundleReader, Fetcher};
use async_trait::async_trait;
use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Fetches bundles from local paths and `file:` URIs
#[derive(Debug, Clone, Default)]
pub struct LocalFetcher;

impl LocalFetcher {
    pub fn new() -> Self {
        Self
    }

    /// Filesystem path for a plain path or `file:` URI
    pub fn local_path(reference: &str) -> PathBuf {
        let path = match reference.strip_prefix("file://") {
            // file://localhost/path and file:///path
            Some(rest) => rest.strip_prefix("localhost").unwrap_or(rest),
            None => reference.strip_prefix("file:").unwrap_or(reference),
        };
        PathBuf::from(path)
    }
}

#[async_trait]
impl Fetcher for LocalFetcher {
    async fn fetch(&self, reference: &str) -> StageResult<BundleReader> {
        let path = Self::local_path(reference);
        let meta = tokio::fs::metadata(&path)
            .await
            .map_err(|e| StageError::fetch(reference, format!("{}: {}", path.display(), e)))?;

        if meta.is_dir() {
            debug!(path = %path.display(), "packing local buildpack directory");
            let spool = tokio::task::spawn_blocking(move || spool_directory(&path))
                .await
                .map_err(|e| StageError::Internal(format!("archive task failed: {e}")))??;
            Ok(Box::new(spool))
        } else {
            debug!(path = %path.display(), "opening local buildpack archive");
            let file = File::open(&path)
                .map_err(|e| StageError::fetch(reference, format!("{}: {}", path.display(), e)))?;
            Ok(Box::new(file))
        }
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

/// Tar `dir` into an unnamed temp file, rewound to the start
fn spool_directory(dir: &Path) -> StageResult<File> {
    let spool_err = |e: std::io::Error| StageError::io(format!("spooling {}", dir.display()), e);

    let spool = tempfile::tempfile().map_err(spool_err)?;
    let mut spool = archive::write_tar(dir, spool)?;
    spool.seek(SeekFrom::Start(0)).map_err(spool_err)?;
    Ok(spool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::extract_bundle;
    use std::io::Read;
    use tempfile::TempDir;

    #[test]
    fn local_path_forms() {
        assert_eq!(LocalFetcher::local_path("/opt/bp"), PathBuf::from("/opt/bp"));
        assert_eq!(LocalFetcher::local_path("file:///opt/bp"), PathBuf::from("/opt/bp"));
        assert_eq!(
            LocalFetcher::local_path("file://localhost/opt/bp"),
            PathBuf::from("/opt/bp")
        );
        assert_eq!(LocalFetcher::local_path("file:/opt/bp"), PathBuf::from("/opt/bp"));
        assert_eq!(LocalFetcher::local_path("rel/bp"), PathBuf::from("rel/bp"));
    }

    #[tokio::test]
    async fn fetch_directory_as_tar() {
        let src = TempDir::new().unwrap();
        std::fs::write(src.path().join("buildpack.toml"), "[buildpack]\nid = \"dir\"\n").unwrap();

        let reader = LocalFetcher::new()
            .fetch(src.path().to_str().unwrap())
            .await
            .unwrap();

        let out = TempDir::new().unwrap();
        extract_bundle(reader, out.path()).unwrap();
        assert!(out.path().join("buildpack.toml").is_file());
    }

    #[test]
    fn spooled_directory_matches_tar_bytes() {
        let src = TempDir::new().unwrap();
        std::fs::create_dir(src.path().join("bin")).unwrap();
        std::fs::write(src.path().join("bin").join("detect"), "detect").unwrap();
        std::fs::write(src.path().join("buildpack.toml"), "[buildpack]\nid = \"d\"\n").unwrap();

        let mut spooled = Vec::new();
        spool_directory(src.path())
            .unwrap()
            .read_to_end(&mut spooled)
            .unwrap();
        assert_eq!(spooled, archive::tar_bytes(src.path()).unwrap());
    }

    #[tokio::test]
    async fn fetch_archive_file() {
        let src = TempDir::new().unwrap();
        std::fs::write(src.path().join("buildpack.toml"), "[buildpack]\nid = \"tgz\"\n").unwrap();
        let out = TempDir::new().unwrap();
        let tgz = out.path().join("bp.tgz");
        archive::write_tgz(src.path(), &tgz).unwrap();

        let uri = format!("file://{}", tgz.display());
        let reader = LocalFetcher::new().fetch(&uri).await.unwrap();

        let dest = out.path().join("extracted");
        extract_bundle(reader, &dest).unwrap();
        assert!(dest.join("buildpack.toml").is_file());
    }

    #[tokio::test]
    async fn fetch_missing_path_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let err = match LocalFetcher::new().fetch(missing.to_str().unwrap()).await {
            Ok(_) => panic!("expected fetch error"),
            Err(e) => e,
        };
        assert!(matches!(err, StageError::Fetch { .. }));
        assert!(err.to_string().contains("missing"));
    }
}
