//! Buildpack fetch transports
//!
//! The acquisition pipeline only needs a readable tar (or tgz) stream for a
//! reference. Where the bytes come from is up to the [`Fetcher`]:
//! - local directories and archives (plain paths or `file://` URIs)
//! - `http://` and `https://` downloads
//!
//! Retries and timeouts belong to the transport, not the pipeline.

pub mod http;
pub mod local;

use crate::config::schema::FetchConfig;
use crate::error::{StageError, StageResult};
use async_trait::async_trait;
use std::io::Read;

pub use http::HttpFetcher;
pub use local::LocalFetcher;

/// Byte stream of a buildpack bundle
pub type BundleReader = Box<dyn Read + Send>;

/// Abstract fetch transport
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Return a tar or gzip-compressed tar stream for `reference`
    async fn fetch(&self, reference: &str) -> StageResult<BundleReader>;

    /// Human-readable transport name for logs
    fn name(&self) -> &'static str;
}

/// How a reference string is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Plain filesystem path or `file:` URI
    Local,
    /// `http://` or `https://` URL
    Http,
    /// Anything with another scheme (e.g. `docker://`, `urn:cnb:registry:`)
    Unsupported,
}

impl ReferenceKind {
    /// Classify a reference by its scheme
    pub fn of(reference: &str) -> Self {
        let lower = reference.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Self::Http;
        }
        if lower.starts_with("file:") {
            return Self::Local;
        }
        match reference.split_once("://") {
            Some(_) => Self::Unsupported,
            None if lower.starts_with("urn:") => Self::Unsupported,
            None => Self::Local,
        }
    }
}

/// Dispatches each reference to the matching transport
pub struct DefaultFetcher {
    local: LocalFetcher,
    http: HttpFetcher,
}

impl DefaultFetcher {
    pub fn new(config: &FetchConfig) -> Self {
        Self {
            local: LocalFetcher::new(),
            http: HttpFetcher::new(config),
        }
    }
}

#[async_trait]
impl Fetcher for DefaultFetcher {
    async fn fetch(&self, reference: &str) -> StageResult<BundleReader> {
        match ReferenceKind::of(reference) {
            ReferenceKind::Local => self.local.fetch(reference).await,
            ReferenceKind::Http => self.http.fetch(reference).await,
            ReferenceKind::Unsupported => {
                Err(StageError::UnsupportedReference(reference.to_string()))
            }
        }
    }

    fn name(&self) -> &'static str {
        "default"
    }
}
