//! Cache key derivation
//!
//! Maps a buildpack reference string to a fixed-width hex digest that names
//! its directory under the cache root. The key is derived from the reference
//! text, not from the fetched bytes: the same reference always lands in the
//! same place, across process restarts.

use sha2::{Digest, Sha256};
use std::fmt;
use std::path::{Path, PathBuf};

/// Digest function used to turn a reference into a cache key
pub trait KeyHasher: Send + Sync {
    /// Hex digest of the reference
    fn digest(&self, reference: &str) -> String;
}

/// XXH64 (seed 0), rendered as 16 lowercase hex characters
#[derive(Debug, Clone, Copy, Default)]
pub struct Xxh64Hasher;

impl KeyHasher for Xxh64Hasher {
    fn digest(&self, reference: &str) -> String {
        format!("{:016x}", xxhash_rust::xxh64::xxh64(reference.as_bytes(), 0))
    }
}

/// SHA-256 over the reference, rendered as 64 hex characters.
///
/// Wider than the default key; a cache populated with one hasher is not
/// visible through the other.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl KeyHasher for Sha256Hasher {
    fn digest(&self, reference: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(reference.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Directory name of a cache entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for a reference using the default hasher
    pub fn of(reference: &str) -> Self {
        Self::with_hasher(reference, &Xxh64Hasher)
    }

    /// Key for a reference using a specific hasher
    pub fn with_hasher(reference: &str, hasher: &dyn KeyHasher) -> Self {
        Self(hasher.digest(reference))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Cache entry directory under `cache_root`
    pub fn entry_path(&self, cache_root: &Path) -> PathBuf {
        cache_root.join(&self.0)
    }

    /// Packaged `.tgz` artifact path under `cache_root`
    pub fn archive_path(&self, cache_root: &Path) -> PathBuf {
        cache_root.join(format!("{}.tgz", self.0))
    }

    /// Whether a file name looks like a default (16 hex digit) key
    pub fn is_key_name(name: &str) -> bool {
        name.len() == 16 && name.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cache entry path for a reference: `cache_root / hex16(xxh64(reference))`
pub fn address_of(reference: &str, cache_root: &Path) -> PathBuf {
    CacheKey::of(reference).entry_path(cache_root)
}
