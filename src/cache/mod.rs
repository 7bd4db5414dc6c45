//! Content-addressed buildpack cache
//!
//! The cache root is a plain directory tree; it is the only source of truth.
//! Each fetched buildpack lives at `<root>/<key>/` where `key` is a digest of
//! the reference string. An optional `<root>/<key>.tgz` holds the packaged form.
//!
//! # Entry States
//!
//! | State | Meaning | Handling |
//! |-------|---------|----------|
//! | Absent | Nothing at the key path | Fetch and extract |
//! | Present | Directory at the key path | Reuse, never re-fetch |
//! | Inconsistent | Non-directory at the key path | Fatal, never overwritten |
//!
//! Entries are created once and never modified in place. There is no locking:
//! sequential runs sharing a cache root are safe, concurrent runs are not.

pub mod key;
pub mod probe;

pub use key::{address_of, CacheKey, KeyHasher, Sha256Hasher, Xxh64Hasher};
pub use probe::{is_cached, list_entries, probe, CacheEntry, CacheState};
