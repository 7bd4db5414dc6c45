//! Tar archives of buildpack directories
//!
//! Building is deterministic: sorted traversal, zeroed timestamps and
//! ownership, symlinks recorded verbatim. Extraction accepts plain or
//! gzip-compressed tar streams.

pub mod builder;
pub mod extract;

pub use builder::{build_archive, tar_bytes, write_tar, write_tgz};
pub use extract::extract_bundle;
