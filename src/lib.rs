//! packstage - buildpack acquisition cache and order generation
//!
//! Fetches buildpacks into a content-addressed cache, writes the order file
//! read by the detect phase, and repackages cached buildpacks as
//! deterministic archives.

pub mod archive;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod module;
pub mod order;
pub mod ui;

pub use error::{StageError, StageResult};
