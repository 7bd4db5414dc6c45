//! Buildpack acquisition and packaging
//!
//! Buildpacks are fetched once into the content-addressed cache, described by
//! their `buildpack.toml`, arranged into an order file for detection, and can
//! later be repackaged as `.tgz` artifacts for transport.

pub mod acquire;
pub mod descriptor;
#[cfg(test)]
pub(crate) mod testing;
pub mod translate;

pub use acquire::{acquire, AcquireReport, Resolution, ResolvedBuildpack};
pub use descriptor::{BuildpackDescriptor, DESCRIPTOR_FILE};
pub use translate::{file_uri, translate};
