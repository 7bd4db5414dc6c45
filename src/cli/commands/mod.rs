//! CLI command implementations

pub mod archive;
pub mod cache;
pub mod config;
pub mod fetch;
pub mod translate;

pub use archive::execute as archive;
pub use cache::execute as cache;
pub use config::execute as config;
pub use fetch::execute as fetch;
pub use translate::execute as translate;
