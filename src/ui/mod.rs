//! Human-facing output
//!
//! Interactive terminals get `cliclack` steps and spinners. Pipes and CI get
//! plain lines tagged `[OK]`, `[WARN]` or `[FAIL]`. Machine-readable output
//! (`--format json|plain`) bypasses this module entirely.

mod context;
mod output;
mod progress;

pub use context::UiContext;
pub use output::{buildpack_label, cache_lookup, notice, order_written, resolved, written};
pub use progress::Spinner;
