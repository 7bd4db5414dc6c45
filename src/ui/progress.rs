//! Spinner for long-running work

use super::context::UiContext;
use console::style;

/// Spinner that becomes a single start line in plain mode.
///
/// Finishing consumes it, so a spinner is settled exactly once.
pub struct Spinner {
    bar: Option<cliclack::ProgressBar>,
}

impl Spinner {
    pub fn start(ctx: &UiContext, message: &str) -> Self {
        if !ctx.is_rich() {
            println!("{} {message}", style("...").dim());
            return Self { bar: None };
        }

        let bar = cliclack::spinner();
        bar.start(message);
        Self { bar: Some(bar) }
    }

    pub fn finish(self, message: &str) {
        match self.bar {
            Some(bar) => bar.stop(message),
            None => println!("[OK] {message}"),
        }
    }

    pub fn fail(self, message: &str) {
        match self.bar {
            Some(bar) => bar.error(message),
            None => println!("[FAIL] {message}"),
        }
    }
}
