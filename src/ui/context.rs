//! Terminal detection

use std::io::IsTerminal;

/// Environment variables set by common CI runners
const CI_MARKERS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "BUILDKITE",
    "JENKINS_URL",
    "TF_BUILD",
    "TEKTON_PIPELINE_RUN",
];

/// Whether reports are drawn with cliclack or printed as plain tagged lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    rich: bool,
}

impl UiContext {
    /// Rich output on an interactive terminal outside CI, plain otherwise
    pub fn detect() -> Self {
        let rich = std::io::stdout().is_terminal()
            && !CI_MARKERS.iter().any(|var| std::env::var_os(var).is_some());
        Self { rich }
    }

    /// Always plain, line-oriented output
    pub fn plain() -> Self {
        Self { rich: false }
    }

    pub fn is_rich(&self) -> bool {
        self.rich
    }
}
