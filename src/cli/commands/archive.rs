//! Archive command - deterministic .tgz of a directory

use crate::archive;
use crate::cli::args::ArchiveArgs;
use crate::error::{StageError, StageResult};
use crate::ui::{self, UiContext};

/// Execute the archive command
pub async fn execute(args: ArchiveArgs) -> StageResult<()> {
    let ctx = UiContext::detect();

    if !args.source.is_dir() {
        return Err(StageError::PathNotFound(args.source));
    }

    let source = args.source.clone();
    let output = args.output.clone();
    let written = tokio::task::spawn_blocking(move || archive::write_tgz(&source, &output))
        .await
        .map_err(|e| StageError::Internal(format!("archive task failed: {e}")))??;

    ui::written(&ctx, &format!("Archived {} to", args.source.display()), &written);
    Ok(())
}
