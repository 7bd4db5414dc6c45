//! Translate command - package cached buildpacks as archives

use crate::cli::args::{OutputFormat, TranslateArgs};
use crate::config::Config;
use crate::error::StageResult;
use crate::module::translate;

/// Execute the translate command
///
/// Output is meant for scripts: one reference per line, or a JSON array.
pub async fn execute(args: TranslateArgs, config: &Config) -> StageResult<()> {
    let translated = translate(&args.references, &config.cache.dir).await?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&translated)?),
        OutputFormat::Table | OutputFormat::Plain => {
            for reference in &translated {
                println!("{}", reference);
            }
        }
    }

    Ok(())
}
