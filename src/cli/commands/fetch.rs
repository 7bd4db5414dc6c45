//! Fetch command - populate the cache and write the order file

use crate::cli::args::{FetchArgs, OutputFormat};
use crate::config::Config;
use crate::error::StageResult;
use crate::fetch::DefaultFetcher;
use crate::module::{acquire, AcquireReport};
use crate::order::GroupingPolicy;
use crate::ui::{self, Spinner, UiContext};

/// Execute the fetch command
pub async fn execute(args: FetchArgs, config: &Config) -> StageResult<()> {
    let order_path = args.order.unwrap_or_else(|| config.order.path.clone());
    let policy = GroupingPolicy::from_auto_detect(args.auto_detect || config.order.auto_detect);
    let fetcher = DefaultFetcher::new(&config.fetch);
    let run = acquire(
        &args.references,
        &config.cache.dir,
        &fetcher,
        &order_path,
        policy,
    );

    if args.format != OutputFormat::Table {
        let report = run.await?;
        return print_report(&report, args.format);
    }

    let ctx = UiContext::detect();
    let spinner = Spinner::start(
        &ctx,
        &format!(
            "Resolving {} buildpack(s) into {}",
            args.references.len(),
            config.cache.dir.display()
        ),
    );

    let report = match run.await {
        Ok(report) => report,
        Err(e) => {
            spinner.fail("Buildpack acquisition failed");
            return Err(e);
        }
    };
    spinner.finish(&format!(
        "{} fetched, {} reused",
        report.fetched(),
        report.reused()
    ));

    for bp in &report.buildpacks {
        ui::resolved(&ctx, bp);
    }
    ui::order_written(&ctx, &report);
    Ok(())
}

fn print_report(report: &AcquireReport, format: OutputFormat) -> StageResult<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        _ => {
            for bp in &report.buildpacks {
                println!("{}\t{}\t{}", bp.resolution, bp.id, bp.path.display());
            }
        }
    }
    Ok(())
}
