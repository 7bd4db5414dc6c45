//! Reports for fetch, cache and archive results

use super::context::UiContext;
use crate::cache::{CacheKey, CacheState};
use crate::module::{AcquireReport, Resolution, ResolvedBuildpack};
use console::style;
use std::path::Path;

/// `id@version`, or the bare id when unversioned
pub fn buildpack_label(bp: &ResolvedBuildpack) -> String {
    match &bp.version {
        Some(version) => format!("{}@{}", bp.id, version),
        None => bp.id.clone(),
    }
}

/// One line per resolved buildpack
pub fn resolved(ctx: &UiContext, bp: &ResolvedBuildpack) {
    let label = buildpack_label(bp);
    let how = match bp.resolution {
        Resolution::Fetched => style("fetched").cyan(),
        Resolution::Reused => style("reused").dim(),
    };

    if ctx.is_rich() {
        cliclack::log::success(format!("{label} {how}")).ok();
    } else {
        println!("  [OK] {label} ({})", bp.resolution);
    }
}

/// Grouping and destination of the written order file
pub fn order_written(ctx: &UiContext, report: &AcquireReport) {
    let path = report.order_path.display();
    if report.buildpacks.is_empty() {
        notice(ctx, "No buildpacks requested, the order file is empty", None);
    }

    if ctx.is_rich() {
        cliclack::log::info(format!("grouping: {}", report.policy)).ok();
        cliclack::outro(style(format!("Order written to {path}")).green().bold()).ok();
    } else {
        println!("  grouping: {}", report.policy);
        println!("[OK] Order written to {path}");
    }
}

/// Key, entry path and state for a reference
pub fn cache_lookup(ctx: &UiContext, reference: &str, key: &CacheKey, path: &Path, state: CacheState) {
    let status = match state {
        CacheState::Present => style("Cached".to_string()).green(),
        CacheState::Absent => style("Not cached".to_string()).dim(),
        CacheState::Inconsistent => {
            style("Inconsistent: path exists but is not a directory".to_string()).red()
        }
    };

    let rows = [
        ("reference", reference.to_string()),
        ("key", key.to_string()),
        ("path", path.display().to_string()),
    ];
    for (name, value) in rows {
        if ctx.is_rich() {
            println!("  {}: {}", style(name).dim(), value);
        } else {
            println!("  {name}: {value}");
        }
    }

    if ctx.is_rich() {
        cliclack::log::remark(status).ok();
    } else {
        println!("  {status}");
    }
}

/// A file was written at `path`
pub fn written(ctx: &UiContext, what: &str, path: &Path) {
    if ctx.is_rich() {
        cliclack::log::success(format!("{what} {}", style(path.display()).dim())).ok();
    } else {
        println!("[OK] {what} {}", path.display());
    }
}

/// Non-fatal condition the operator should know about
pub fn notice(ctx: &UiContext, message: &str, hint: Option<&str>) {
    let text = match hint {
        Some(hint) if ctx.is_rich() => format!("{message} ({})", style(hint).dim()),
        Some(hint) => format!("{message} ({hint})"),
        None => message.to_string(),
    };

    if ctx.is_rich() {
        cliclack::log::warning(text).ok();
    } else {
        println!("  [WARN] {text}");
    }
}
