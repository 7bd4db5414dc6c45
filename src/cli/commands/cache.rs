//! Cache command - inspect the buildpack cache

use crate::cache::{self, CacheEntry, CacheKey, CacheState};
use crate::cli::args::{CacheAction, CacheArgs, OutputFormat};
use crate::config::Config;
use crate::error::StageResult;
use crate::module::BuildpackDescriptor;
use crate::ui::{self, UiContext};
use console::style;
use std::path::Path;
use tracing::debug;

/// Execute the cache command
pub async fn execute(args: CacheArgs, config: &Config) -> StageResult<()> {
    match args.action {
        CacheAction::List { format } => list_entries(&config.cache.dir, format).await,
        CacheAction::Key { reference } => show_key(&config.cache.dir, &reference),
    }
}

/// Cache entry joined with its descriptor, when readable
struct Listed {
    entry: CacheEntry,
    id: Option<String>,
    version: Option<String>,
}

async fn list_entries(cache_root: &Path, format: OutputFormat) -> StageResult<()> {
    let entries = cache::list_entries(cache_root)?;

    let mut listed = Vec::with_capacity(entries.len());
    for entry in entries {
        let (id, version) = match entry.state {
            CacheState::Present => match BuildpackDescriptor::from_dir(&entry.path).await {
                Ok(d) => (Some(d.id().to_string()), d.version().map(str::to_string)),
                Err(e) => {
                    debug!(path = %entry.path.display(), "unreadable descriptor: {}", e);
                    (None, None)
                }
            },
            _ => (None, None),
        };
        listed.push(Listed { entry, id, version });
    }

    match format {
        OutputFormat::Table => print_table(cache_root, &listed),
        OutputFormat::Json => print_json(&listed)?,
        OutputFormat::Plain => {
            for l in &listed {
                println!("{}", l.entry.key);
            }
        }
    }

    Ok(())
}

fn print_table(cache_root: &Path, listed: &[Listed]) {
    if listed.is_empty() {
        println!("No cached buildpacks in {}.", cache_root.display());
        return;
    }

    println!(
        "{:<18} {:<40} {:<12} {:<9} {:<17}",
        "KEY", "BUILDPACK", "VERSION", "PACKAGED", "MODIFIED"
    );
    println!("{}", "-".repeat(100));

    for l in listed {
        let id = match l.entry.state {
            CacheState::Inconsistent => style("inconsistent (not a directory)").red().to_string(),
            _ => l.id.clone().unwrap_or_else(|| style("unknown").dim().to_string()),
        };
        let packaged = if l.entry.packaged { "yes" } else { "no" };
        let modified = l
            .entry
            .modified_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();

        println!(
            "{:<18} {:<40} {:<12} {:<9} {:<17}",
            l.entry.key,
            id,
            l.version.as_deref().unwrap_or("-"),
            packaged,
            modified
        );
    }

    println!();
    println!("Total: {} entr{}", listed.len(), if listed.len() == 1 { "y" } else { "ies" });
}

fn print_json(listed: &[Listed]) -> StageResult<()> {
    #[derive(serde::Serialize)]
    struct EntryJson<'a> {
        key: &'a str,
        path: String,
        state: CacheState,
        id: Option<&'a str>,
        version: Option<&'a str>,
        packaged: bool,
        modified_at: Option<String>,
    }

    let json: Vec<EntryJson> = listed
        .iter()
        .map(|l| EntryJson {
            key: &l.entry.key,
            path: l.entry.path.display().to_string(),
            state: l.entry.state,
            id: l.id.as_deref(),
            version: l.version.as_deref(),
            packaged: l.entry.packaged,
            modified_at: l.entry.modified_at.map(|t| t.to_rfc3339()),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn show_key(cache_root: &Path, reference: &str) -> StageResult<()> {
    let ctx = UiContext::detect();
    let key = CacheKey::of(reference);
    let path = key.entry_path(cache_root);
    let state = cache::probe(&path)?;

    ui::cache_lookup(&ctx, reference, &key, &path, state);
    Ok(())
}
