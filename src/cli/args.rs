//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// packstage - buildpack acquisition cache and order generation
///
/// Fetches buildpacks into a content-addressed cache, writes the order file
/// consumed by the detect phase, and packages cached buildpacks as archives.
#[derive(Parser, Debug)]
#[command(name = "packstage")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PACKSTAGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Buildpack cache directory (overrides cache.dir)
    #[arg(long, global = true, env = "PACKSTAGE_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Log output format (overrides general.log_format)
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch buildpacks into the cache and write the order file
    Fetch(FetchArgs),

    /// Package cached buildpacks and print the rewritten references
    Translate(TranslateArgs),

    /// Write a deterministic .tgz of a directory
    Archive(ArchiveArgs),

    /// Inspect the buildpack cache
    Cache(CacheArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the fetch command
#[derive(Parser, Debug)]
pub struct FetchArgs {
    /// Buildpack references (paths, file:// URIs or http(s):// URLs)
    pub references: Vec<String>,

    /// Where to write order.toml (overrides order.path)
    #[arg(short, long, env = "PACKSTAGE_ORDER")]
    pub order: Option<PathBuf>,

    /// Put each buildpack in its own detection group
    #[arg(long)]
    pub auto_detect: bool,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the translate command
#[derive(Parser, Debug)]
pub struct TranslateArgs {
    /// Buildpack references as given to fetch
    pub references: Vec<String>,

    /// Output format
    #[arg(short, long, default_value = "plain")]
    pub format: OutputFormat,
}

/// Arguments for the archive command
#[derive(Parser, Debug)]
pub struct ArchiveArgs {
    /// Directory to archive
    pub source: PathBuf,

    /// Destination .tgz file
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// List cache entries
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show the cache key and entry path for a reference
    Key {
        /// Buildpack reference
        reference: String,
    },
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for listing commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Parse the `general.log_format` config value, defaulting to text
    pub fn from_config(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}
