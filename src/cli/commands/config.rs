//! Config command - show or initialize configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager, InitOutcome};
use crate::error::StageResult;
use crate::ui::{self, UiContext};

/// Execute the config command
pub async fn execute(args: ConfigArgs, config: &Config, manager: &ConfigManager) -> StageResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => show_path(manager),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
    }

    Ok(())
}

fn show_config(config: &Config) -> StageResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

async fn init_config(manager: &ConfigManager, force: bool) -> StageResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    match manager.init(force).await? {
        InitOutcome::Written => ui::written(&ctx, "Configuration initialized at", path),
        InitOutcome::Kept => ui::notice(
            &ctx,
            &format!("Config already exists at {}", path.display()),
            Some("use --force to overwrite"),
        ),
    }

    Ok(())
}
