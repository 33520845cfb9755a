use anyhow::{bail, Result};
use clap::Parser;
use cmdvars::app::{handle_fatal_error, init_logging, AppConfig};
use cmdvars::cli::{execute_command, Cli};
use cmdvars::config::{ConfigLoader, EngineConfig};
use tracing::debug;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => handle_fatal_error(e, verbose),
    }
}

async fn run(cli: Cli) -> Result<bool> {
    let app = AppConfig::new(cli.verbose)?;
    let config = load_config(&app, cli.config).await?;
    init_logging(&app, config.log_level.as_deref());
    debug!("Using shell '{}'", config.shell_identifier());

    execute_command(cli.command, &app, &config).await
}

async fn load_config(app: &AppConfig, explicit: Option<std::path::PathBuf>) -> Result<EngineConfig> {
    let mut loader = ConfigLoader::new(&app.working_dir);
    if let Some(path) = explicit {
        if !path.exists() {
            bail!("Config file not found: {}", path.display());
        }
        loader = loader.with_global_path(Some(path));
    }
    loader.load().await
}
