//! Command routing and execution

use crate::app::AppConfig;
use crate::cli::args::Commands;
use crate::cli::commands::*;
use crate::config::EngineConfig;
use crate::prompt::StdioPrompter;
use anyhow::Result;

/// Execute a CLI command. `Ok(false)` means the command ran but did not
/// succeed, e.g. a variable failed to resolve.
pub async fn execute_command(
    command: Commands,
    app: &AppConfig,
    config: &EngineConfig,
) -> Result<bool> {
    match command {
        Commands::Resolve {
            command,
            alias,
            shell,
            file,
            event,
            clipboard,
            set,
            prompt,
            json,
        } => {
            let request = ResolveRequest {
                command,
                alias,
                shell,
                file,
                event,
                clipboard,
                assignments: set,
                prompt,
            };
            let outcome = resolve(&request, app, config, &StdioPrompter::new()).await?;
            print_outcome(&outcome, json)?;
            Ok(outcome.succeeded)
        }
        Commands::Escape { value, shell } => {
            run_escape_command(&value, shell.as_deref(), config)?;
            Ok(true)
        }
        Commands::Variables { prefix } => {
            run_variables_command(prefix.as_deref(), app, config)?;
            Ok(true)
        }
    }
}
