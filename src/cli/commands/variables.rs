//! `cmdvars variables`

use crate::app::AppConfig;
use crate::config::EngineConfig;
use crate::variables::{BuiltinVariables, HostState, ResolutionContext, VariableCatalog};
use anyhow::Result;

/// Catalog of built-in variables and the configured custom ones
pub fn catalog_for(app: &AppConfig, config: &EngineConfig) -> Result<VariableCatalog> {
    let shell = config.resolve_shell()?;
    let context = ResolutionContext::new(shell, HostState::new(&app.working_dir));

    let mut custom = config.custom_variables();
    for field in &config.prompt {
        custom.declare(&field.variable);
    }

    Ok(VariableCatalog::build(&[&BuiltinVariables, &custom], &context))
}

pub fn run_variables_command(
    prefix: Option<&str>,
    app: &AppConfig,
    config: &EngineConfig,
) -> Result<()> {
    let catalog = catalog_for(app, config)?;
    let entries = match prefix {
        Some(prefix) => catalog.autocomplete(prefix),
        None => catalog.entries().iter().collect(),
    };

    let width = entries
        .iter()
        .map(|entry| entry.synopsis.len())
        .max()
        .unwrap_or(0);
    for entry in entries {
        println!("{:<width$}  {}", entry.synopsis, entry.help_text);
    }
    Ok(())
}
