//! `cmdvars resolve`
//!
//! Two phases: built-in variables first, then custom variables once the
//! optional prompt has answered.

use crate::app::AppConfig;
use crate::config::EngineConfig;
use crate::escaping::Shell;
use crate::parsing::{ParsingProcess, ParsingResult};
use crate::prompt::UserPrompter;
use crate::variables::{
    BuiltinVariables, CustomVariables, HostState, ResolutionContext, TriggerEvent,
    VariableProvider,
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

pub const COMMAND_KEY: &str = "command";
pub const ALIAS_KEY: &str = "alias";

#[derive(Debug, Clone, Default)]
pub struct ResolveRequest {
    pub command: String,
    pub alias: Option<String>,
    pub shell: Option<String>,
    pub file: Option<PathBuf>,
    pub event: Option<String>,
    pub clipboard: Option<String>,
    pub assignments: Vec<(String, String)>,
    pub prompt: bool,
}

impl ResolveRequest {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct KeyedResult {
    pub key: String,
    #[serde(flatten)]
    pub result: ParsingResult,
}

#[derive(Debug, Clone)]
pub struct ResolveOutcome {
    pub shell: Shell,
    pub succeeded: bool,
    pub results: Vec<KeyedResult>,
}

impl ResolveOutcome {
    pub fn get(&self, key: &str) -> Option<&ParsingResult> {
        self.results
            .iter()
            .find(|keyed| keyed.key == key)
            .map(|keyed| &keyed.result)
    }

    /// Messages of every key, duplicates removed
    pub fn error_messages(&self) -> Vec<&str> {
        let mut unique: Vec<&str> = Vec::new();
        for keyed in &self.results {
            for message in keyed.result.unique_error_messages() {
                if !unique.contains(&message) {
                    unique.push(message);
                }
            }
        }
        unique
    }
}

fn build_context(
    request: &ResolveRequest,
    app: &AppConfig,
    config: &EngineConfig,
) -> Result<ResolutionContext> {
    let identifier = request
        .shell
        .as_deref()
        .unwrap_or_else(|| config.shell_identifier());
    let shell = Shell::from_identifier(identifier)?;

    let mut host = HostState::capture(&app.working_dir);
    if let Some(file) = &request.file {
        host = host.with_active_file(file);
    }
    if let Some(text) = &request.clipboard {
        host = host.with_clipboard(text);
    }

    let mut context = ResolutionContext::new(shell, host);
    if let Some(event) = &request.event {
        context = context.with_event(TriggerEvent::new(event));
    }
    Ok(context)
}

/// Resolve the command, and the alias if any, through both phases
pub async fn resolve(
    request: &ResolveRequest,
    app: &AppConfig,
    config: &EngineConfig,
    prompter: &dyn UserPrompter,
) -> Result<ResolveOutcome> {
    let context = build_context(request, app, config)?;

    let mut process = ParsingProcess::new(context.shell);
    process.add_content(COMMAND_KEY, request.command.as_str())?;
    if let Some(alias) = &request.alias {
        process.add_content(ALIAS_KEY, alias.as_str())?;
    }
    for key in config.no_escape_keys() {
        process.skip_escaping(key);
    }

    process.push_variable_set(BuiltinVariables.variables_for(&context));
    let mut succeeded = process
        .advance_one_phase()
        .await
        .context("Failed to resolve built-in variables")?;

    if succeeded {
        let custom = custom_variables(request, config, prompter, &context).await?;
        debug!(
            "Resolving custom variables: {:?}",
            custom.names().collect::<Vec<_>>()
        );
        process.push_variable_set(custom.variables_for(&context));
        succeeded = process
            .advance_one_phase()
            .await
            .context("Failed to resolve custom variables")?;
    }

    info!(succeeded, "Resolution finished");
    let results = process
        .results()
        .into_iter()
        .map(|(key, result)| KeyedResult {
            key: key.to_string(),
            result: result.clone(),
        })
        .collect();

    Ok(ResolveOutcome {
        shell: context.shell,
        succeeded,
        results,
    })
}

/// Custom values in increasing precedence: configuration, declared prompt
/// fields, `--set`, prompt answers
async fn custom_variables(
    request: &ResolveRequest,
    config: &EngineConfig,
    prompter: &dyn UserPrompter,
    context: &ResolutionContext,
) -> Result<CustomVariables> {
    let mut custom = config.custom_variables();
    let prompt = config.prompt();
    for field in prompt.fields() {
        custom.declare(&field.variable);
    }
    custom.extend(request.assignments.iter().cloned().collect());

    if request.prompt && !prompt.is_empty() {
        let answers = prompt
            .ask(prompter, &BuiltinVariables, context)
            .await
            .context("Prompt failed")?;
        custom.extend(answers);
    }

    Ok(custom)
}

/// Print the outcome: resolved text on stdout (alias on stderr), or the
/// error messages on stderr
pub fn print_outcome(outcome: &ResolveOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.results)?);
        return Ok(());
    }

    if !outcome.succeeded {
        for message in outcome.error_messages() {
            eprintln!("{message}");
        }
        return Ok(());
    }

    if let Some(command) = outcome
        .get(COMMAND_KEY)
        .and_then(|result| result.parsed_content.as_deref())
    {
        println!("{command}");
    }
    if let Some(alias) = outcome
        .get(ALIAS_KEY)
        .and_then(|result| result.parsed_content.as_deref())
    {
        eprintln!("{alias}");
    }
    Ok(())
}
