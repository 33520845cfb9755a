//! Prompt pre-action
//!
//! A prompt runs between the built-in phase and the custom-variable phase. It
//! asks the user for a value per field and hands the answers back as
//! [`CustomVariables`] for the next phase. Field defaults may contain built-in
//! tokens; they are resolved (unescaped, since the user reads them) before
//! the question is asked.

use crate::parsing::ParsingProcess;
use crate::variables::{CustomVariables, ResolutionContext, VariableProvider};
use anyhow::{bail, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::Mutex;
use tracing::debug;

/// Trait for asking the user for text
#[async_trait]
pub trait UserPrompter: Send + Sync {
    /// Prompt for text input; an empty answer selects `default` when given
    async fn prompt_text(&self, message: &str, default: Option<&str>) -> Result<String>;
}

/// Prompter reading from stdin. Questions go to stderr so stdout stays clean
/// for the resolved command.
#[derive(Debug, Default)]
pub struct StdioPrompter;

impl StdioPrompter {
    pub fn new() -> Self {
        Self
    }

    fn read_line() -> Result<String> {
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim_end_matches(['\r', '\n']).to_string())
    }
}

#[async_trait]
impl UserPrompter for StdioPrompter {
    async fn prompt_text(&self, message: &str, default: Option<&str>) -> Result<String> {
        let mut stderr = io::stderr();
        match default {
            Some(default_value) => write!(stderr, "{message} [{default_value}]: ")?,
            None => write!(stderr, "{message}: ")?,
        }
        stderr.flush()?;

        let input = Self::read_line()?;
        match default {
            Some(default_value) if input.is_empty() => Ok(default_value.to_string()),
            _ => Ok(input),
        }
    }
}

/// Prompter that replays canned answers, for non-interactive runs and tests
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    responses: Mutex<VecDeque<String>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl UserPrompter for ScriptedPrompter {
    async fn prompt_text(&self, message: &str, default: Option<&str>) -> Result<String> {
        let response = self
            .responses
            .lock()
            .map_err(|_| anyhow::anyhow!("Prompt responses lock poisoned"))?
            .pop_front();

        match (response, default) {
            (Some(answer), Some(default_value)) if answer.is_empty() => {
                Ok(default_value.to_string())
            }
            (Some(answer), _) => Ok(answer),
            (None, Some(default_value)) => Ok(default_value.to_string()),
            (None, None) => bail!("No scripted answer for prompt '{}'", message),
        }
    }
}

/// One question of a prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptField {
    /// Custom variable receiving the answer; `_` is prepended when missing
    pub variable: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub default: Option<String>,
}

impl PromptField {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            label: None,
            default: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    fn message(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.variable)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Prompt {
    fields: Vec<PromptField>,
}

impl Prompt {
    pub fn new(fields: Vec<PromptField>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[PromptField] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Ask every field and collect the answers.
    ///
    /// `provider` supplies the variables that field defaults may use.
    pub async fn ask(
        &self,
        prompter: &dyn UserPrompter,
        provider: &dyn VariableProvider,
        context: &ResolutionContext,
    ) -> Result<CustomVariables> {
        let mut answers = CustomVariables::new();

        for field in &self.fields {
            let default = match &field.default {
                Some(default) => Some(resolve_default(field, default, provider, context).await?),
                None => None,
            };

            debug!("Prompting for {}", field.variable);
            let answer = prompter
                .prompt_text(field.message(), default.as_deref())
                .await?;
            answers.set(&field.variable, answer);
        }

        Ok(answers)
    }
}

async fn resolve_default(
    field: &PromptField,
    default: &str,
    provider: &dyn VariableProvider,
    context: &ResolutionContext,
) -> Result<String> {
    let mut process = ParsingProcess::new(context.shell);
    process.add_content("default", default)?;
    process.skip_escaping("default");
    process.push_variable_set(provider.variables_for(context));

    if process.advance_one_phase().await? {
        if let Some(parsed) = process
            .result("default")
            .and_then(|result| result.parsed_content.clone())
        {
            return Ok(parsed);
        }
    }

    bail!(
        "Could not resolve the default value of prompt field '{}': {}",
        field.variable,
        process.error_messages().join("; ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escaping::Shell;
    use crate::variables::{BuiltinVariables, HostState};

    fn context() -> ResolutionContext {
        ResolutionContext::new(Shell::Bash, HostState::new("/work").with_env("USER", "ada"))
    }

    #[tokio::test]
    async fn test_answers_become_custom_variables() {
        let prompt = Prompt::new(vec![
            PromptField::new("message").with_label("Commit message"),
            PromptField::new("_branch"),
        ]);
        let prompter = ScriptedPrompter::new(["fix typo", "main"]);

        let answers = prompt
            .ask(&prompter, &BuiltinVariables, &context())
            .await
            .unwrap();
        assert_eq!(answers.get("_message"), Some("fix typo"));
        assert_eq!(answers.get("_branch"), Some("main"));
    }

    #[tokio::test]
    async fn test_defaults_are_resolved_without_escaping() {
        let prompt = Prompt::new(vec![
            PromptField::new("author").with_default("{{environment:USER}} & co")
        ]);
        let prompter = ScriptedPrompter::new([""]);

        let answers = prompt
            .ask(&prompter, &BuiltinVariables, &context())
            .await
            .unwrap();
        assert_eq!(answers.get("author"), Some("ada & co"));
    }

    #[tokio::test]
    async fn test_unresolvable_default_is_an_error() {
        let prompt = Prompt::new(vec![
            PromptField::new("text").with_default("{{clipboard}}")
        ]);
        let prompter = ScriptedPrompter::new(["unused"]);

        let err = prompt
            .ask(&prompter, &BuiltinVariables, &context())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("clipboard is empty"));
    }

    #[tokio::test]
    async fn test_scripted_prompter_runs_out() {
        let prompter = ScriptedPrompter::new(Vec::<String>::new());
        assert!(prompter.prompt_text("Question", None).await.is_err());
        assert_eq!(
            prompter.prompt_text("Question", Some("fallback")).await.unwrap(),
            "fallback"
        );
    }
}
