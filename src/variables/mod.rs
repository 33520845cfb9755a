//! Variables: the unit of substitution
//!
//! A [`Variable`] declares a name and a parameter schema, receives parsed
//! arguments for each occurrence of its token, and generates a value
//! asynchronously. Per-occurrence state (arguments and error messages) lives in
//! a [`VariableState`] that the pattern matcher resets before every occurrence.
//!
//! Concrete variables are independent structs. Shared preconditions such as
//! "an active file is required" are plain functions in [`helpers`] that each
//! variable calls explicitly.

pub mod builtin;
pub mod catalog;
pub mod context;
pub mod custom;
pub mod helpers;
pub mod parameters;
pub mod pattern;
pub mod provider;

pub use catalog::{CatalogEntry, VariableCatalog};
pub use context::{HostState, ResolutionContext, TriggerEvent};
pub use custom::{normalize_custom_name, CustomVariable, CustomVariables};
pub use parameters::{ParameterKind, ParameterSpec, ParameterType};
pub use pattern::{build_pattern, find_matches, MatchResult};
pub use provider::{BuiltinVariables, VariableProvider};

use crate::error::Result;
use async_trait::async_trait;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

/// An ordered set of variables resolved together in one phase
pub type VariableSet = Vec<Box<dyn Variable>>;

/// A parsed argument value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentValue {
    Text(String),
    Integer(i64),
}

impl fmt::Display for ArgumentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentValue::Text(text) => f.write_str(text),
            ArgumentValue::Integer(n) => write!(f, "{}", n),
        }
    }
}

/// Arguments parsed for the occurrence currently being resolved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    values: HashMap<String, ArgumentValue>,
}

impl Arguments {
    pub fn insert(&mut self, name: impl Into<String>, value: ArgumentValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&ArgumentValue> {
        self.values.get(name)
    }

    /// Text form of an argument, whatever its parsed type
    pub fn text(&self, name: &str) -> Option<String> {
        self.values.get(name).map(ToString::to_string)
    }

    /// Integer argument. `Some(Err(raw))` when the schema asked for an integer
    /// but the captured digits did not fit.
    pub fn integer(&self, name: &str) -> Option<std::result::Result<i64, &str>> {
        match self.values.get(name)? {
            ArgumentValue::Integer(n) => Some(Ok(*n)),
            ArgumentValue::Text(raw) => Some(Err(raw.as_str())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// Mutable per-occurrence state carried by every variable
#[derive(Debug, Clone, Default)]
pub struct VariableState {
    pub arguments: Arguments,
    pub error_messages: Vec<String>,
}

impl VariableState {
    pub fn clear(&mut self) {
        self.arguments.clear();
        self.error_messages.clear();
    }
}

/// Expected failure of value generation, with user-facing messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableFailure {
    messages: Vec<String>,
}

impl VariableFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    /// Failure message prefixed with the token it concerns
    pub fn for_token(name: &str, message: impl fmt::Display) -> Self {
        Self::new(format!("{}: {}", pattern::token(name), message))
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

impl fmt::Display for VariableFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages.join("; "))
    }
}

/// Contract every resolvable placeholder type implements
#[async_trait]
pub trait Variable: Send + Sync {
    /// Token name, matched case-insensitively
    fn name(&self) -> &str;

    /// Positional parameters in token order
    fn parameters(&self) -> &[ParameterSpec] {
        &[]
    }

    /// One-line description for catalogs and autocomplete
    fn help_text(&self) -> &str {
        ""
    }

    fn state(&self) -> &VariableState;

    fn state_mut(&mut self) -> &mut VariableState;

    /// Produce the value for the current arguments.
    ///
    /// Expected failures (missing host state, unusable arguments) are returned
    /// as [`VariableFailure`], never raised. Implementations are responsible for
    /// bounding any waiting they do.
    async fn generate_value(&mut self) -> std::result::Result<String, VariableFailure>;

    fn build_pattern(&self) -> Result<Regex> {
        pattern::build_pattern(self.name(), self.parameters())
    }

    /// Store a raw captured argument, converting integers where the schema says so.
    /// Digits that do not fit an `i64` are kept as text for `generate_value` to judge.
    fn set_argument(&mut self, parameter: &str, raw: &str) {
        let is_integer = self
            .parameters()
            .iter()
            .any(|spec| spec.name == parameter && spec.is_integer());

        let value = if is_integer {
            raw.parse::<i64>()
                .map(ArgumentValue::Integer)
                .unwrap_or_else(|_| ArgumentValue::Text(raw.to_string()))
        } else {
            ArgumentValue::Text(raw.to_string())
        };

        self.state_mut().arguments.insert(parameter, value);
    }

    fn arguments(&self) -> &Arguments {
        &self.state().arguments
    }

    fn error_messages(&self) -> &[String] {
        &self.state().error_messages
    }

    /// Append a failure's messages to this variable's error list
    fn record_failure(&mut self, failure: VariableFailure) {
        let mut messages = failure.into_messages();
        if messages.is_empty() {
            messages.push(format!("{}: no value could be generated", pattern::token(self.name())));
        }
        self.state_mut().error_messages.extend(messages);
    }

    /// Clear arguments and errors before the next occurrence
    fn reset(&mut self) {
        self.state_mut().clear();
    }

    fn synopsis(&self) -> String {
        pattern::synopsis(self.name(), self.parameters())
    }
}
