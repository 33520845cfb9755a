//! Parameter schemas for variables
//!
//! Every parameter is declared with exactly one of a value type or a fixed
//! option list. The fields are kept separate (rather than folded into one
//! enum) so that schemas loaded from configuration can be checked for the
//! both/neither mistake when the match pattern is built.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Value type for free-form parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Integer,
}

/// Declaration of one positional parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ParameterType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub required: bool,
}

/// Validated view of a parameter's kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind<'a> {
    Typed(ParameterType),
    Options(&'a [String]),
}

impl ParameterSpec {
    /// Required free-text parameter
    pub fn string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: Some(ParameterType::String),
            options: None,
            required: true,
        }
    }

    /// Required integer parameter
    pub fn integer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: Some(ParameterType::Integer),
            options: None,
            required: true,
        }
    }

    /// Required parameter restricted to a fixed set of literal options
    pub fn options<I, S>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            value_type: None,
            options: Some(options.into_iter().map(Into::into).collect()),
            required: true,
        }
    }

    /// Mark the parameter as optional
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Check the declaration and return its kind.
    ///
    /// `variable` is only used to name the culprit in the error.
    pub fn kind(&self, variable: &str) -> Result<ParameterKind<'_>> {
        match (&self.value_type, &self.options) {
            (Some(_), Some(_)) => Err(EngineError::invalid_parameter(
                variable,
                &self.name,
                "declares both a type and options",
            )),
            (None, None) => Err(EngineError::invalid_parameter(
                variable,
                &self.name,
                "declares neither a type nor options",
            )),
            (None, Some(options)) if options.is_empty() => Err(EngineError::invalid_parameter(
                variable,
                &self.name,
                "declares an empty option list",
            )),
            (None, Some(options)) => Ok(ParameterKind::Options(options)),
            (Some(value_type), None) => Ok(ParameterKind::Typed(*value_type)),
        }
    }

    pub fn is_integer(&self) -> bool {
        self.value_type == Some(ParameterType::Integer) && self.options.is_none()
    }
}
