//! Token grammar and match-pattern building
//!
//! A token is `{{`, an optional no-escape marker `!`, the variable name, zero
//! or more `:`-prefixed positional parameters, then `}}`. The pattern for a
//! variable is derived from its parameter schema:
//!
//! - required parameters become mandatory capture groups
//! - optional parameters become optional groups, so an omitted parameter has
//!   no capture at all rather than an empty one
//! - option parameters match only their declared literals
//! - string parameters match lazily up to the next delimiter
//! - integer parameters match one or more digits
//!
//! Matching is case-insensitive, for names and option literals alike.

use super::parameters::{ParameterKind, ParameterSpec, ParameterType};
use crate::error::{EngineError, Result};
use regex::Regex;
use std::ops::Range;

pub const TOKEN_OPEN: &str = "{{";
pub const TOKEN_CLOSE: &str = "}}";
pub const NO_ESCAPE_MARKER: char = '!';
pub const PARAMETER_SEPARATOR: char = ':';

/// Build the match pattern for a variable
pub fn build_pattern(name: &str, parameters: &[ParameterSpec]) -> Result<Regex> {
    let mut pattern = String::from(r"(?i)\{\{!?");
    pattern.push_str(&regex::escape(name));

    for parameter in parameters {
        let group = match parameter.kind(name)? {
            ParameterKind::Typed(ParameterType::String) => "(.+?)".to_string(),
            ParameterKind::Typed(ParameterType::Integer) => r"(\d+)".to_string(),
            ParameterKind::Options(options) => {
                let alternatives: Vec<String> =
                    options.iter().map(|option| regex::escape(option)).collect();
                format!("({})", alternatives.join("|"))
            }
        };

        if parameter.required {
            pattern.push(PARAMETER_SEPARATOR);
            pattern.push_str(&group);
        } else {
            pattern.push_str(&format!("(?:{}{})?", PARAMETER_SEPARATOR, group));
        }
    }

    pattern.push_str(r"\}\}");

    Regex::new(&pattern).map_err(|source| EngineError::InvalidPattern {
        variable: name.to_string(),
        source,
    })
}

/// Human-readable form of a variable's token, e.g. `{{file_path:absolute|relative}}`
/// or `{{newline[:count]}}`
pub fn synopsis(name: &str, parameters: &[ParameterSpec]) -> String {
    let mut synopsis = format!("{}{}", TOKEN_OPEN, name);
    for parameter in parameters {
        let shown = match &parameter.options {
            Some(options) if parameter.value_type.is_none() => options.join("|"),
            _ => parameter.name.clone(),
        };
        if parameter.required {
            synopsis.push_str(&format!("{}{}", PARAMETER_SEPARATOR, shown));
        } else {
            synopsis.push_str(&format!("[{}{}]", PARAMETER_SEPARATOR, shown));
        }
    }
    synopsis.push_str(TOKEN_CLOSE);
    synopsis
}

/// The literal token for a parameterless reference to `name`, used in messages
pub fn token(name: &str) -> String {
    format!("{}{}{}", TOKEN_OPEN, name, TOKEN_CLOSE)
}

/// One located occurrence of a variable's token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Byte range of the whole token in the scanned content
    pub range: Range<usize>,
    /// The whole matched token
    pub matched: String,
    /// False when the token carries the no-escape marker
    pub escape: bool,
    /// Raw captured arguments in schema order; `None` for omitted optionals
    pub arguments: Vec<Option<String>>,
}

/// Find every non-overlapping occurrence, left to right
pub fn find_matches(pattern: &Regex, content: &str) -> Vec<MatchResult> {
    pattern
        .captures_iter(content)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            let matched = whole.as_str();
            let escape = !matched[TOKEN_OPEN.len()..].starts_with(NO_ESCAPE_MARKER);
            let arguments = captures
                .iter()
                .skip(1)
                .map(|group| group.map(|m| m.as_str().to_string()))
                .collect();

            Some(MatchResult {
                range: whole.range(),
                matched: matched.to_string(),
                escape,
                arguments,
            })
        })
        .collect()
}
