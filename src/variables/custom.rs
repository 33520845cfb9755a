//! User-defined `{{_name}}` variables
//!
//! Custom variables get their values from configuration, the command line or
//! a prompt pre-action, which is why they are normally resolved in a later
//! phase than the built-ins.

use super::context::ResolutionContext;
use super::provider::VariableProvider;
use super::{Variable, VariableFailure, VariableSet, VariableState};
use async_trait::async_trait;
use std::collections::BTreeMap;

pub const CUSTOM_PREFIX: char = '_';

/// Add the `_` prefix when missing
pub fn normalize_custom_name(name: &str) -> String {
    let name = name.trim();
    if name.starts_with(CUSTOM_PREFIX) {
        name.to_string()
    } else {
        format!("{}{}", CUSTOM_PREFIX, name)
    }
}

#[derive(Debug)]
pub struct CustomVariable {
    name: String,
    value: Option<String>,
    state: VariableState,
}

impl CustomVariable {
    pub fn new(name: &str, value: Option<String>) -> Self {
        Self {
            name: normalize_custom_name(name),
            value,
            state: VariableState::default(),
        }
    }
}

#[async_trait]
impl Variable for CustomVariable {
    fn name(&self) -> &str {
        &self.name
    }

    fn help_text(&self) -> &str {
        "Custom variable"
    }

    fn state(&self) -> &VariableState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut VariableState {
        &mut self.state
    }

    async fn generate_value(&mut self) -> Result<String, VariableFailure> {
        self.value
            .clone()
            .ok_or_else(|| VariableFailure::for_token(&self.name, "custom variable has no value"))
    }
}

/// Declared custom variables and their values, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomVariables {
    values: BTreeMap<String, Option<String>>,
}

impl CustomVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable without giving it a value. An existing value is kept.
    pub fn declare(&mut self, name: &str) {
        self.values.entry(normalize_custom_name(name)).or_insert(None);
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values
            .insert(normalize_custom_name(name), Some(value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(&normalize_custom_name(name))
            .and_then(|value| value.as_deref())
    }

    /// Later values win
    pub fn extend(&mut self, other: CustomVariables) {
        for (name, value) in other.values {
            match value {
                Some(value) => {
                    self.values.insert(name, Some(value));
                }
                None => {
                    self.values.entry(name).or_insert(None);
                }
            }
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse a `name=value` assignment
    pub fn parse_assignment(assignment: &str) -> Option<(String, String)> {
        let (name, value) = assignment.split_once('=')?;
        let name = name.trim();
        if name.is_empty() || name == "_" {
            return None;
        }
        Some((normalize_custom_name(name), value.to_string()))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for CustomVariables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut custom = CustomVariables::new();
        for (name, value) in iter {
            custom.set(name.as_ref(), value);
        }
        custom
    }
}

impl VariableProvider for CustomVariables {
    fn variables_for(&self, _context: &ResolutionContext) -> VariableSet {
        self.values
            .iter()
            .map(|(name, value)| Box::new(CustomVariable::new(name, value.clone())) as Box<dyn Variable>)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_prefixed() {
        assert_eq!(normalize_custom_name("project"), "_project");
        assert_eq!(normalize_custom_name("_project"), "_project");
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            CustomVariables::parse_assignment("msg=a=b"),
            Some(("_msg".to_string(), "a=b".to_string()))
        );
        assert_eq!(CustomVariables::parse_assignment("novalue"), None);
        assert_eq!(CustomVariables::parse_assignment("=x"), None);
    }

    #[test]
    fn test_extend_prefers_later_values_but_keeps_declared_ones() {
        let mut base: CustomVariables = [("a", "1"), ("b", "2")].into_iter().collect();
        let mut other = CustomVariables::new();
        other.set("a", "override");
        other.declare("b");
        other.declare("c");

        base.extend(other);
        assert_eq!(base.get("a"), Some("override"));
        assert_eq!(base.get("b"), Some("2"));
        assert_eq!(base.get("c"), None);
        assert_eq!(base.names().collect::<Vec<_>>(), ["_a", "_b", "_c"]);
    }

    #[tokio::test]
    async fn test_declared_variable_without_value_fails() {
        let mut variable = CustomVariable::new("message", None);
        let failure = variable.generate_value().await.unwrap_err();
        assert_eq!(failure.messages(), ["{{_message}}: custom variable has no value"]);
    }
}
