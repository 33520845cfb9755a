//! Variable catalog for documentation and autocomplete
//!
//! The catalog is built once from the providers in use and passed to whatever
//! needs to list variables. Nothing registers itself globally.

use super::context::ResolutionContext;
use super::pattern::{NO_ESCAPE_MARKER, TOKEN_OPEN};
use super::provider::VariableProvider;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub name: String,
    pub synopsis: String,
    pub help_text: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VariableCatalog {
    entries: Vec<CatalogEntry>,
}

impl VariableCatalog {
    /// Build the catalog from providers in order. The first provider to offer
    /// a name wins.
    pub fn build(providers: &[&dyn VariableProvider], context: &ResolutionContext) -> Self {
        let mut entries: Vec<CatalogEntry> = Vec::new();
        for provider in providers {
            for variable in provider.variables_for(context) {
                if entries
                    .iter()
                    .any(|entry| entry.name.eq_ignore_ascii_case(variable.name()))
                {
                    continue;
                }
                entries.push(CatalogEntry {
                    name: variable.name().to_string(),
                    synopsis: variable.synopsis(),
                    help_text: variable.help_text().to_string(),
                });
            }
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    /// Entries whose name starts with what has been typed so far.
    ///
    /// `input` may include the opening braces and no-escape marker, so both
    /// `file_` and `{{!file_` complete to the file variables.
    pub fn autocomplete(&self, input: &str) -> Vec<&CatalogEntry> {
        let typed = input.trim_start();
        let typed = typed.strip_prefix(TOKEN_OPEN).unwrap_or(typed);
        let typed = typed.strip_prefix(NO_ESCAPE_MARKER).unwrap_or(typed);
        let typed = typed.to_lowercase();

        self.entries
            .iter()
            .filter(|entry| entry.name.to_lowercase().starts_with(&typed))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escaping::Shell;
    use crate::variables::{BuiltinVariables, CustomVariables, HostState};

    fn catalog() -> VariableCatalog {
        let context = ResolutionContext::new(Shell::Bash, HostState::new("/work"));
        let custom: CustomVariables = [("project", "demo")].into_iter().collect();
        VariableCatalog::build(&[&BuiltinVariables, &custom], &context)
    }

    #[test]
    fn test_contains_builtin_and_custom_entries() {
        let catalog = catalog();
        assert!(catalog.get("date").is_some());
        assert!(catalog.get("_project").is_some());
        assert_eq!(
            catalog.get("file_path").unwrap().synopsis,
            "{{file_path:absolute|relative}}"
        );
    }

    #[test]
    fn test_autocomplete_strips_token_prefix() {
        let catalog = catalog();
        let names: Vec<&str> = catalog
            .autocomplete("{{!folder_")
            .into_iter()
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(names, ["folder_path", "folder_name"]);
    }

    #[test]
    fn test_autocomplete_empty_input_lists_everything() {
        let catalog = catalog();
        assert_eq!(catalog.autocomplete("").len(), catalog.len());
    }
}
