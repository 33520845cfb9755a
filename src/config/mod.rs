//! Engine configuration
//!
//! Settings are layered, later layers overriding earlier ones: built-in
//! defaults, the global `config.toml`, the project `.cmdvars.toml`, then the
//! `CMDVARS_*` environment variables. Command-line flags are applied last by
//! the CLI itself.

pub mod loader;

pub use loader::ConfigLoader;

use crate::escaping::Shell;
use crate::prompt::{Prompt, PromptField};
use crate::variables::{normalize_custom_name, CustomVariables};
use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const PROJECT_CONFIG_FILE_NAME: &str = ".cmdvars.toml";
pub const ENV_SHELL: &str = "CMDVARS_SHELL";
pub const ENV_LOG_LEVEL: &str = "CMDVARS_LOG_LEVEL";

/// Directory holding the global configuration file
pub fn global_config_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "cmdvars", "cmdvars")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| anyhow!("Could not determine home directory"))
}

/// Content keys left unescaped when no layer sets `no_escape_keys`
pub const DEFAULT_NO_ESCAPE_KEYS: &[&str] = &["alias"];

fn normalize_keys(variables: BTreeMap<String, String>) -> BTreeMap<String, String> {
    variables
        .into_iter()
        .map(|(name, value)| (normalize_custom_name(&name), value))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Destination shell identifier, e.g. `bash` or `/usr/bin/zsh`
    pub shell: Option<String>,
    pub log_level: Option<String>,
    /// Content keys that are displayed rather than executed; `None` until a
    /// layer sets them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_escape_keys: Option<Vec<String>>,
    pub custom_variables: BTreeMap<String, String>,
    pub prompt: Vec<PromptField>,
}

impl EngineConfig {
    /// Layer `other` on top of this configuration.
    ///
    /// Scalars and `no_escape_keys` are replaced when set, custom variables
    /// are merged key by key under their `_`-prefixed names, and a non-empty
    /// prompt replaces the whole field list.
    pub fn overlay(mut self, other: EngineConfig) -> Self {
        if other.shell.is_some() {
            self.shell = other.shell;
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
        if other.no_escape_keys.is_some() {
            self.no_escape_keys = other.no_escape_keys;
        }
        let mut custom_variables = normalize_keys(std::mem::take(&mut self.custom_variables));
        custom_variables.extend(normalize_keys(other.custom_variables));
        self.custom_variables = custom_variables;
        if !other.prompt.is_empty() {
            self.prompt = other.prompt;
        }
        self
    }

    /// Apply overrides from an environment lookup
    pub fn merge_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(shell) = lookup(ENV_SHELL).filter(|value| !value.trim().is_empty()) {
            self.shell = Some(shell);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|value| !value.trim().is_empty()) {
            self.log_level = Some(level);
        }
    }

    pub fn merge_env_vars(&mut self) {
        self.merge_env_with(|key| std::env::var(key).ok());
    }

    /// Configured shell identifier, or the platform's usual shell
    pub fn shell_identifier(&self) -> &str {
        match &self.shell {
            Some(shell) => shell,
            None if cfg!(windows) => "powershell",
            None => "bash",
        }
    }

    /// Configured no-escape keys, or the default `alias`
    pub fn no_escape_keys(&self) -> Vec<&str> {
        match &self.no_escape_keys {
            Some(keys) => keys.iter().map(String::as_str).collect(),
            None => DEFAULT_NO_ESCAPE_KEYS.to_vec(),
        }
    }

    pub fn resolve_shell(&self) -> crate::error::Result<Shell> {
        Shell::from_identifier(self.shell_identifier())
    }

    pub fn custom_variables(&self) -> CustomVariables {
        self.custom_variables.iter().collect()
    }

    pub fn prompt(&self) -> Prompt {
        Prompt::new(self.prompt.clone())
    }
}
