//! Application configuration
//!
//! Settings taken from the command line before any file is loaded.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Application configuration structure
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
    /// Working directory, used as the workspace path and project config location
    pub working_dir: PathBuf,
}

impl AppConfig {
    pub fn new(verbose: u8) -> Result<Self> {
        let working_dir =
            std::env::current_dir().context("Failed to get current directory")?;

        Ok(Self {
            verbose,
            working_dir,
        })
    }

    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = dir;
        self
    }

    /// Log filter for the current verbosity.
    ///
    /// A configured level wins when no `-v` flag was given.
    pub fn log_level(&self, configured: Option<&str>) -> String {
        match (self.verbose, configured) {
            (0, Some(level)) if !level.trim().is_empty() => level.to_string(),
            (0, _) => "warn".to_string(),
            (1, _) => "info".to_string(),
            (2, _) => "debug".to_string(),
            _ => "trace".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            verbose: 0,
            working_dir: PathBuf::from("."),
        }
    }
}
