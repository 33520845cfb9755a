//! Resolution context handed to variable providers
//!
//! Host state is snapshotted once per resolution so that every variable in
//! every phase sees the same working directory, environment and active file.

use crate::escaping::Shell;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Snapshot of the host application state variables read from
#[derive(Debug, Clone, Default)]
pub struct HostState {
    pub working_directory: PathBuf,
    pub environment: HashMap<String, String>,
    pub active_file: Option<PathBuf>,
    pub clipboard: Option<String>,
}

impl HostState {
    pub fn new(working_directory: impl Into<PathBuf>) -> Self {
        Self {
            working_directory: working_directory.into(),
            ..Self::default()
        }
    }

    /// Capture the current process environment
    pub fn capture(working_directory: impl Into<PathBuf>) -> Self {
        Self {
            working_directory: working_directory.into(),
            environment: std::env::vars().collect(),
            active_file: None,
            clipboard: None,
        }
    }

    /// Set the active file. Relative paths are taken relative to the working directory.
    pub fn with_active_file(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.active_file = Some(if path.is_absolute() {
            path
        } else {
            self.working_directory.join(path)
        });
        self
    }

    pub fn with_clipboard(mut self, text: impl Into<String>) -> Self {
        self.clipboard = Some(text.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }
}

/// The event that triggered a command, when it was not run by hand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerEvent {
    pub event_type: String,
}

impl TriggerEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
        }
    }
}

/// Everything a provider needs to decide which variables exist and how they behave
#[derive(Debug, Clone)]
pub struct ResolutionContext {
    pub shell: Shell,
    pub event: Option<TriggerEvent>,
    pub host: Arc<HostState>,
}

impl ResolutionContext {
    pub fn new(shell: Shell, host: HostState) -> Self {
        Self {
            shell,
            event: None,
            host: Arc::new(host),
        }
    }

    pub fn with_event(mut self, event: TriggerEvent) -> Self {
        self.event = Some(event);
        self
    }
}
