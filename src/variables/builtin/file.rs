//! Variables derived from the active file

use crate::variables::helpers::{display_path, path_mode, require_active_file};
use crate::variables::{HostState, ParameterSpec, Variable, VariableFailure, VariableState};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

static PATH_MODE_PARAMETERS: Lazy<Vec<ParameterSpec>> =
    Lazy::new(|| vec![ParameterSpec::options("mode", ["absolute", "relative"])]);

static EXTENSION_PARAMETERS: Lazy<Vec<ParameterSpec>> =
    Lazy::new(|| vec![ParameterSpec::options("dot", ["with-dot", "no-dot"])]);

fn parent_folder<'a>(file: &'a Path, variable: &str) -> Result<&'a Path, VariableFailure> {
    file.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .ok_or_else(|| VariableFailure::for_token(variable, "the active file has no parent folder"))
}

/// `{{file_path:absolute|relative}}`
#[derive(Debug)]
pub struct FilePathVariable {
    host: Arc<HostState>,
    state: VariableState,
}

impl FilePathVariable {
    pub fn new(host: Arc<HostState>) -> Self {
        Self {
            host,
            state: VariableState::default(),
        }
    }
}

#[async_trait]
impl Variable for FilePathVariable {
    fn name(&self) -> &str {
        "file_path"
    }

    fn parameters(&self) -> &[ParameterSpec] {
        &PATH_MODE_PARAMETERS
    }

    fn help_text(&self) -> &str {
        "Path of the active file, absolute or relative to the working directory"
    }

    fn state(&self) -> &VariableState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut VariableState {
        &mut self.state
    }

    async fn generate_value(&mut self) -> Result<String, VariableFailure> {
        let file = require_active_file(&self.host, self.name())?;
        let mode = path_mode(self.arguments(), "mode", self.name())?;
        Ok(display_path(file, mode, &self.host.working_directory))
    }
}

/// `{{file_name}}`
#[derive(Debug)]
pub struct FileNameVariable {
    host: Arc<HostState>,
    state: VariableState,
}

impl FileNameVariable {
    pub fn new(host: Arc<HostState>) -> Self {
        Self {
            host,
            state: VariableState::default(),
        }
    }
}

#[async_trait]
impl Variable for FileNameVariable {
    fn name(&self) -> &str {
        "file_name"
    }

    fn help_text(&self) -> &str {
        "Name of the active file, with extension"
    }

    fn state(&self) -> &VariableState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut VariableState {
        &mut self.state
    }

    async fn generate_value(&mut self) -> Result<String, VariableFailure> {
        let file = require_active_file(&self.host, self.name())?;
        file.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| VariableFailure::for_token("file_name", "the active file has no name"))
    }
}

/// `{{file_extension:with-dot|no-dot}}`. Files without an extension yield an empty value.
#[derive(Debug)]
pub struct FileExtensionVariable {
    host: Arc<HostState>,
    state: VariableState,
}

impl FileExtensionVariable {
    pub fn new(host: Arc<HostState>) -> Self {
        Self {
            host,
            state: VariableState::default(),
        }
    }
}

#[async_trait]
impl Variable for FileExtensionVariable {
    fn name(&self) -> &str {
        "file_extension"
    }

    fn parameters(&self) -> &[ParameterSpec] {
        &EXTENSION_PARAMETERS
    }

    fn help_text(&self) -> &str {
        "Extension of the active file, with or without the leading dot"
    }

    fn state(&self) -> &VariableState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut VariableState {
        &mut self.state
    }

    async fn generate_value(&mut self) -> Result<String, VariableFailure> {
        let file = require_active_file(&self.host, self.name())?;
        let with_dot = self
            .arguments()
            .text("dot")
            .is_some_and(|dot| dot.eq_ignore_ascii_case("with-dot"));

        let extension = file
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();

        if with_dot && !extension.is_empty() {
            Ok(format!(".{}", extension))
        } else {
            Ok(extension)
        }
    }
}

/// `{{folder_path:absolute|relative}}`: the active file's parent folder
#[derive(Debug)]
pub struct FolderPathVariable {
    host: Arc<HostState>,
    state: VariableState,
}

impl FolderPathVariable {
    pub fn new(host: Arc<HostState>) -> Self {
        Self {
            host,
            state: VariableState::default(),
        }
    }
}

#[async_trait]
impl Variable for FolderPathVariable {
    fn name(&self) -> &str {
        "folder_path"
    }

    fn parameters(&self) -> &[ParameterSpec] {
        &PATH_MODE_PARAMETERS
    }

    fn help_text(&self) -> &str {
        "Folder containing the active file, absolute or relative to the working directory"
    }

    fn state(&self) -> &VariableState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut VariableState {
        &mut self.state
    }

    async fn generate_value(&mut self) -> Result<String, VariableFailure> {
        let file = require_active_file(&self.host, self.name())?;
        let folder = parent_folder(file, self.name())?;
        let mode = path_mode(self.arguments(), "mode", self.name())?;
        Ok(display_path(folder, mode, &self.host.working_directory))
    }
}

/// `{{folder_name}}`
#[derive(Debug)]
pub struct FolderNameVariable {
    host: Arc<HostState>,
    state: VariableState,
}

impl FolderNameVariable {
    pub fn new(host: Arc<HostState>) -> Self {
        Self {
            host,
            state: VariableState::default(),
        }
    }
}

#[async_trait]
impl Variable for FolderNameVariable {
    fn name(&self) -> &str {
        "folder_name"
    }

    fn help_text(&self) -> &str {
        "Name of the folder containing the active file"
    }

    fn state(&self) -> &VariableState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut VariableState {
        &mut self.state
    }

    async fn generate_value(&mut self) -> Result<String, VariableFailure> {
        let file = require_active_file(&self.host, self.name())?;
        let folder = parent_folder(file, self.name())?;
        folder
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| VariableFailure::for_token("folder_name", "the folder has no name"))
    }
}

/// `{{file_content}}`: the active file read from disk
#[derive(Debug)]
pub struct FileContentVariable {
    host: Arc<HostState>,
    state: VariableState,
}

impl FileContentVariable {
    pub fn new(host: Arc<HostState>) -> Self {
        Self {
            host,
            state: VariableState::default(),
        }
    }
}

#[async_trait]
impl Variable for FileContentVariable {
    fn name(&self) -> &str {
        "file_content"
    }

    fn help_text(&self) -> &str {
        "Full text content of the active file"
    }

    fn state(&self) -> &VariableState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut VariableState {
        &mut self.state
    }

    async fn generate_value(&mut self) -> Result<String, VariableFailure> {
        let file = require_active_file(&self.host, self.name())?.to_path_buf();
        debug!("Reading active file {}", file.display());
        tokio::fs::read_to_string(&file).await.map_err(|e| {
            VariableFailure::for_token(
                "file_content",
                format!("failed to read '{}': {}", file.display(), e),
            )
        })
    }
}
