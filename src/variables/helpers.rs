//! Preconditions and formatting shared by variable implementations

use super::context::{HostState, TriggerEvent};
use super::{Arguments, VariableFailure};
use std::path::{Path, PathBuf};

/// How a path-valued variable renders its path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMode {
    Absolute,
    Relative,
}

/// The active file, or a failure naming `variable`
pub fn require_active_file<'a>(
    host: &'a HostState,
    variable: &str,
) -> Result<&'a Path, VariableFailure> {
    host.active_file
        .as_deref()
        .ok_or_else(|| VariableFailure::for_token(variable, "no file is active"))
}

/// The triggering event, or a failure naming `variable`
pub fn require_event<'a>(
    event: Option<&'a TriggerEvent>,
    variable: &str,
) -> Result<&'a TriggerEvent, VariableFailure> {
    event.ok_or_else(|| {
        VariableFailure::for_token(variable, "only available when triggered by an event")
    })
}

/// Non-empty clipboard text, or a failure naming `variable`
pub fn require_clipboard<'a>(host: &'a HostState, variable: &str) -> Result<&'a str, VariableFailure> {
    match host.clipboard.as_deref() {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(VariableFailure::for_token(variable, "clipboard is empty")),
    }
}

/// Parse a path-mode argument. The pattern only admits the declared literals,
/// in any letter case.
pub fn path_mode(
    arguments: &Arguments,
    parameter: &str,
    variable: &str,
) -> Result<PathMode, VariableFailure> {
    match arguments.text(parameter).map(|mode| mode.to_lowercase()).as_deref() {
        Some("absolute") => Ok(PathMode::Absolute),
        Some("relative") => Ok(PathMode::Relative),
        Some(other) => Err(VariableFailure::for_token(
            variable,
            format!("unknown path mode '{}'", other),
        )),
        None => Err(VariableFailure::for_token(variable, "path mode is missing")),
    }
}

/// Render `path` absolute, or relative to `base` when it lies inside it
pub fn display_path(path: &Path, mode: PathMode, base: &Path) -> String {
    let absolute: PathBuf = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    match mode {
        PathMode::Absolute => absolute.display().to_string(),
        PathMode::Relative => match absolute.strip_prefix(base) {
            Ok(relative) if relative.as_os_str().is_empty() => ".".to_string(),
            Ok(relative) => relative.display().to_string(),
            Err(_) => absolute.display().to_string(),
        },
    }
}
