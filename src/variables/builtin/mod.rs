//! Built-in variables available in every resolution context

mod clipboard;
mod date;
mod environment;
mod event;
mod file;
mod text;
mod workspace;

pub use clipboard::ClipboardVariable;
pub use date::{format_moment, moment_to_strftime, DateVariable};
pub use environment::EnvironmentVariable;
pub use event::EventTypeVariable;
pub use file::{
    FileContentVariable, FileExtensionVariable, FileNameVariable, FilePathVariable,
    FolderNameVariable, FolderPathVariable,
};
pub use text::{NewlineVariable, PassthroughVariable, UuidVariable};
pub use workspace::WorkspacePathVariable;

use super::context::ResolutionContext;
use super::VariableSet;

/// Fresh instances of every built-in variable, in resolution order
pub fn builtin_variables(context: &ResolutionContext) -> VariableSet {
    let host = &context.host;
    vec![
        Box::new(DateVariable::new()),
        Box::new(EnvironmentVariable::new(host.clone())),
        Box::new(WorkspacePathVariable::new(host.clone())),
        Box::new(FilePathVariable::new(host.clone())),
        Box::new(FileNameVariable::new(host.clone())),
        Box::new(FileExtensionVariable::new(host.clone())),
        Box::new(FolderPathVariable::new(host.clone())),
        Box::new(FolderNameVariable::new(host.clone())),
        Box::new(FileContentVariable::new(host.clone())),
        Box::new(ClipboardVariable::new(host.clone())),
        Box::new(EventTypeVariable::new(context.event.clone())),
        Box::new(NewlineVariable::new()),
        Box::new(UuidVariable::new()),
        Box::new(PassthroughVariable::new()),
    ]
}
