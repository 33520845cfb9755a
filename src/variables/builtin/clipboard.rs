use crate::variables::helpers::require_clipboard;
use crate::variables::{HostState, Variable, VariableFailure, VariableState};
use async_trait::async_trait;
use std::sync::Arc;

/// `{{clipboard}}`: clipboard text captured with the host state
#[derive(Debug)]
pub struct ClipboardVariable {
    host: Arc<HostState>,
    state: VariableState,
}

impl ClipboardVariable {
    pub fn new(host: Arc<HostState>) -> Self {
        Self {
            host,
            state: VariableState::default(),
        }
    }
}

#[async_trait]
impl Variable for ClipboardVariable {
    fn name(&self) -> &str {
        "clipboard"
    }

    fn help_text(&self) -> &str {
        "Text currently on the clipboard"
    }

    fn state(&self) -> &VariableState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut VariableState {
        &mut self.state
    }

    async fn generate_value(&mut self) -> Result<String, VariableFailure> {
        require_clipboard(&self.host, self.name()).map(str::to_string)
    }
}
