use crate::variables::{HostState, Variable, VariableFailure, VariableState};
use async_trait::async_trait;
use std::sync::Arc;

/// `{{workspace_path}}`: absolute path of the working directory
#[derive(Debug)]
pub struct WorkspacePathVariable {
    host: Arc<HostState>,
    state: VariableState,
}

impl WorkspacePathVariable {
    pub fn new(host: Arc<HostState>) -> Self {
        Self {
            host,
            state: VariableState::default(),
        }
    }
}

#[async_trait]
impl Variable for WorkspacePathVariable {
    fn name(&self) -> &str {
        "workspace_path"
    }

    fn help_text(&self) -> &str {
        "Absolute path of the working directory"
    }

    fn state(&self) -> &VariableState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut VariableState {
        &mut self.state
    }

    async fn generate_value(&mut self) -> Result<String, VariableFailure> {
        Ok(self.host.working_directory.display().to_string())
    }
}
