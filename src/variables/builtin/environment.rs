use crate::variables::{HostState, ParameterSpec, Variable, VariableFailure, VariableState};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::sync::Arc;

static PARAMETERS: Lazy<Vec<ParameterSpec>> =
    Lazy::new(|| vec![ParameterSpec::string("variable")]);

/// `{{environment:NAME}}` reads from the captured process environment
#[derive(Debug)]
pub struct EnvironmentVariable {
    host: Arc<HostState>,
    state: VariableState,
}

impl EnvironmentVariable {
    pub fn new(host: Arc<HostState>) -> Self {
        Self {
            host,
            state: VariableState::default(),
        }
    }
}

#[async_trait]
impl Variable for EnvironmentVariable {
    fn name(&self) -> &str {
        "environment"
    }

    fn parameters(&self) -> &[ParameterSpec] {
        &PARAMETERS
    }

    fn help_text(&self) -> &str {
        "Value of an environment variable"
    }

    fn state(&self) -> &VariableState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut VariableState {
        &mut self.state
    }

    async fn generate_value(&mut self) -> Result<String, VariableFailure> {
        let name = self
            .arguments()
            .text("variable")
            .ok_or_else(|| VariableFailure::for_token("environment", "variable name is missing"))?;

        self.host.environment.get(&name).cloned().ok_or_else(|| {
            VariableFailure::for_token(
                "environment",
                format!("environment variable '{}' is not set", name),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_captured_environment() {
        let host = Arc::new(HostState::new("/work").with_env("EDITOR", "vim"));
        let mut variable = EnvironmentVariable::new(host);
        variable.set_argument("variable", "EDITOR");
        assert_eq!(variable.generate_value().await.unwrap(), "vim");
    }

    #[tokio::test]
    async fn test_unset_variable_fails() {
        let mut variable = EnvironmentVariable::new(Arc::new(HostState::new("/work")));
        variable.set_argument("variable", "MISSING");
        let failure = variable.generate_value().await.unwrap_err();
        assert_eq!(
            failure.messages(),
            ["{{environment}}: environment variable 'MISSING' is not set"]
        );
    }
}
