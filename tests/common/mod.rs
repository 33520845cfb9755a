//! Common test utilities and helpers

#![allow(dead_code)]

use async_trait::async_trait;
use cmdvars::variables::{ParameterSpec, Variable, VariableFailure, VariableState};

/// Variable with a fixed outcome
pub struct FixedVariable {
    name: String,
    outcome: Result<String, String>,
    parameters: Vec<ParameterSpec>,
    state: VariableState,
}

impl FixedVariable {
    pub fn ok(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            outcome: Ok(value.to_string()),
            parameters: Vec::new(),
            state: VariableState::default(),
        }
    }

    pub fn failing(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            outcome: Err(message.to_string()),
            parameters: Vec::new(),
            state: VariableState::default(),
        }
    }

    pub fn with_parameter(mut self, spec: ParameterSpec) -> Self {
        self.parameters.push(spec);
        self
    }

    pub fn boxed(self) -> Box<dyn Variable> {
        Box::new(self)
    }
}

#[async_trait]
impl Variable for FixedVariable {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    fn state(&self) -> &VariableState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut VariableState {
        &mut self.state
    }

    async fn generate_value(&mut self) -> Result<String, VariableFailure> {
        self.outcome.clone().map_err(VariableFailure::new)
    }
}

/// Variable echoing its first argument back, or `default` when it was omitted
pub struct EchoVariable {
    parameters: Vec<ParameterSpec>,
    state: VariableState,
}

impl EchoVariable {
    pub fn new(parameter: ParameterSpec) -> Self {
        Self {
            parameters: vec![parameter],
            state: VariableState::default(),
        }
    }

    pub fn boxed(self) -> Box<dyn Variable> {
        Box::new(self)
    }
}

#[async_trait]
impl Variable for EchoVariable {
    fn name(&self) -> &str {
        "echo"
    }

    fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    fn state(&self) -> &VariableState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut VariableState {
        &mut self.state
    }

    async fn generate_value(&mut self) -> Result<String, VariableFailure> {
        let name = self.parameters[0].name.clone();
        Ok(self
            .arguments()
            .text(&name)
            .unwrap_or_else(|| "default".to_string()))
    }
}
