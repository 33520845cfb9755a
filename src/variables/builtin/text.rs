use crate::variables::{ParameterSpec, Variable, VariableFailure, VariableState};
use async_trait::async_trait;
use once_cell::sync::Lazy;

const MAX_NEWLINES: i64 = 1000;

static NEWLINE_PARAMETERS: Lazy<Vec<ParameterSpec>> =
    Lazy::new(|| vec![ParameterSpec::integer("count").optional()]);

static PASSTHROUGH_PARAMETERS: Lazy<Vec<ParameterSpec>> =
    Lazy::new(|| vec![ParameterSpec::string("value")]);

/// `{{newline}}` or `{{newline:count}}`
#[derive(Debug, Default)]
pub struct NewlineVariable {
    state: VariableState,
}

impl NewlineVariable {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Variable for NewlineVariable {
    fn name(&self) -> &str {
        "newline"
    }

    fn parameters(&self) -> &[ParameterSpec] {
        &NEWLINE_PARAMETERS
    }

    fn help_text(&self) -> &str {
        "A newline character, optionally repeated"
    }

    fn state(&self) -> &VariableState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut VariableState {
        &mut self.state
    }

    async fn generate_value(&mut self) -> Result<String, VariableFailure> {
        let count = match self.arguments().integer("count") {
            None => 1,
            Some(Ok(count)) if (0..=MAX_NEWLINES).contains(&count) => count,
            Some(Ok(count)) => {
                return Err(VariableFailure::for_token(
                    "newline",
                    format!("count {} exceeds the maximum of {}", count, MAX_NEWLINES),
                ))
            }
            Some(Err(raw)) => {
                return Err(VariableFailure::for_token(
                    "newline",
                    format!("count '{}' is out of range", raw),
                ))
            }
        };
        Ok("\n".repeat(count as usize))
    }
}

/// `{{uuid}}`: a fresh random v4 UUID per occurrence
#[derive(Debug, Default)]
pub struct UuidVariable {
    state: VariableState,
}

impl UuidVariable {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Variable for UuidVariable {
    fn name(&self) -> &str {
        "uuid"
    }

    fn help_text(&self) -> &str {
        "A random UUID, different for every occurrence"
    }

    fn state(&self) -> &VariableState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut VariableState {
        &mut self.state
    }

    async fn generate_value(&mut self) -> Result<String, VariableFailure> {
        Ok(uuid::Uuid::new_v4().to_string())
    }
}

/// `{{passthrough:value}}` echoes its argument
#[derive(Debug, Default)]
pub struct PassthroughVariable {
    state: VariableState,
}

impl PassthroughVariable {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Variable for PassthroughVariable {
    fn name(&self) -> &str {
        "passthrough"
    }

    fn parameters(&self) -> &[ParameterSpec] {
        &PASSTHROUGH_PARAMETERS
    }

    fn help_text(&self) -> &str {
        "Echoes its argument; useful for checking escaping"
    }

    fn state(&self) -> &VariableState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut VariableState {
        &mut self.state
    }

    async fn generate_value(&mut self) -> Result<String, VariableFailure> {
        self.arguments()
            .text("value")
            .ok_or_else(|| VariableFailure::for_token("passthrough", "value is missing"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_newline_defaults_to_one() {
        let mut variable = NewlineVariable::new();
        assert_eq!(variable.generate_value().await.unwrap(), "\n");
    }

    #[tokio::test]
    async fn test_newline_count() {
        let mut variable = NewlineVariable::new();
        variable.set_argument("count", "3");
        assert_eq!(variable.generate_value().await.unwrap(), "\n\n\n");
    }

    #[tokio::test]
    async fn test_newline_rejects_huge_counts() {
        let mut variable = NewlineVariable::new();
        variable.set_argument("count", "5000");
        assert!(variable.generate_value().await.is_err());

        variable.reset();
        variable.set_argument("count", "123456789012345678901234567890");
        let failure = variable.generate_value().await.unwrap_err();
        assert!(failure.messages()[0].contains("out of range"));
    }

    #[tokio::test]
    async fn test_uuid_is_fresh_each_time() {
        let mut variable = UuidVariable::new();
        let first = variable.generate_value().await.unwrap();
        let second = variable.generate_value().await.unwrap();
        assert_ne!(first, second);
        assert!(uuid::Uuid::parse_str(&first).is_ok());
    }

    #[tokio::test]
    async fn test_passthrough_echoes_argument() {
        let mut variable = PassthroughVariable::new();
        variable.set_argument("value", "it's $HOME");
        assert_eq!(variable.generate_value().await.unwrap(), "it's $HOME");
    }
}
