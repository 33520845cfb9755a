use thiserror::Error;

/// Configuration failures raised by the resolution engine.
///
/// A variable that cannot produce a value is not an error at this level: it is
/// reported through [`crate::parsing::ParsingResult`] instead. Everything here
/// means the engine itself cannot proceed safely.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid parameter '{parameter}' on variable '{variable}': {reason}")]
    InvalidParameter {
        variable: String,
        parameter: String,
        reason: String,
    },

    #[error("Invalid match pattern for variable '{variable}': {source}")]
    InvalidPattern {
        variable: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unrecognized shell '{0}': no escaping strategy is known for it")]
    UnrecognizedShell(String),

    #[error("No variable sets remain to be parsed")]
    NoPhasesRemaining,

    #[error("Content key '{0}' was added twice")]
    DuplicateContentKey(String),
}

impl EngineError {
    /// Create an invalid-parameter error
    pub fn invalid_parameter(
        variable: impl Into<String>,
        parameter: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            variable: variable.into(),
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
