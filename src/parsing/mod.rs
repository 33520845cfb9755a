//! Variable resolution: the pattern matcher and the multi-phase process
//!
//! - [`parse_variables`] resolves one content string against one variable set
//! - [`ParsingProcess`] drives several related contents through successive
//!   variable sets, merging each phase's [`ParsingResult`]

mod matcher;
mod process;
mod result;

pub use matcher::parse_variables;
pub use process::{ParsingProcess, ProcessState};
pub use result::ParsingResult;

use crate::error::Result;
use crate::escaping::Shell;
use crate::variables::VariableSet;

/// Resolve a single command in one phase.
///
/// `shell` is the destination shell identifier; an unrecognized one is an
/// error before any variable is touched.
pub async fn resolve_command(
    command: &str,
    shell: &str,
    variables: VariableSet,
) -> Result<ParsingResult> {
    let shell = Shell::from_identifier(shell)?;
    let mut process = ParsingProcess::new(shell);
    process.add_content("command", command)?;
    process.push_variable_set(variables);
    process.advance_one_phase().await?;

    Ok(process
        .result("command")
        .cloned()
        .unwrap_or_else(|| ParsingResult::success(command, command, 0)))
}
