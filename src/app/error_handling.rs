//! Error handling utilities

use crate::error::EngineError;
use tracing::error;

/// Exit code for a configuration problem (bad shell, bad parameter schema)
pub const CONFIGURATION_ERROR: i32 = 2;
/// Exit code for everything else
pub const GENERAL_ERROR: i32 = 1;

/// Exit code for an error, looking through its context chain
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    let is_configuration = error
        .chain()
        .any(|cause| cause.downcast_ref::<EngineError>().is_some());

    if is_configuration {
        CONFIGURATION_ERROR
    } else {
        GENERAL_ERROR
    }
}

/// Report a fatal error and exit.
///
/// With `verbose >= 1` the full context chain is printed as well.
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    error!("Fatal error: {}", error);
    eprintln!("Error: {error}");

    if verbose >= 1 {
        eprintln!("\nError chain:");
        for (i, cause) in error.chain().enumerate() {
            eprintln!("  {}: {}", i, cause);
        }
    }

    std::process::exit(exit_code_for(&error))
}
