//! CLI command handlers
//!
//! - Argument parsing structures
//! - Command implementations
//! - Routing parsed commands to their implementation

pub mod args;
pub mod commands;
pub mod router;

pub use args::{Cli, Commands};
pub use router::execute_command;
