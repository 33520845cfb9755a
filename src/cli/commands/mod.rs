//! Command implementation modules

pub mod escape;
pub mod resolve;
pub mod variables;

pub use escape::run_escape_command;
pub use resolve::{print_outcome, resolve, ResolveOutcome, ResolveRequest};
pub use variables::{catalog_for, run_variables_command};
