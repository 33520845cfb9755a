//! # cmdvars
//!
//! Resolve `{{variable}}` tokens embedded in shell commands, escaping each
//! value for the shell that will run the command.
//!
//! ## Usage
//!
//! ```bash
//! cmdvars resolve 'wc -l {{file_path:relative}}' --file src/lib.rs --shell bash
//! ```
//!
//! ## Modules
//!
//! - `escaping` - Per-shell escapers and shell identification
//! - `variables` - The `Variable` contract, built-in and custom variables, the catalog
//! - `parsing` - Pattern matcher and multi-phase parsing process
//! - `prompt` - Interactive pre-action supplying custom variable values
//! - `config` - Layered TOML configuration
//! - `app` - Logging and fatal error handling for the binary
//! - `cli` - Command-line interface
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod escaping;
pub mod parsing;
pub mod prompt;
pub mod variables;

pub use error::{EngineError, Result};
pub use escaping::{Escaper, Shell};
pub use parsing::{parse_variables, resolve_command, ParsingProcess, ParsingResult};
pub use variables::{Variable, VariableFailure, VariableSet};
