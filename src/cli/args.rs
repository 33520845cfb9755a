//! CLI argument structures

use crate::variables::CustomVariables;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Resolve `{{variable}}` tokens in shell commands
#[derive(Parser)]
#[command(name = "cmdvars")]
#[command(about = "cmdvars - Resolve and shell-escape variable tokens in commands", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file to use instead of the global one
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve every variable token in a command
    #[command(name = "resolve")]
    Resolve {
        /// Command containing tokens such as {{file_name}}
        command: String,

        /// Display text resolved alongside the command, never escaped by default
        #[arg(long)]
        alias: Option<String>,

        /// Destination shell (bash, zsh, pwsh, cmd, or a path to one)
        #[arg(short, long)]
        shell: Option<String>,

        /// Active file for the file_* variables
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Type of the event that triggered the command
        #[arg(long, value_name = "TYPE")]
        event: Option<String>,

        /// Clipboard text for {{clipboard}}
        #[arg(long, value_name = "TEXT")]
        clipboard: Option<String>,

        /// Set a custom variable, e.g. --set _branch=main
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,

        /// Ask the configured prompt fields before resolving custom variables
        #[arg(long)]
        prompt: bool,

        /// Print every result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Escape a value for a shell
    #[command(name = "escape")]
    Escape {
        value: String,

        #[arg(short, long)]
        shell: Option<String>,
    },

    /// List available variables
    #[command(name = "variables")]
    Variables {
        /// Only list variables completing this prefix
        prefix: Option<String>,
    },
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    CustomVariables::parse_assignment(raw)
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))
}
