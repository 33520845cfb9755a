//! Shell-dialect escaping
//!
//! Resolved variable values are substituted into command strings that an
//! external process runner hands to a shell. Each supported shell family gets
//! an [`Escaper`] that turns a raw value into a single literal token for that
//! shell:
//!
//! - POSIX shells (`bash`, `dash`, `zsh`, `sh`, `ksh`) use [`PosixEscaper`]
//! - PowerShell (`powershell`, `pwsh`) uses [`PowerShellEscaper`]
//! - The legacy Windows command shell (`cmd`) has no safe quoting rules, so
//!   [`PassthroughEscaper`] substitutes values unchanged
//!
//! An identifier that matches none of these is a configuration error; there is
//! no silent fallback to unescaped output.

mod posix;
mod powershell;

pub use posix::PosixEscaper;
pub use powershell::PowerShellEscaper;

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Converts a raw value into a form that a shell reads back as that exact value
pub trait Escaper: Send + Sync {
    fn escape(&self, raw: &str) -> String;
}

/// Escaper for shells without usable quoting rules. Values pass through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughEscaper;

impl Escaper for PassthroughEscaper {
    fn escape(&self, raw: &str) -> String {
        raw.to_string()
    }
}

/// Destination shells the engine knows how to escape for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shell {
    Bash,
    Dash,
    Zsh,
    Sh,
    Ksh,
    #[serde(rename = "powershell")]
    PowerShell,
    #[serde(rename = "pwsh")]
    PowerShellCore,
    Cmd,
}

impl Shell {
    /// Identify a shell from an executable name or path.
    ///
    /// Only the base name is considered, case-insensitively, with any `.exe`
    /// suffix removed, so `/bin/bash`, `C:\Windows\System32\cmd.exe` and
    /// `PWSH` are all recognized.
    pub fn from_identifier(identifier: &str) -> Result<Self> {
        let base = identifier
            .rsplit(|c| c == '/' || c == '\\')
            .next()
            .unwrap_or(identifier)
            .trim()
            .to_lowercase();
        let base = base.strip_suffix(".exe").unwrap_or(&base);

        match base {
            "bash" => Ok(Shell::Bash),
            "dash" => Ok(Shell::Dash),
            "zsh" => Ok(Shell::Zsh),
            "sh" => Ok(Shell::Sh),
            "ksh" => Ok(Shell::Ksh),
            "powershell" => Ok(Shell::PowerShell),
            "pwsh" => Ok(Shell::PowerShellCore),
            "cmd" => Ok(Shell::Cmd),
            _ => Err(EngineError::UnrecognizedShell(identifier.to_string())),
        }
    }

    /// Canonical identifier for this shell
    pub fn name(&self) -> &'static str {
        match self {
            Shell::Bash => "bash",
            Shell::Dash => "dash",
            Shell::Zsh => "zsh",
            Shell::Sh => "sh",
            Shell::Ksh => "ksh",
            Shell::PowerShell => "powershell",
            Shell::PowerShellCore => "pwsh",
            Shell::Cmd => "cmd",
        }
    }

    /// Whether values substituted for this shell are actually escaped
    pub fn supports_escaping(&self) -> bool {
        !matches!(self, Shell::Cmd)
    }

    /// The escaping strategy for this shell
    pub fn escaper(&self) -> &'static dyn Escaper {
        match self {
            Shell::Bash | Shell::Dash | Shell::Zsh | Shell::Sh | Shell::Ksh => &PosixEscaper,
            Shell::PowerShell | Shell::PowerShellCore => &PowerShellEscaper,
            Shell::Cmd => &PassthroughEscaper,
        }
    }

    /// Escape a value for this shell
    pub fn escape(&self, raw: &str) -> String {
        self.escaper().escape(raw)
    }
}

impl FromStr for Shell {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Shell::from_identifier(s)
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
