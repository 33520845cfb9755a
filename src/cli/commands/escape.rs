//! `cmdvars escape`

use crate::config::EngineConfig;
use crate::escaping::Shell;
use anyhow::Result;

/// Escape `value` for the requested shell, or the configured one
pub fn escape_value(value: &str, shell: Option<&str>, config: &EngineConfig) -> Result<String> {
    let shell = Shell::from_identifier(shell.unwrap_or_else(|| config.shell_identifier()))?;
    Ok(shell.escape(value))
}

pub fn run_escape_command(value: &str, shell: Option<&str>, config: &EngineConfig) -> Result<()> {
    println!("{}", escape_value(value, shell, config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_for_named_shell() {
        let config = EngineConfig::default();
        assert_eq!(
            escape_value("it's", Some("bash"), &config).unwrap(),
            "'it'\\''s'"
        );
        assert_eq!(escape_value("it's", Some("pwsh"), &config).unwrap(), "'it''s'");
        assert_eq!(escape_value("a b", Some("cmd.exe"), &config).unwrap(), "a b");
    }

    #[test]
    fn test_configured_shell_is_the_fallback() {
        let config = EngineConfig {
            shell: Some("/bin/zsh".to_string()),
            ..Default::default()
        };
        assert_eq!(escape_value("a b", None, &config).unwrap(), "'a b'");
    }
}
