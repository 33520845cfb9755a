use super::Escaper;

/// Escaper for POSIX-family shells.
///
/// Values made only of characters no POSIX shell treats specially are left
/// bare. Everything else is wrapped in single quotes, inside which nothing is
/// special except the single quote itself; embedded single quotes close the
/// quoted run, add an escaped quote and reopen it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PosixEscaper;

fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/')
}

impl Escaper for PosixEscaper {
    fn escape(&self, raw: &str) -> String {
        if raw.is_empty() {
            return "''".to_string();
        }

        if raw.chars().all(is_safe) {
            return raw.to_string();
        }

        format!("'{}'", raw.replace('\'', "'\\''"))
    }
}
