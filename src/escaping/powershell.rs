use super::Escaper;

/// Escaper for Windows PowerShell and PowerShell Core.
///
/// Values are emitted as single-quoted (verbatim) strings. PowerShell treats
/// the typographic quotes U+2018..U+201B as single quotes too, so every one of
/// them is doubled, not just the ASCII apostrophe.
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerShellEscaper;

fn is_single_quote(c: char) -> bool {
    matches!(c, '\'' | '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}')
}

impl Escaper for PowerShellEscaper {
    fn escape(&self, raw: &str) -> String {
        if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return raw.to_string();
        }

        let mut escaped = String::with_capacity(raw.len() + 2);
        escaped.push('\'');
        for c in raw.chars() {
            if is_single_quote(c) {
                escaped.push(c);
            }
            escaped.push(c);
        }
        escaped.push('\'');
        escaped
    }
}
