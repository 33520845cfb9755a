//! `{{date:format}}` with moment-style format tokens

use crate::variables::{ParameterSpec, Variable, VariableFailure, VariableState};
use async_trait::async_trait;
use chrono::{DateTime, Datelike, Local, TimeZone, Weekday};
use once_cell::sync::Lazy;
use std::fmt;

static PARAMETERS: Lazy<Vec<ParameterSpec>> = Lazy::new(|| vec![ParameterSpec::string("format")]);

/// Moment tokens and their strftime equivalents, longest first so that `YYYY`
/// wins over `YY` and `MMMM` over `MM`
const MOMENT_TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("MMMM", "%B"),
    ("DDDD", "%j"),
    ("dddd", "%A"),
    ("MMM", "%b"),
    ("ddd", "%a"),
    ("SSS", "%3f"),
    ("YY", "%y"),
    ("MM", "%m"),
    ("DD", "%d"),
    ("HH", "%H"),
    ("hh", "%I"),
    ("mm", "%M"),
    ("ss", "%S"),
    ("ZZ", "%z"),
    ("M", "%-m"),
    ("D", "%-d"),
    ("d", "%w"),
    ("H", "%-H"),
    ("h", "%-I"),
    ("m", "%-M"),
    ("s", "%-S"),
    ("A", "%p"),
    ("a", "%P"),
    ("Z", "%:z"),
    ("X", "%s"),
];

/// Translate a moment-style format into a chrono strftime format.
///
/// Text inside `[...]` is copied literally. Characters that are not tokens
/// are copied as-is, with `%` escaped. strftime has no two-letter weekday,
/// so moment's `dd` is written out as the literal name for `weekday`.
pub fn moment_to_strftime(format: &str, weekday: Weekday) -> String {
    let mut output = String::with_capacity(format.len() * 2);
    let mut rest = format;

    while let Some(c) = rest.chars().next() {
        if c == '[' {
            let literal_end = rest.find(']').unwrap_or(rest.len());
            push_literal(&mut output, &rest[1..literal_end]);
            rest = rest.get(literal_end + 1..).unwrap_or("");
            continue;
        }

        if rest.starts_with("dd") && !rest.starts_with("ddd") {
            push_literal(&mut output, &weekday.to_string()[..2]);
            rest = &rest[2..];
            continue;
        }

        if let Some((token, strftime)) = MOMENT_TOKENS
            .iter()
            .find(|(token, _)| rest.starts_with(token))
        {
            output.push_str(strftime);
            rest = &rest[token.len()..];
            continue;
        }

        push_literal(&mut output, &rest[..c.len_utf8()]);
        rest = &rest[c.len_utf8()..];
    }

    output
}

fn push_literal(output: &mut String, literal: &str) {
    for c in literal.chars() {
        if c == '%' {
            output.push_str("%%");
        } else {
            output.push(c);
        }
    }
}

/// Format a timestamp with a moment-style format
pub fn format_moment<Tz>(datetime: &DateTime<Tz>, format: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    datetime
        .format(&moment_to_strftime(format, datetime.weekday()))
        .to_string()
}

#[derive(Debug, Default)]
pub struct DateVariable {
    state: VariableState,
}

impl DateVariable {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Variable for DateVariable {
    fn name(&self) -> &str {
        "date"
    }

    fn parameters(&self) -> &[ParameterSpec] {
        &PARAMETERS
    }

    fn help_text(&self) -> &str {
        "Current local date and time, e.g. {{date:YYYY-MM-DD HH:mm}}"
    }

    fn state(&self) -> &VariableState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut VariableState {
        &mut self.state
    }

    async fn generate_value(&mut self) -> Result<String, VariableFailure> {
        let format = self
            .arguments()
            .text("format")
            .ok_or_else(|| VariableFailure::for_token("date", "format is missing"))?;
        Ok(format_moment(&Local::now(), &format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn fixed() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap()
    }

    #[test]
    fn test_common_formats() {
        assert_eq!(format_moment(&fixed(), "YYYY"), "2024");
        assert_eq!(format_moment(&fixed(), "YYYY-MM-DD"), "2024-03-05");
        assert_eq!(format_moment(&fixed(), "HH:mm:ss"), "07:08:09");
        assert_eq!(format_moment(&fixed(), "D.M.YY"), "5.3.24");
        assert_eq!(format_moment(&fixed(), "dddd, MMMM D"), "Tuesday, March 5");
        assert_eq!(format_moment(&fixed(), "h A"), "7 AM");
    }

    #[test]
    fn test_bracketed_text_is_literal() {
        assert_eq!(format_moment(&fixed(), "[Day] DDDD [of] YYYY"), "Day 065 of 2024");
    }

    #[test]
    fn test_percent_signs_are_literal() {
        assert_eq!(moment_to_strftime("100% YYYY", Weekday::Tue), "100%% %Y");
        assert_eq!(format_moment(&fixed(), "100% YYYY"), "100% 2024");
    }

    #[test]
    fn test_unterminated_bracket_copies_the_rest() {
        assert_eq!(moment_to_strftime("YYYY [rest", Weekday::Tue), "%Y rest");
    }

    #[test]
    fn test_weekday_name_lengths() {
        assert_eq!(format_moment(&fixed(), "dd"), "Tu");
        assert_eq!(format_moment(&fixed(), "ddd"), "Tue");
        assert_eq!(format_moment(&fixed(), "dddd"), "Tuesday");
        assert_eq!(format_moment(&fixed(), "d dd"), "2 Tu");
        assert_eq!(moment_to_strftime("dd", Weekday::Sun), "Su");
    }

    #[tokio::test]
    async fn test_generate_uses_format_argument() {
        let mut variable = DateVariable::new();
        variable.set_argument("format", "YYYY");
        let value = variable.generate_value().await.unwrap();
        assert_eq!(value.len(), 4);
        assert!(value.chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_generate_without_format_fails() {
        let mut variable = DateVariable::new();
        assert!(variable.generate_value().await.is_err());
    }
}
