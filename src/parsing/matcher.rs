//! Resolve one content string against one variable set
//!
//! Variables are processed in set order. Each variable's pattern is scanned
//! over the whole current content, and all of its occurrences are resolved
//! left to right before the next variable starts scanning. Substitution
//! splices values in by byte range, so nothing in a value (a `$`, a
//! backslash) is ever interpreted as replacement syntax.
//!
//! Because the next variable scans the already substituted content, a value
//! that happens to look like a later variable's token will be resolved by
//! that later variable.

use crate::error::Result;
use crate::escaping::Escaper;
use crate::parsing::ParsingResult;
use crate::variables::{find_matches, Variable};
use tracing::{debug, trace, warn};

/// Resolve every token of `variables` in `content`.
///
/// `escaper` is `None` when the destination of this content is not a shell.
/// Tokens carrying the no-escape marker are substituted raw either way.
///
/// The first variable failure aborts this content entirely: nothing
/// substituted so far survives, and only the failing variable's messages are
/// reported. A malformed parameter schema is an `Err`.
pub async fn parse_variables(
    content: &str,
    variables: &mut [Box<dyn Variable>],
    escaper: Option<&dyn Escaper>,
) -> Result<ParsingResult> {
    let mut parsed = content.to_string();
    let mut resolved_count = 0;

    for variable in variables.iter_mut() {
        let pattern = variable.build_pattern()?;
        let occurrences = find_matches(&pattern, &parsed);
        if occurrences.is_empty() {
            continue;
        }

        trace!(
            variable = variable.name(),
            occurrences = occurrences.len(),
            "Resolving variable occurrences"
        );

        let parameter_names: Vec<String> = variable
            .parameters()
            .iter()
            .map(|spec| spec.name.clone())
            .collect();

        let mut substituted = String::with_capacity(parsed.len());
        let mut last_end = 0;

        for occurrence in &occurrences {
            variable.reset();
            for (name, argument) in parameter_names.iter().zip(&occurrence.arguments) {
                if let Some(raw) = argument {
                    variable.set_argument(name, raw);
                }
            }

            trace!(
                variable = variable.name(),
                escape = occurrence.escape,
                "Generating value for {}",
                occurrence.matched
            );

            let value = match variable.generate_value().await {
                Ok(value) => value,
                Err(failure) => {
                    variable.record_failure(failure);
                    String::new()
                }
            };

            if !variable.error_messages().is_empty() {
                warn!(
                    variable = variable.name(),
                    "Variable failed, abandoning resolution of this content"
                );
                return Ok(ParsingResult::failure(
                    content,
                    variable.error_messages().to_vec(),
                ));
            }

            let value = match escaper {
                Some(escaper) if occurrence.escape => escaper.escape(&value),
                _ => value,
            };

            substituted.push_str(&parsed[last_end..occurrence.range.start]);
            substituted.push_str(&value);
            last_end = occurrence.range.end;
            resolved_count += 1;
        }

        substituted.push_str(&parsed[last_end..]);
        parsed = substituted;
    }

    debug!(resolved_count, "Content resolved");
    Ok(ParsingResult::success(content, parsed, resolved_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escaping::{PosixEscaper, Shell};
    use crate::variables::{
        BuiltinVariables, HostState, ParameterSpec, ResolutionContext, VariableFailure,
        VariableProvider, VariableSet, VariableState,
    };
    use async_trait::async_trait;

    struct Fixed {
        name: &'static str,
        value: std::result::Result<&'static str, &'static str>,
        state: VariableState,
    }

    impl Fixed {
        fn ok(name: &'static str, value: &'static str) -> Box<dyn Variable> {
            Box::new(Self {
                name,
                value: Ok(value),
                state: VariableState::default(),
            })
        }

        fn failing(name: &'static str, message: &'static str) -> Box<dyn Variable> {
            Box::new(Self {
                name,
                value: Err(message),
                state: VariableState::default(),
            })
        }
    }

    #[async_trait]
    impl Variable for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        fn state(&self) -> &VariableState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut VariableState {
            &mut self.state
        }

        async fn generate_value(&mut self) -> std::result::Result<String, VariableFailure> {
            self.value
                .map(str::to_string)
                .map_err(VariableFailure::new)
        }
    }

    /// Echoes its optional `name` argument and rejects `bad`
    struct Picky {
        parameters: Vec<ParameterSpec>,
        state: VariableState,
    }

    fn picky() -> Box<dyn Variable> {
        Box::new(Picky {
            parameters: vec![ParameterSpec::string("name").optional()],
            state: VariableState::default(),
        })
    }

    #[async_trait]
    impl Variable for Picky {
        fn name(&self) -> &str {
            "picky"
        }

        fn parameters(&self) -> &[ParameterSpec] {
            &self.parameters
        }

        fn state(&self) -> &VariableState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut VariableState {
            &mut self.state
        }

        async fn generate_value(&mut self) -> std::result::Result<String, VariableFailure> {
            match self.arguments().text("name") {
                Some(name) if name == "bad" => Err(VariableFailure::new("bad is rejected")),
                Some(name) => Ok(name),
                None => Ok("fallback".to_string()),
            }
        }
    }

    fn builtins() -> VariableSet {
        let context = ResolutionContext::new(Shell::Bash, HostState::new("/work"));
        BuiltinVariables.variables_for(&context)
    }

    #[tokio::test]
    async fn test_content_without_tokens_is_unchanged() {
        let mut variables = builtins();
        let result = parse_variables("echo hello", &mut variables, Some(&PosixEscaper))
            .await
            .unwrap();
        assert!(result.succeeded);
        assert_eq!(result.parsed_content.as_deref(), Some("echo hello"));
        assert_eq!(result.resolved_count, 0);
    }

    #[tokio::test]
    async fn test_tokens_are_replaced_and_escaped() {
        let mut variables = builtins();
        let result = parse_variables(
            "echo {{passthrough:a b}} > out.txt",
            &mut variables,
            Some(&PosixEscaper),
        )
        .await
        .unwrap();
        assert_eq!(result.parsed_content.as_deref(), Some("echo 'a b' > out.txt"));
        assert_eq!(result.resolved_count, 1);
    }

    #[tokio::test]
    async fn test_no_escape_marker_substitutes_raw_value() {
        let mut variables = builtins();
        let result = parse_variables(
            "{{!passthrough:a b}} {{passthrough:a b}}",
            &mut variables,
            Some(&PosixEscaper),
        )
        .await
        .unwrap();
        assert_eq!(result.parsed_content.as_deref(), Some("a b 'a b'"));
    }

    #[tokio::test]
    async fn test_no_escaper_substitutes_raw_values() {
        let mut variables = builtins();
        let result = parse_variables("{{passthrough:a b}}", &mut variables, None)
            .await
            .unwrap();
        assert_eq!(result.parsed_content.as_deref(), Some("a b"));
    }

    #[tokio::test]
    async fn test_dollar_signs_are_not_replacement_syntax() {
        let mut variables = vec![Fixed::ok("money", "$1 and ${0} and $$")];
        let result = parse_variables("cost: {{money}}", &mut variables, None)
            .await
            .unwrap();
        assert_eq!(
            result.parsed_content.as_deref(),
            Some("cost: $1 and ${0} and $$")
        );
    }

    #[tokio::test]
    async fn test_failure_discards_earlier_substitutions() {
        let mut variables = vec![Fixed::ok("A", "valueA"), Fixed::failing("C", "C is unavailable")];
        let result = parse_variables("{{A}}{{C}}", &mut variables, None)
            .await
            .unwrap();
        assert!(!result.succeeded);
        assert_eq!(result.parsed_content, None);
        assert_eq!(result.original_content, "{{A}}{{C}}");
        assert_eq!(result.error_messages, ["C is unavailable"]);
        assert_eq!(result.resolved_count, 0);
    }

    #[tokio::test]
    async fn test_only_failing_variable_messages_are_reported() {
        let mut variables = vec![
            Fixed::failing("first", "first failed"),
            Fixed::failing("second", "second failed"),
        ];
        let result = parse_variables("{{second}} {{first}}", &mut variables, None)
            .await
            .unwrap();
        assert_eq!(result.error_messages, ["first failed"]);
    }

    #[tokio::test]
    async fn test_unused_failing_variable_does_not_fail() {
        let mut variables = vec![Fixed::failing("C", "C is unavailable")];
        let result = parse_variables("nothing here", &mut variables, None)
            .await
            .unwrap();
        assert!(result.succeeded);
    }

    #[tokio::test]
    async fn test_every_occurrence_gets_its_own_arguments() {
        let mut variables = builtins();
        let result = parse_variables(
            "{{passthrough:one}}/{{passthrough:two}}/{{newline:2}}",
            &mut variables,
            None,
        )
        .await
        .unwrap();
        assert_eq!(result.parsed_content.as_deref(), Some("one/two/\n\n"));
        assert_eq!(result.resolved_count, 3);
    }

    #[tokio::test]
    async fn test_substituted_value_is_rescanned_by_later_variables() {
        let mut variables = vec![Fixed::ok("first", "{{second}}"), Fixed::ok("second", "late")];
        let result = parse_variables("{{first}}", &mut variables, None)
            .await
            .unwrap();
        assert_eq!(result.parsed_content.as_deref(), Some("late"));
        assert_eq!(result.resolved_count, 2);
    }

    #[tokio::test]
    async fn test_substituted_value_is_not_rescanned_by_earlier_variables() {
        let mut variables = vec![Fixed::ok("second", "late"), Fixed::ok("first", "{{second}}")];
        let result = parse_variables("{{first}}", &mut variables, None)
            .await
            .unwrap();
        assert_eq!(result.parsed_content.as_deref(), Some("{{second}}"));
    }

    #[tokio::test]
    async fn test_missing_required_parameter_is_left_alone() {
        let mut variables = builtins();
        let result = parse_variables("{{file_path}}", &mut variables, Some(&PosixEscaper))
            .await
            .unwrap();
        assert!(result.succeeded);
        assert_eq!(result.parsed_content.as_deref(), Some("{{file_path}}"));
    }

    #[tokio::test]
    async fn test_arguments_do_not_carry_over_between_occurrences() {
        let mut variables = vec![picky()];
        let result = parse_variables("{{picky:one}} {{picky}}", &mut variables, None)
            .await
            .unwrap();
        assert_eq!(result.parsed_content.as_deref(), Some("one fallback"));
        assert_eq!(result.resolved_count, 2);
    }

    #[tokio::test]
    async fn test_later_occurrence_failure_after_clean_occurrence() {
        let mut variables = vec![picky()];
        let result = parse_variables("{{picky:ok}} {{picky:bad}} {{picky}}", &mut variables, None)
            .await
            .unwrap();
        assert!(!result.succeeded);
        assert_eq!(result.parsed_content, None);
        assert_eq!(result.error_messages, ["bad is rejected"]);
        assert_eq!(result.resolved_count, 0);
    }

    #[tokio::test]
    async fn test_failure_state_is_cleared_before_the_next_content() {
        let mut variables = vec![picky()];
        let failed = parse_variables("{{picky:bad}}", &mut variables, None)
            .await
            .unwrap();
        assert!(!failed.succeeded);

        let result = parse_variables("{{picky:good}}", &mut variables, None)
            .await
            .unwrap();
        assert!(result.succeeded);
        assert_eq!(result.parsed_content.as_deref(), Some("good"));
    }
}
