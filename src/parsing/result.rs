use serde::{Deserialize, Serialize};

/// Outcome of resolving one content string against one or more variable sets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsingResult {
    /// The content as it was before the first phase
    pub original_content: String,
    /// Substituted content, `None` once resolution has failed
    pub parsed_content: Option<String>,
    pub succeeded: bool,
    pub error_messages: Vec<String>,
    /// Number of token occurrences substituted
    pub resolved_count: usize,
}

impl ParsingResult {
    pub fn success(
        original_content: impl Into<String>,
        parsed_content: impl Into<String>,
        resolved_count: usize,
    ) -> Self {
        Self {
            original_content: original_content.into(),
            parsed_content: Some(parsed_content.into()),
            succeeded: true,
            error_messages: Vec::new(),
            resolved_count,
        }
    }

    pub fn failure(original_content: impl Into<String>, error_messages: Vec<String>) -> Self {
        Self {
            original_content: original_content.into(),
            parsed_content: None,
            succeeded: false,
            error_messages,
            resolved_count: 0,
        }
    }

    /// Fold a later phase's result into this one.
    ///
    /// The later parsed content replaces ours, the original content is kept,
    /// success is the conjunction, messages are concatenated and counts summed.
    pub fn merge(self, later: ParsingResult) -> ParsingResult {
        let mut error_messages = self.error_messages;
        error_messages.extend(later.error_messages);

        ParsingResult {
            original_content: self.original_content,
            parsed_content: later.parsed_content,
            succeeded: self.succeeded && later.succeeded,
            error_messages,
            resolved_count: self.resolved_count + later.resolved_count,
        }
    }

    /// Error messages with duplicates removed, first occurrence order kept
    pub fn unique_error_messages(&self) -> Vec<&str> {
        let mut unique: Vec<&str> = Vec::new();
        for message in &self.error_messages {
            if !unique.contains(&message.as_str()) {
                unique.push(message);
            }
        }
        unique
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_first_original_and_latest_parsed() {
        let first = ParsingResult::success("{{A}}-{{B}}", "valueA-{{B}}", 1);
        let second = ParsingResult::success("valueA-{{B}}", "valueA-valueB", 1);

        let merged = first.merge(second);
        assert_eq!(merged.original_content, "{{A}}-{{B}}");
        assert_eq!(merged.parsed_content.as_deref(), Some("valueA-valueB"));
        assert!(merged.succeeded);
        assert_eq!(merged.resolved_count, 2);
    }

    #[test]
    fn test_merge_with_failure() {
        let first = ParsingResult::success("{{A}}{{C}}", "valueA{{C}}", 1);
        let second = ParsingResult::failure("valueA{{C}}", vec!["C is unavailable".to_string()]);

        let merged = first.merge(second);
        assert!(!merged.succeeded);
        assert_eq!(merged.parsed_content, None);
        assert_eq!(merged.original_content, "{{A}}{{C}}");
        assert_eq!(merged.error_messages, ["C is unavailable"]);
    }

    #[test]
    fn test_merge_concatenates_duplicate_messages() {
        let first = ParsingResult::failure("x", vec!["boom".to_string()]);
        let second = ParsingResult::failure("x", vec!["boom".to_string()]);
        let merged = first.merge(second);
        assert_eq!(merged.error_messages, ["boom", "boom"]);
        assert_eq!(merged.unique_error_messages(), ["boom"]);
    }
}
