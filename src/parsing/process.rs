//! Multi-phase resolution of related content strings
//!
//! A [`ParsingProcess`] resolves several named contents (say a command and
//! its display alias) in lockstep, one variable set per phase. Later phases
//! start from the previous phase's output, so text accepted in an earlier
//! phase is not re-interpreted by variables that were not yet available.
//!
//! Once any content fails, the process is terminal and no further phase runs.

use super::matcher::parse_variables;
use super::ParsingResult;
use crate::error::{EngineError, Result};
use crate::escaping::{Escaper, Shell};
use crate::variables::VariableSet;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, warn};

/// Where a process stands between phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    /// Variable sets remain to be parsed
    Pending,
    /// Every queued phase ran and every content resolved
    Succeeded,
    /// Some content failed; no further phase will run
    Failed,
}

pub struct ParsingProcess {
    shell: Shell,
    contents: Vec<(String, String)>,
    results: HashMap<String, ParsingResult>,
    remaining: VecDeque<VariableSet>,
    no_escape_keys: HashSet<String>,
    phases_completed: usize,
}

impl ParsingProcess {
    pub fn new(shell: Shell) -> Self {
        if !shell.supports_escaping() {
            warn!(
                "Shell '{}' does not support escaping; values will be substituted unescaped",
                shell
            );
        }

        Self {
            shell,
            contents: Vec::new(),
            results: HashMap::new(),
            remaining: VecDeque::new(),
            no_escape_keys: HashSet::new(),
            phases_completed: 0,
        }
    }

    /// Add a named content string. Keys are resolved in the order they were added.
    pub fn add_content(&mut self, key: impl Into<String>, content: impl Into<String>) -> Result<()> {
        let key = key.into();
        if self.contents.iter().any(|(existing, _)| *existing == key) {
            return Err(EngineError::DuplicateContentKey(key));
        }
        self.contents.push((key, content.into()));
        Ok(())
    }

    /// Exempt a content key from shell escaping, for contents that are shown
    /// rather than executed
    pub fn skip_escaping(&mut self, key: impl Into<String>) {
        self.no_escape_keys.insert(key.into());
    }

    /// Queue the variable set for a further phase
    pub fn push_variable_set(&mut self, variables: VariableSet) {
        self.remaining.push_back(variables);
    }

    pub fn shell(&self) -> Shell {
        self.shell
    }

    pub fn remaining_phases(&self) -> usize {
        self.remaining.len()
    }

    pub fn phases_completed(&self) -> usize {
        self.phases_completed
    }

    pub fn has_failed(&self) -> bool {
        self.results.values().any(|result| !result.succeeded)
    }

    pub fn state(&self) -> ProcessState {
        if self.has_failed() {
            ProcessState::Failed
        } else if self.remaining.is_empty() {
            ProcessState::Succeeded
        } else {
            ProcessState::Pending
        }
    }

    /// Accumulated result for a key, once at least one phase has run
    pub fn result(&self, key: &str) -> Option<&ParsingResult> {
        self.results.get(key)
    }

    /// Accumulated results in content order
    pub fn results(&self) -> Vec<(&str, &ParsingResult)> {
        self.contents
            .iter()
            .filter_map(|(key, _)| self.results.get(key).map(|result| (key.as_str(), result)))
            .collect()
    }

    /// Error messages of every content, in content order
    pub fn error_messages(&self) -> Vec<String> {
        self.results()
            .into_iter()
            .flat_map(|(_, result)| result.error_messages.iter().cloned())
            .collect()
    }

    fn escaper_for(&self, key: &str) -> Option<&'static dyn Escaper> {
        if self.no_escape_keys.contains(key) {
            None
        } else {
            Some(self.shell.escaper())
        }
    }

    /// Run the next queued variable set over every content.
    ///
    /// Returns whether every content resolved in this phase. A process that
    /// has already failed returns `Ok(false)` without consuming a phase.
    /// Every pattern of the phase is built before any content is touched, so
    /// a malformed schema leaves the phase queued and the results unchanged.
    pub async fn advance_one_phase(&mut self) -> Result<bool> {
        if self.has_failed() {
            debug!("Parsing process already failed, skipping phase");
            return Ok(false);
        }

        let next = self.remaining.front().ok_or(EngineError::NoPhasesRemaining)?;
        for variable in next {
            variable.build_pattern()?;
        }

        let mut variables = self
            .remaining
            .pop_front()
            .ok_or(EngineError::NoPhasesRemaining)?;
        let phase = self.phases_completed + 1;
        debug!(phase, variables = variables.len(), "Starting parsing phase");

        let mut phase_succeeded = true;
        for (key, original) in &self.contents {
            let input = self
                .results
                .get(key)
                .and_then(|previous| previous.parsed_content.clone())
                .unwrap_or_else(|| original.clone());

            let escaper = self.escaper_for(key);
            let result = parse_variables(&input, &mut variables, escaper).await?;
            debug!(
                phase,
                key = key.as_str(),
                succeeded = result.succeeded,
                resolved = result.resolved_count,
                "Content parsed"
            );

            phase_succeeded &= result.succeeded;
            let merged = match self.results.remove(key) {
                Some(previous) => previous.merge(result),
                None => result,
            };
            self.results.insert(key.clone(), merged);
        }

        self.phases_completed = phase;
        debug!(phase, succeeded = phase_succeeded, "Parsing phase finished");
        Ok(phase_succeeded)
    }

    /// Run every queued phase, stopping at the first one that fails
    pub async fn advance_all_phases(&mut self) -> Result<bool> {
        if self.has_failed() {
            return Ok(false);
        }

        while !self.remaining.is_empty() {
            if !self.advance_one_phase().await? {
                return Ok(false);
            }
        }

        Ok(true)
    }
}
