use crate::variables::helpers::require_event;
use crate::variables::{TriggerEvent, Variable, VariableFailure, VariableState};
use async_trait::async_trait;

/// `{{event_type}}`: name of the event that triggered the command
#[derive(Debug)]
pub struct EventTypeVariable {
    event: Option<TriggerEvent>,
    state: VariableState,
}

impl EventTypeVariable {
    pub fn new(event: Option<TriggerEvent>) -> Self {
        Self {
            event,
            state: VariableState::default(),
        }
    }
}

#[async_trait]
impl Variable for EventTypeVariable {
    fn name(&self) -> &str {
        "event_type"
    }

    fn help_text(&self) -> &str {
        "Name of the triggering event; fails when the command was run by hand"
    }

    fn state(&self) -> &VariableState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut VariableState {
        &mut self.state
    }

    async fn generate_value(&mut self) -> Result<String, VariableFailure> {
        require_event(self.event.as_ref(), self.name()).map(|event| event.event_type.clone())
    }
}
