//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::builder::validation::validate_definition;
use crate::config::MachineConfig;
use crate::core::State;
use crate::engine::StateMachine;
use stillwater::validation::Validation;

/// Builder for constructing state machines with a fluent API.
///
/// The first state added is the initial state.
///
/// # Example
///
/// ```rust
/// use statenest::{Handler, State, StateMachineBuilder};
///
/// let machine = StateMachineBuilder::<()>::new()
///     .label("door")
///     .history_limit(16)
///     .state(State::builder("Closed").on("open", Handler::to("Open")).build())
///     .state(State::builder("Open").on("close", Handler::to("Closed")).build())
///     .build()
///     .unwrap();
///
/// machine.init(None);
/// machine.emit("open", ());
/// assert_eq!(machine.current_id(), Some("Open"));
/// assert_eq!(machine.label(), Some("door"));
/// ```
pub struct StateMachineBuilder<D> {
    states: Vec<State<D>>,
    config: MachineConfig,
}

impl<D: 'static> StateMachineBuilder<D> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            config: MachineConfig::default(),
        }
    }

    /// Add a state.
    pub fn state(mut self, state: State<D>) -> Self {
        self.states.push(state);
        self
    }

    /// Add multiple states at once, keeping their order.
    pub fn states(mut self, states: impl IntoIterator<Item = State<D>>) -> Self {
        self.states.extend(states);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Name used in diagnostics and snapshots.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config.label = Some(label.into());
        self
    }

    /// Number of transitions kept in the machine's history.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit;
        self
    }

    /// Build the state machine.
    ///
    /// Fails without creating anything if the definition is invalid or a
    /// nested machine already belongs elsewhere.
    pub fn build(self) -> Result<StateMachine<D>, BuildError> {
        if let Validation::Failure(violations) = validate_definition(&self.states) {
            return Err(BuildError::InvalidDefinition(
                violations.iter().cloned().collect(),
            ));
        }

        StateMachine::assemble(self.states, self.config)
    }
}

impl<D: 'static> Default for StateMachineBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DefinitionError;
    use crate::core::Handler;

    #[test]
    fn empty_builder_builds_inactive_machine() {
        let machine = StateMachineBuilder::<()>::new().build().unwrap();
        assert!(machine.initial_state().is_none());
        machine.init(None);
        assert!(machine.current().is_none());
    }

    #[test]
    fn first_state_is_initial() {
        let machine = StateMachineBuilder::<()>::new()
            .states(vec![State::leaf("A"), State::leaf("B")])
            .build()
            .unwrap();

        assert_eq!(machine.initial_state().map(State::id), Some("A"));
    }

    #[test]
    fn invalid_definition_creates_nothing() {
        let result = StateMachineBuilder::<()>::new()
            .state(State::builder("A").on("go", Handler::to("B")).build())
            .build();

        match result {
            Err(BuildError::InvalidDefinition(violations)) => assert_eq!(
                violations,
                vec![DefinitionError::UnknownTarget {
                    state: "A".into(),
                    event: "go".into(),
                    target: "B".into(),
                }]
            ),
            other => panic!("expected invalid definition, got {:?}", other.err()),
        }
    }

    #[test]
    fn config_is_applied() {
        let config = MachineConfig {
            label: Some("player".into()),
            history_limit: 0,
        };
        let machine = StateMachineBuilder::<()>::new()
            .config(config)
            .state(State::leaf("A"))
            .build()
            .unwrap();

        machine.init(None);
        assert_eq!(machine.label(), Some("player"));
        assert!(machine.history().is_empty());
    }
}
