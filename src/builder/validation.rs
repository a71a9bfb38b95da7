//! Definition checks run before a machine is created.
//!
//! Every check runs and all violations are accumulated, so a broken
//! definition is reported in one pass instead of one error at a time.

use crate::builder::error::DefinitionError;
use crate::core::{State, StateKind};
use crate::engine::StateMachine;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<DefinitionError>>;

/// Validate the states handed to a machine.
pub(crate) fn validate_definition<D: 'static>(
    states: &[State<D>],
) -> Validation<(), NonEmptyVec<DefinitionError>> {
    let mut checks: Vec<Check> = Vec::new();

    let mut ids = HashSet::new();
    for state in states {
        if state.id().is_empty() {
            checks.push(Validation::fail(DefinitionError::EmptyStateId));
        } else if !ids.insert(state.id()) {
            checks.push(Validation::fail(DefinitionError::DuplicateState {
                id: state.id().to_string(),
            }));
        }
    }

    for state in states {
        let mut events: Vec<&str> = state.events().collect();
        events.sort_unstable();
        for event in events {
            for handler in state.handlers(event).unwrap_or_default() {
                let Some(target) = handler.target() else {
                    continue;
                };
                if !ids.contains(target) {
                    checks.push(Validation::fail(DefinitionError::UnknownTarget {
                        state: state.id().to_string(),
                        event: event.to_string(),
                        target: target.to_string(),
                    }));
                }
            }
        }
    }

    let mut nested: Vec<&StateMachine<D>> = Vec::new();
    for state in states {
        let children: &[StateMachine<D>] = match state.kind() {
            StateKind::Atomic => &[],
            StateKind::Composite(child) => std::slice::from_ref(child),
            StateKind::Parallel(children) => children,
        };
        for child in children {
            if child.is_adopted() {
                checks.push(Validation::fail(DefinitionError::NestedMachineInUse {
                    state: state.id().to_string(),
                }));
            } else if nested.iter().any(|seen| seen.ptr_eq(child)) {
                checks.push(Validation::fail(DefinitionError::NestedMachineRepeated {
                    state: state.id().to_string(),
                }));
            } else {
                nested.push(child);
            }
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Handler;

    fn violations(states: &[State]) -> Vec<DefinitionError> {
        match validate_definition(states) {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        }
    }

    #[test]
    fn valid_definition_passes() {
        let states: Vec<State> = vec![
            State::builder("A").on("go", Handler::to("B")).build(),
            State::builder("B").on("back", Handler::to("A")).build(),
        ];
        assert!(validate_definition(&states).is_success());
    }

    #[test]
    fn empty_definition_passes() {
        assert!(validate_definition::<()>(&[]).is_success());
    }

    #[test]
    fn all_violations_are_accumulated() {
        let states = vec![
            State::builder("A").on("go", Handler::to("Missing")).build(),
            State::leaf("A"),
            State::leaf(""),
        ];

        let found = violations(&states);
        assert_eq!(found.len(), 3);
        assert!(found.contains(&DefinitionError::DuplicateState { id: "A".into() }));
        assert!(found.contains(&DefinitionError::EmptyStateId));
        assert!(found.contains(&DefinitionError::UnknownTarget {
            state: "A".into(),
            event: "go".into(),
            target: "Missing".into(),
        }));
    }

    #[test]
    fn halting_handlers_need_no_target() {
        let states = vec![State::builder("A").on("stop", Handler::halt()).build()];
        assert!(violations(&states).is_empty());
    }

    #[test]
    fn machine_nested_twice_is_rejected() {
        let child: StateMachine = StateMachine::new(vec![State::leaf("X")]).unwrap();
        let states = vec![
            State::builder("A").composite(child.clone()).build(),
            State::builder("B").parallel(vec![child]).build(),
        ];

        assert_eq!(
            violations(&states),
            vec![DefinitionError::NestedMachineRepeated { state: "B".into() }]
        );
    }
}
