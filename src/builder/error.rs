//! Errors raised while building states into machines.

use thiserror::Error;

/// Errors that can occur when building a state machine.
///
/// Construction is all-or-nothing: when an error is returned no machine
/// exists.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid machine definition: {}", summarize(.0))]
    InvalidDefinition(Vec<DefinitionError>),

    #[error("State '{state}' already belongs to a machine")]
    AlreadyOwned { state: String },

    #[error("Machine nested in state '{state}' already belongs to another state")]
    AlreadyNested { state: String },
}

impl BuildError {
    /// Definition violations, empty for ownership errors.
    pub fn violations(&self) -> &[DefinitionError] {
        match self {
            BuildError::InvalidDefinition(violations) => violations,
            _ => &[],
        }
    }
}

/// A single problem found in the states handed to a machine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("State id must not be empty")]
    EmptyStateId,

    #[error("State '{id}' is declared more than once")]
    DuplicateState { id: String },

    #[error("Handler for '{event}' in state '{state}' targets unknown state '{target}'")]
    UnknownTarget {
        state: String,
        event: String,
        target: String,
    },

    #[error("State '{state}' nests a machine that already belongs to another state")]
    NestedMachineInUse { state: String },

    #[error("State '{state}' nests a machine used elsewhere in the same definition")]
    NestedMachineRepeated { state: String },
}

fn summarize(violations: &[DefinitionError]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_definition_lists_every_violation() {
        let error = BuildError::InvalidDefinition(vec![
            DefinitionError::EmptyStateId,
            DefinitionError::DuplicateState { id: "A".into() },
        ]);

        assert_eq!(
            error.to_string(),
            "Invalid machine definition: State id must not be empty; State 'A' is declared more than once"
        );
        assert_eq!(error.violations().len(), 2);
    }

    #[test]
    fn ownership_errors_carry_no_violations() {
        let error = BuildError::AlreadyOwned { state: "A".into() };
        assert!(error.violations().is_empty());
    }
}
