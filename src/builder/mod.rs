//! Builder API for declaring states and assembling machines.
//!
//! States are declared with [`StateBuilder`] and assembled with
//! [`StateMachineBuilder`] (or [`StateMachine::new`](crate::StateMachine::new)).
//! Assembly validates the whole definition and wires ownership in one step,
//! so a machine either exists fully formed or not at all.

pub mod error;
pub mod machine;
pub mod state;
mod validation;

pub use error::{BuildError, DefinitionError};
pub use machine::StateMachineBuilder;
pub use state::StateBuilder;
