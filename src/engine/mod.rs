//! Dispatch engine: the machine, its event queue and snapshots.
//!
//! # Key Concepts
//!
//! - **Switch protocol**: exit the current state, run the action, update the
//!   current state, enter the target
//! - **Delegation**: composite and parallel states offer each event to their
//!   child machines before their own handlers are consulted
//! - **Run-to-completion**: the root machine owns the only queue; events
//!   emitted while one is being handled wait their turn

mod machine;
mod queue;
mod snapshot;

pub(crate) use machine::MachineInner;
pub use machine::StateMachine;
pub use queue::DispatchPhase;
pub use snapshot::Configuration;
