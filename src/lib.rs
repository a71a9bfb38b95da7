//! Statenest: a hierarchical and parallel state machine runtime
//!
//! Statenest is an in-memory decision engine. It performs no I/O and spawns
//! no threads; machines change state only when events are handed to them.
//!
//! # Core Concepts
//!
//! - **State**: a node with event handlers and optional entry/exit hooks
//! - **Composite state**: a state owning a child machine that is active
//!   while the state is
//! - **Parallel state**: a state owning several child machines that are all
//!   active at once and all see every event
//! - **Handler**: target, optional guard and optional action for an event
//! - **Run-to-completion**: each event is handled completely, including the
//!   hooks it triggers, before the next queued event starts
//!
//! # Example
//!
//! ```rust
//! use statenest::{Handler, State, StateMachine};
//!
//! let playback = StateMachine::new(vec![
//!     State::builder("Playing").on("pause", Handler::to("Paused")).build(),
//!     State::builder("Paused").on("play", Handler::to("Playing")).build(),
//! ])
//! .unwrap();
//!
//! let player = StateMachine::new(vec![
//!     State::builder("Stopped").on("play", Handler::to("Active")).build(),
//!     State::builder("Active")
//!         .composite(playback)
//!         .on("stop", Handler::to("Stopped"))
//!         .build(),
//! ])
//! .unwrap();
//!
//! player.init(None);
//! player.emit("play", ());
//! player.emit("pause", ());
//!
//! assert_eq!(player.current_id(), Some("Active"));
//! assert!(player.is_in("Paused"));
//!
//! player.emit("stop", ());
//! assert!(!player.is_in("Paused"));
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod engine;
pub mod logger;

// Re-export commonly used types
pub use builder::{BuildError, DefinitionError, StateBuilder, StateMachineBuilder};
pub use config::MachineConfig;
pub use crate::core::{Guard, Handler, State, StateKind, TransitionContext};
pub use engine::{Configuration, DispatchPhase, StateMachine};
pub use logger::Logger;
