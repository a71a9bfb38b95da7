//! Building blocks of a machine definition.
//!
//! - [`State`] and its structural variants via [`StateKind`]
//! - [`Handler`]s that turn events into transitions
//! - [`Guard`] predicates gating those transitions
//! - [`TransitionContext`], what every hook gets to see
//! - [`StateHistory`], the bounded log of completed switches

mod context;
mod guard;
mod handler;
mod history;
mod state;

pub use context::TransitionContext;
pub use guard::Guard;
pub use handler::{Action, Handler, HandlerSet};
pub use history::{StateHistory, StateTransition};
pub use state::{State, StateKind};
