//! Guard predicates for controlling transitions.
//!
//! A guard decides whether a handler may fire. It sees the source state, the
//! target state and the event payload through a [`TransitionContext`] and
//! must not have side effects: a rejected handler leaves no trace.

use crate::core::context::TransitionContext;

type Predicate<D> = Box<dyn Fn(&TransitionContext<'_, D>) -> bool>;

/// Predicate that gates a transition.
///
/// # Example
///
/// ```rust
/// use statenest::{Guard, Handler, State, StateMachine};
///
/// let big_enough = Guard::on_data(|n: &u32| *n >= 10);
///
/// let idle = State::builder("Idle")
///     .on("deposit", Handler::to("Funded").guard(big_enough))
///     .build();
/// let funded = State::leaf("Funded");
///
/// let machine = StateMachine::new(vec![idle, funded]).unwrap();
/// machine.init(None);
///
/// machine.emit("deposit", 3);
/// assert_eq!(machine.current_id(), Some("Idle"));
///
/// machine.emit("deposit", 12);
/// assert_eq!(machine.current_id(), Some("Funded"));
/// ```
pub struct Guard<D> {
    predicate: Predicate<D>,
}

impl<D: 'static> Guard<D> {
    /// Create a guard from a predicate over the whole context.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&TransitionContext<'_, D>) -> bool + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Create a guard from a predicate over the event payload.
    ///
    /// Rejects when the switch carries no payload.
    pub fn on_data<F>(predicate: F) -> Self
    where
        F: Fn(&D) -> bool + 'static,
    {
        Self::new(move |ctx| ctx.data().is_some_and(|data| predicate(data)))
    }

    /// Evaluate the guard.
    pub fn check(&self, ctx: &TransitionContext<'_, D>) -> bool {
        (self.predicate)(ctx)
    }

    /// Accept only when both guards accept. `other` is not evaluated when
    /// `self` rejects.
    pub fn and(self, other: Guard<D>) -> Self {
        Self::new(move |ctx| self.check(ctx) && other.check(ctx))
    }

    /// Accept when either guard accepts.
    pub fn or(self, other: Guard<D>) -> Self {
        Self::new(move |ctx| self.check(ctx) || other.check(ctx))
    }

    /// Invert the guard.
    pub fn negate(self) -> Self {
        Self::new(move |ctx| !self.check(ctx))
    }
}
