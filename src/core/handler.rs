//! Event handlers: target, guard and action of a transition.

use crate::core::context::TransitionContext;
use crate::core::guard::Guard;

/// Side-effecting procedure run during a switch.
///
/// Used for transition actions and for entry/exit hooks.
pub type Action<D> = Box<dyn Fn(&TransitionContext<'_, D>)>;

/// One candidate transition for an event.
///
/// Targets are named by state id and resolved against the owning machine, so
/// states can refer to each other regardless of declaration order.
///
/// # Example
///
/// ```rust
/// use statenest::Handler;
///
/// let handler: Handler<()> = Handler::to("Running")
///     .when(|ctx| ctx.from().is_some())
///     .then(|ctx| println!("leaving {:?}", ctx.from().map(|s| s.id())));
///
/// assert_eq!(handler.target(), Some("Running"));
/// ```
pub struct Handler<D> {
    target: Option<String>,
    guard: Option<Guard<D>>,
    action: Option<Action<D>>,
}

impl<D: 'static> Handler<D> {
    /// Transition to the state named `target`.
    pub fn to(target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            guard: None,
            action: None,
        }
    }

    /// Transition to no state: the machine exits its current state and
    /// becomes inactive, as if torn down.
    pub fn halt() -> Self {
        Self {
            target: None,
            guard: None,
            action: None,
        }
    }

    /// Gate the transition with a guard.
    pub fn guard(mut self, guard: Guard<D>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Gate the transition with a closure.
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(&TransitionContext<'_, D>) -> bool + 'static,
    {
        self.guard(Guard::new(predicate))
    }

    /// Run `action` after the source state is exited and before the target
    /// is entered.
    pub fn then<F>(mut self, action: F) -> Self
    where
        F: Fn(&TransitionContext<'_, D>) + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn is_guarded(&self) -> bool {
        self.guard.is_some()
    }

    /// Whether the guard, if any, accepts this switch.
    pub(crate) fn accepts(&self, ctx: &TransitionContext<'_, D>) -> bool {
        self.guard.as_ref().is_none_or(|guard| guard.check(ctx))
    }

    pub(crate) fn action(&self) -> Option<&Action<D>> {
        self.action.as_ref()
    }
}

/// Ordered candidates declared for one event.
///
/// Built from a single [`Handler`] or a `Vec` of them; the first candidate
/// whose guard accepts wins.
pub struct HandlerSet<D>(Vec<Handler<D>>);

impl<D> HandlerSet<D> {
    pub(crate) fn into_inner(self) -> Vec<Handler<D>> {
        self.0
    }
}

impl<D> From<Handler<D>> for HandlerSet<D> {
    fn from(handler: Handler<D>) -> Self {
        HandlerSet(vec![handler])
    }
}

impl<D> From<Vec<Handler<D>>> for HandlerSet<D> {
    fn from(handlers: Vec<Handler<D>>) -> Self {
        HandlerSet(handlers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halt_has_no_target() {
        let handler: Handler<()> = Handler::halt();
        assert_eq!(handler.target(), None);
        assert!(!handler.is_guarded());
    }

    #[test]
    fn when_installs_guard() {
        let handler: Handler<()> = Handler::to("B").when(|_| false);
        assert!(handler.is_guarded());
        assert!(handler.action().is_none());
    }

    #[test]
    fn handler_set_keeps_declaration_order() {
        let set: HandlerSet<()> = vec![Handler::to("B"), Handler::to("C")].into();
        let targets: Vec<_> = set
            .into_inner()
            .iter()
            .map(|h| h.target().map(String::from))
            .collect();
        assert_eq!(targets, vec![Some("B".to_string()), Some("C".to_string())]);
    }
}
