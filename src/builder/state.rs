//! Builder for declaring states.

use crate::core::{Action, HandlerSet, State, StateKind, TransitionContext};
use crate::engine::StateMachine;
use std::cell::OnceCell;
use std::collections::HashMap;

/// Fluent declaration of a [`State`].
///
/// # Example
///
/// ```rust
/// use statenest::{Handler, State};
///
/// let idle: State<()> = State::builder("Idle")
///     .on("start", Handler::to("Running"))
///     .on("stop", vec![Handler::to("Off").when(|_| false), Handler::halt()])
///     .on_entry(|ctx| assert!(ctx.to().is_some()))
///     .build();
///
/// assert_eq!(idle.handlers("stop").map(|h| h.len()), Some(2));
/// ```
pub struct StateBuilder<D> {
    id: String,
    handlers: HashMap<String, Vec<crate::core::Handler<D>>>,
    on_entry: Option<Action<D>>,
    on_exit: Option<Action<D>>,
    kind: StateKind<D>,
}

impl<D: 'static> StateBuilder<D> {
    /// Start a state named `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            handlers: HashMap::new(),
            on_entry: None,
            on_exit: None,
            kind: StateKind::Atomic,
        }
    }

    /// Declare handlers for `event`.
    ///
    /// Accepts one [`Handler`](crate::Handler) or an ordered `Vec` of them.
    /// Declaring the same event again appends to its candidates.
    pub fn on(mut self, event: impl Into<String>, handlers: impl Into<HandlerSet<D>>) -> Self {
        self.handlers
            .entry(event.into())
            .or_default()
            .extend(handlers.into().into_inner());
        self
    }

    /// Hook run when the state is entered. [`TransitionContext::from`] is the
    /// state being left.
    pub fn on_entry<F>(mut self, hook: F) -> Self
    where
        F: Fn(&TransitionContext<'_, D>) + 'static,
    {
        self.on_entry = Some(Box::new(hook));
        self
    }

    /// Hook run when the state is exited. [`TransitionContext::to`] is the
    /// state being entered.
    pub fn on_exit<F>(mut self, hook: F) -> Self
    where
        F: Fn(&TransitionContext<'_, D>) + 'static,
    {
        self.on_exit = Some(Box::new(hook));
        self
    }

    /// Make this a composite state owning `child`.
    pub fn composite(mut self, child: StateMachine<D>) -> Self {
        self.kind = StateKind::Composite(child);
        self
    }

    /// Make this a parallel state owning `regions`, all active at once.
    pub fn parallel(mut self, regions: Vec<StateMachine<D>>) -> Self {
        self.kind = StateKind::Parallel(regions);
        self
    }

    pub fn build(self) -> State<D> {
        State {
            id: self.id,
            owner: OnceCell::new(),
            handlers: self.handlers,
            on_entry: self.on_entry,
            on_exit: self.on_exit,
            kind: self.kind,
        }
    }
}
