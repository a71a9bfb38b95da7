//! States and their structural variants.

use crate::builder::{BuildError, StateBuilder};
use crate::core::context::TransitionContext;
use crate::core::handler::{Action, Handler};
use crate::engine::{MachineInner, StateMachine};
use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// Structure of a state.
pub enum StateKind<D> {
    /// Plain state without nested machines.
    Atomic,
    /// State owning one child machine, active while the state is.
    Composite(StateMachine<D>),
    /// State owning several child machines, all active while the state is.
    Parallel(Vec<StateMachine<D>>),
}

/// A node of a state machine.
///
/// States are built with [`State::builder`] (or [`State::leaf`]) and handed
/// to a machine, which becomes their owner. A state belongs to exactly one
/// machine for its whole life.
pub struct State<D = ()> {
    pub(crate) id: String,
    pub(crate) owner: OnceCell<Weak<MachineInner<D>>>,
    pub(crate) handlers: HashMap<String, Vec<Handler<D>>>,
    pub(crate) on_entry: Option<Action<D>>,
    pub(crate) on_exit: Option<Action<D>>,
    pub(crate) kind: StateKind<D>,
}

impl<D: 'static> State<D> {
    /// Start declaring a state.
    pub fn builder(id: impl Into<String>) -> StateBuilder<D> {
        StateBuilder::new(id)
    }

    /// Atomic state without handlers or hooks.
    pub fn leaf(id: impl Into<String>) -> Self {
        StateBuilder::new(id).build()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &StateKind<D> {
        &self.kind
    }

    /// Machine this state belongs to, once it has been built into one.
    pub fn owner(&self) -> Option<StateMachine<D>> {
        self.owner
            .get()
            .and_then(Weak::upgrade)
            .map(StateMachine::from_inner)
    }

    /// Child machine of a composite state.
    pub fn child(&self) -> Option<&StateMachine<D>> {
        match &self.kind {
            StateKind::Composite(child) => Some(child),
            _ => None,
        }
    }

    /// Child machines of a parallel state; empty for other kinds.
    pub fn children(&self) -> &[StateMachine<D>] {
        match &self.kind {
            StateKind::Parallel(children) => children,
            _ => &[],
        }
    }

    /// Handlers declared for `event`, in declaration order.
    pub fn handlers(&self, event: &str) -> Option<&[Handler<D>]> {
        self.handlers.get(event).map(Vec::as_slice)
    }

    /// Events this state declares handlers for.
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Run the entry hook, then bring nested machines up.
    pub(crate) fn enter(&self, ctx: &TransitionContext<'_, D>) {
        if let Some(hook) = &self.on_entry {
            hook(ctx);
        }
        match &self.kind {
            StateKind::Atomic => {}
            StateKind::Composite(child) => child.start(ctx.event(), ctx.data()),
            StateKind::Parallel(children) => {
                for child in children {
                    child.start(ctx.event(), ctx.data());
                }
            }
        }
    }

    /// Tear nested machines down, then run the exit hook.
    pub(crate) fn exit(&self, ctx: &TransitionContext<'_, D>) {
        match &self.kind {
            StateKind::Atomic => {}
            StateKind::Composite(child) => child.teardown(),
            StateKind::Parallel(children) => {
                for child in children {
                    child.teardown();
                }
            }
        }
        if let Some(hook) = &self.on_exit {
            hook(ctx);
        }
    }

    /// Offer an event to nested machines.
    ///
    /// Every region of a parallel state sees the event, whatever the other
    /// regions answer.
    pub(crate) fn handle(&self, event: &str, data: &D) -> bool {
        match &self.kind {
            StateKind::Atomic => false,
            StateKind::Composite(child) => child.dispatch(event, data),
            StateKind::Parallel(children) => {
                let mut handled = false;
                for child in children {
                    handled |= child.dispatch(event, data);
                }
                handled
            }
        }
    }

    /// Record `machine` as owner and link nested machines to it.
    ///
    /// Composite children are linked to the owner so their events reach the
    /// root. Parallel children are only marked as owned.
    pub(crate) fn assign_owner(&self, machine: &Rc<MachineInner<D>>) -> Result<(), BuildError> {
        self.owner
            .set(Rc::downgrade(machine))
            .map_err(|_| BuildError::AlreadyOwned {
                state: self.id.clone(),
            })?;

        match &self.kind {
            StateKind::Atomic => Ok(()),
            StateKind::Composite(child) => child.adopt(&self.id, Some(Rc::downgrade(machine))),
            StateKind::Parallel(children) => children
                .iter()
                .try_for_each(|child| child.adopt(&self.id, None)),
        }
    }
}

impl<D> PartialEq for State<D> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<D> Eq for State<D> {}

impl<D> fmt::Display for State<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl<D> fmt::Debug for State<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            StateKind::Atomic => "Atomic",
            StateKind::Composite(_) => "Composite",
            StateKind::Parallel(_) => "Parallel",
        };
        let mut events: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        events.sort_unstable();
        f.debug_struct("State")
            .field("id", &self.id)
            .field("kind", &kind)
            .field("events", &events)
            .finish()
    }
}
