//! State machine owning states and driving transitions.

use crate::builder::{BuildError, StateMachineBuilder};
use crate::config::MachineConfig;
use crate::core::{
    Action, Handler, State, StateHistory, StateKind, StateTransition, TransitionContext,
};
use crate::engine::queue::{DispatchPhase, EventQueue, QueuedEvent};
use crate::engine::snapshot::Configuration;
use crate::logger;
use chrono::Utc;
use std::cell::{Cell, OnceCell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use uuid::Uuid;

pub(crate) struct MachineInner<D> {
    id: Uuid,
    label: Option<String>,
    states: Vec<State<D>>,
    index: HashMap<String, usize>,
    current: Cell<Option<usize>>,
    /// Machine owning the composite state this machine is nested in.
    parent: OnceCell<Weak<MachineInner<D>>>,
    adopted: Cell<bool>,
    queue: EventQueue<D>,
    history: RefCell<StateHistory>,
}

/// Hierarchical state machine with run-to-completion dispatch.
///
/// `StateMachine` is a cheap, clonable handle; clones refer to the same
/// machine. Machines are single-threaded and are driven entirely by
/// [`emit`](Self::emit).
///
/// Events emitted on a nested machine are routed to the root of its
/// hierarchy, which owns the only queue. While the root handles an event,
/// further emits (typically from hooks) are queued and processed in FIFO
/// order once the current event has run to completion.
///
/// # Example
///
/// ```rust
/// use statenest::{Handler, State, StateMachine};
///
/// let machine = StateMachine::new(vec![
///     State::builder("Green").on("tick", Handler::to("Yellow")).build(),
///     State::builder("Yellow").on("tick", Handler::to("Red")).build(),
///     State::builder("Red").on("tick", Handler::to("Green")).build(),
/// ])
/// .unwrap();
///
/// machine.init(None);
/// machine.emit("tick", ());
/// machine.emit("tick", ());
/// assert_eq!(machine.current_id(), Some("Red"));
/// ```
pub struct StateMachine<D = ()> {
    inner: Rc<MachineInner<D>>,
}

impl<D: 'static> StateMachine<D> {
    /// Build a machine from `states`; the first one is the initial state.
    pub fn new(states: Vec<State<D>>) -> Result<Self, BuildError> {
        StateMachineBuilder::new().states(states).build()
    }

    /// Start a [`StateMachineBuilder`].
    pub fn builder() -> StateMachineBuilder<D> {
        StateMachineBuilder::new()
    }

    /// Wire a validated definition together.
    pub(crate) fn assemble(states: Vec<State<D>>, config: MachineConfig) -> Result<Self, BuildError> {
        let index = states
            .iter()
            .enumerate()
            .map(|(ix, state)| (state.id().to_string(), ix))
            .collect();

        let inner = Rc::new(MachineInner {
            id: Uuid::new_v4(),
            label: config.label,
            states,
            index,
            current: Cell::new(None),
            parent: OnceCell::new(),
            adopted: Cell::new(false),
            queue: EventQueue::new(),
            history: RefCell::new(StateHistory::with_limit(config.history_limit)),
        });

        for state in &inner.states {
            state.assign_owner(&inner)?;
        }

        let machine = Self::from_inner(inner);
        logger::debug(format_args!(
            "{machine}: built with {} states",
            machine.inner.states.len()
        ));
        Ok(machine)
    }

    pub(crate) fn from_inner(inner: Rc<MachineInner<D>>) -> Self {
        Self { inner }
    }

    #[cfg(test)]
    pub(crate) fn inner(&self) -> &Rc<MachineInner<D>> {
        &self.inner
    }

    /// Record that this machine is nested in `state`.
    ///
    /// `parent` is `Some` for composite children, which route their events
    /// to the root of the parent's hierarchy.
    pub(crate) fn adopt(
        &self,
        state: &str,
        parent: Option<Weak<MachineInner<D>>>,
    ) -> Result<(), BuildError> {
        let nested = || BuildError::AlreadyNested {
            state: state.to_string(),
        };
        if self.inner.adopted.replace(true) {
            return Err(nested());
        }
        if let Some(parent) = parent {
            self.inner.parent.set(parent).map_err(|_| nested())?;
        }
        Ok(())
    }

    pub(crate) fn is_adopted(&self) -> bool {
        self.inner.adopted.get()
    }

    /// Enter the initial state, exiting the current one first if the machine
    /// is already active.
    pub fn init(&self, data: Option<&D>) -> &Self {
        self.start(None, data);
        self
    }

    pub(crate) fn start(&self, event: Option<&str>, data: Option<&D>) {
        let initial = (!self.inner.states.is_empty()).then_some(0);
        self.switch(initial, event, data, None);
    }

    /// Exit the current state, leaving the machine inactive.
    pub fn teardown(&self) {
        self.switch(None, None, None, None);
    }

    /// Submit an event.
    ///
    /// Nested machines forward the event to their root. At the root the event
    /// is queued; if no event is being handled the queue is drained
    /// immediately, otherwise the event waits for its turn.
    pub fn emit(&self, event: impl Into<String>, data: D) {
        let event = event.into();

        let mut root = self.clone();
        while let Some(parent) = root.inner.parent.get() {
            let Some(parent) = parent.upgrade() else {
                logger::debug(format_args!(
                    "{self}: dropped '{event}', root machine no longer exists"
                ));
                return;
            };
            root = Self::from_inner(parent);
        }
        if !root.ptr_eq(self) {
            return root.emit(event, data);
        }

        logger::trace(format_args!("{self}: queued '{event}'"));
        self.inner.queue.push(event, data);

        let Some(_drain) = self.inner.queue.begin_drain() else {
            logger::trace(format_args!(
                "{self}: dispatch in progress, {} event(s) pending",
                self.inner.queue.len()
            ));
            return;
        };

        while let Some(QueuedEvent { event, data }) = self.inner.queue.pop() {
            if !self.dispatch(&event, &data) {
                logger::trace(format_args!("{self}: '{event}' not handled"));
            }
        }
    }

    /// Alias of [`emit`](Self::emit).
    pub fn fire(&self, event: impl Into<String>, data: D) {
        self.emit(event, data);
    }

    /// Handle one event synchronously and report whether anything handled it.
    ///
    /// Nested states reach their child machines through this method. It
    /// bypasses the queue; external stimuli should go through
    /// [`emit`](Self::emit) to keep run-to-completion ordering.
    pub fn dispatch(&self, event: &str, data: &D) -> bool {
        let Some(current) = self.current() else {
            logger::trace(format_args!("{self}: '{event}' ignored, machine inactive"));
            return false;
        };

        if current.handle(event, data) {
            return true;
        }

        let Some(handlers) = current.handlers(event) else {
            return false;
        };
        if handlers
            .iter()
            .any(|handler| self.attempt(current, handler, event, data))
        {
            return true;
        }

        logger::trace(format_args!(
            "{self}: every handler of '{current}' rejected '{event}'"
        ));
        false
    }

    /// Fire `handler` if its guard accepts; a rejection has no side effects.
    fn attempt(&self, current: &State<D>, handler: &Handler<D>, event: &str, data: &D) -> bool {
        let target = match handler.target() {
            Some(id) => match self.inner.index.get(id) {
                Some(&ix) => Some(ix),
                None => return false,
            },
            None => None,
        };

        let to = target.and_then(|ix| self.inner.states.get(ix));
        let ctx = TransitionContext::new(self, Some(current), to, Some(event), Some(data));
        if !handler.accepts(&ctx) {
            return false;
        }

        self.switch(target, Some(event), Some(data), handler.action());
        true
    }

    /// Exit the current state, run the action, update `current`, then enter
    /// the target.
    fn switch(
        &self,
        target: Option<usize>,
        event: Option<&str>,
        data: Option<&D>,
        action: Option<&Action<D>>,
    ) {
        let from = self
            .inner
            .current
            .get()
            .and_then(|ix| self.inner.states.get(ix));
        let to = target.and_then(|ix| self.inner.states.get(ix));
        if from.is_none() && to.is_none() {
            return;
        }

        let ctx = TransitionContext::new(self, from, to, event, data);
        if let Some(from) = from {
            from.exit(&ctx);
        }
        if let Some(action) = action {
            action(&ctx);
        }
        self.inner.current.set(target);
        self.record(from, to, event);
        if let Some(to) = to {
            to.enter(&ctx);
        }
    }

    fn record(&self, from: Option<&State<D>>, to: Option<&State<D>>, event: Option<&str>) {
        logger::debug(format_args!(
            "{self}: {} -> {}{}",
            from.map_or("<none>", State::id),
            to.map_or("<none>", State::id),
            OnEvent(event)
        ));
        self.inner.history.borrow_mut().record(StateTransition {
            from: from.map(|s| s.id().to_string()),
            to: to.map(|s| s.id().to_string()),
            event: event.map(String::from),
            timestamp: Utc::now(),
        });
    }

    /// Active state, `None` before `init` and after `teardown`.
    pub fn current(&self) -> Option<&State<D>> {
        self.inner
            .current
            .get()
            .and_then(|ix| self.inner.states.get(ix))
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current().map(State::id)
    }

    pub fn initial_state(&self) -> Option<&State<D>> {
        self.inner.states.first()
    }

    /// State named `id`.
    pub fn state(&self, id: &str) -> Option<&State<D>> {
        self.inner
            .index
            .get(id)
            .and_then(|&ix| self.inner.states.get(ix))
    }

    /// States in declaration order.
    pub fn states(&self) -> impl Iterator<Item = &State<D>> {
        self.inner.states.iter()
    }

    /// Whether `id` is current here or in any active nested machine.
    pub fn is_in(&self, id: &str) -> bool {
        let Some(current) = self.current() else {
            return false;
        };
        current.id() == id
            || match current.kind() {
                StateKind::Atomic => false,
                StateKind::Composite(child) => child.is_in(id),
                StateKind::Parallel(children) => children.iter().any(|c| c.is_in(id)),
            }
    }

    /// Snapshot of the active state tree.
    pub fn configuration(&self) -> Configuration {
        let regions = match self.current().map(State::kind) {
            Some(StateKind::Composite(child)) => vec![child.configuration()],
            Some(StateKind::Parallel(children)) => {
                children.iter().map(StateMachine::configuration).collect()
            }
            _ => Vec::new(),
        };
        Configuration {
            machine: self.inner.id,
            label: self.inner.label.clone(),
            current: self.current_id().map(String::from),
            regions,
        }
    }

    /// Copy of the recorded switches.
    pub fn history(&self) -> StateHistory {
        self.inner.history.borrow().clone()
    }

    /// Machine owning the composite state this machine is nested in.
    pub fn parent(&self) -> Option<StateMachine<D>> {
        self.inner
            .parent
            .get()
            .and_then(Weak::upgrade)
            .map(Self::from_inner)
    }

    /// Machines above this one, root first, immediate parent last. Empty for
    /// a root.
    pub fn ancestors(&self) -> Vec<StateMachine<D>> {
        let mut chain = Vec::new();
        let mut next = self.parent();
        while let Some(machine) = next {
            next = machine.parent();
            chain.push(machine);
        }
        chain.reverse();
        chain
    }

    /// Machine that owns the queue this machine's events go to.
    pub fn root(&self) -> StateMachine<D> {
        self.ancestors()
            .into_iter()
            .next()
            .unwrap_or_else(|| self.clone())
    }

    /// Whether this machine dispatches its own events.
    pub fn is_root(&self) -> bool {
        self.inner.parent.get().is_none()
    }

    /// Number of machines above this one.
    pub fn depth(&self) -> usize {
        self.ancestors().len()
    }

    pub fn phase(&self) -> DispatchPhase {
        self.inner.queue.phase()
    }

    pub fn is_dispatching(&self) -> bool {
        self.phase() == DispatchPhase::Draining
    }

    /// Events waiting in this machine's queue.
    pub fn pending_events(&self) -> usize {
        self.inner.queue.len()
    }
}

impl<D> StateMachine<D> {
    /// Instance id, unique per machine.
    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    pub fn label(&self) -> Option<&str> {
        self.inner.label.as_deref()
    }

    /// Whether both handles refer to the same machine.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Renders " on '<event>'" for event-driven switches, nothing otherwise.
struct OnEvent<'a>(Option<&'a str>);

impl fmt::Display for OnEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(event) => write!(f, " on '{event}'"),
            None => Ok(()),
        }
    }
}

impl<D> Clone for StateMachine<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<D> fmt::Display for StateMachine<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.label {
            Some(label) => write!(f, "machine '{label}'"),
            None => write!(f, "machine {}", self.inner.id.simple()),
        }
    }
}

impl<D> fmt::Debug for StateMachine<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let current = self
            .inner
            .current
            .get()
            .and_then(|ix| self.inner.states.get(ix))
            .map(|s| s.id.as_str());
        f.debug_struct("StateMachine")
            .field("id", &self.inner.id)
            .field("label", &self.inner.label)
            .field("current", &current)
            .field("states", &self.inner.states.len())
            .finish()
    }
}
