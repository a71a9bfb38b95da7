//! Context handed to guards, actions and entry/exit hooks.

use crate::core::state::State;
use crate::engine::StateMachine;

/// View of a switch in progress.
///
/// The same context is seen by every hook of one switch: the exit hook of
/// `from`, the action, then the entry hook of `to`. For an entry hook the
/// "other" state is [`from`](Self::from); for an exit hook it is
/// [`to`](Self::to).
///
/// `event` and `data` are absent for switches performed by `init` and
/// `teardown` that were not caused by an event.
pub struct TransitionContext<'a, D> {
    machine: &'a StateMachine<D>,
    from: Option<&'a State<D>>,
    to: Option<&'a State<D>>,
    event: Option<&'a str>,
    data: Option<&'a D>,
}

impl<'a, D: 'static> TransitionContext<'a, D> {
    pub(crate) fn new(
        machine: &'a StateMachine<D>,
        from: Option<&'a State<D>>,
        to: Option<&'a State<D>>,
        event: Option<&'a str>,
        data: Option<&'a D>,
    ) -> Self {
        Self {
            machine,
            from,
            to,
            event,
            data,
        }
    }

    /// Machine performing the switch.
    pub fn machine(&self) -> &'a StateMachine<D> {
        self.machine
    }

    /// State being left, if any.
    pub fn from(&self) -> Option<&'a State<D>> {
        self.from
    }

    /// State being entered, if any.
    pub fn to(&self) -> Option<&'a State<D>> {
        self.to
    }

    pub fn event(&self) -> Option<&'a str> {
        self.event
    }

    pub fn data(&self) -> Option<&'a D> {
        self.data
    }

    /// Emit a follow-up event.
    ///
    /// While an event is being handled this only queues `event`; it is
    /// processed after the current one has run to completion.
    pub fn emit(&self, event: impl Into<String>, data: D) {
        self.machine.emit(event, data);
    }
}
