//! Event queue and reentrancy guard of a root machine.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// Whether a root machine is currently working through its queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchPhase {
    /// No event is being handled; the next emit starts draining.
    Idle,
    /// An event is being handled; further emits are only queued.
    Draining,
}

pub(crate) struct QueuedEvent<D> {
    pub(crate) event: String,
    pub(crate) data: D,
}

/// FIFO of pending events plus the phase flag.
///
/// Borrows of the queue never outlive a single push or pop, so hooks running
/// between pops are free to emit.
pub(crate) struct EventQueue<D> {
    pending: RefCell<VecDeque<QueuedEvent<D>>>,
    phase: Cell<DispatchPhase>,
}

impl<D> EventQueue<D> {
    pub(crate) fn new() -> Self {
        Self {
            pending: RefCell::new(VecDeque::new()),
            phase: Cell::new(DispatchPhase::Idle),
        }
    }

    pub(crate) fn push(&self, event: String, data: D) {
        self.pending
            .borrow_mut()
            .push_back(QueuedEvent { event, data });
    }

    pub(crate) fn pop(&self) -> Option<QueuedEvent<D>> {
        self.pending.borrow_mut().pop_front()
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub(crate) fn phase(&self) -> DispatchPhase {
        self.phase.get()
    }

    /// Switch to [`DispatchPhase::Draining`].
    ///
    /// Returns `None` if a drain is already running. The returned guard puts
    /// the queue back to idle when dropped; if it is dropped while unwinding
    /// from a panicking hook, pending events are discarded as well.
    pub(crate) fn begin_drain(&self) -> Option<Drain<'_, D>> {
        match self.phase.get() {
            DispatchPhase::Draining => None,
            DispatchPhase::Idle => {
                self.phase.set(DispatchPhase::Draining);
                Some(Drain { queue: self })
            }
        }
    }
}

pub(crate) struct Drain<'a, D> {
    queue: &'a EventQueue<D>,
}

impl<D> Drop for Drain<'_, D> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            if let Ok(mut pending) = self.queue.pending.try_borrow_mut() {
                pending.clear();
            }
        }
        self.queue.phase.set(DispatchPhase::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_come_out_in_fifo_order() {
        let queue = EventQueue::new();
        queue.push("a".into(), 1);
        queue.push("b".into(), 2);

        let first = queue.pop().unwrap();
        assert_eq!((first.event.as_str(), first.data), ("a", 1));
        let second = queue.pop().unwrap();
        assert_eq!((second.event.as_str(), second.data), ("b", 2));
        assert!(queue.pop().is_none());
    }

    #[test]
    fn only_one_drain_at_a_time() {
        let queue: EventQueue<()> = EventQueue::new();

        let drain = queue.begin_drain();
        assert!(drain.is_some());
        assert_eq!(queue.phase(), DispatchPhase::Draining);
        assert!(queue.begin_drain().is_none());

        drop(drain);
        assert_eq!(queue.phase(), DispatchPhase::Idle);
        assert!(queue.begin_drain().is_some());
    }

    #[test]
    fn panic_during_drain_resets_phase_and_clears_queue() {
        let queue: EventQueue<()> = EventQueue::new();
        queue.push("pending".into(), ());

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _drain = queue.begin_drain();
            panic!("hook failed");
        }));

        assert!(result.is_err());
        assert_eq!(queue.phase(), DispatchPhase::Idle);
        assert_eq!(queue.len(), 0);
    }
}
