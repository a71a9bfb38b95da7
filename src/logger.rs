//! Process-wide diagnostics sink.
//!
//! The engine never prints anything on its own. It reports transitions,
//! deferrals and unhandled events to whichever [`Logger`] is installed.
//! Until one is installed every message is discarded, and messages are not
//! even formatted.
//!
//! # Example
//!
//! ```rust
//! use statenest::logger::{self, TracingLogger};
//!
//! logger::set_logger(TracingLogger);
//! // ... run machines, diagnostics now flow into `tracing` ...
//! logger::reset_logger();
//! ```

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Sink for engine diagnostics.
pub trait Logger: Send + Sync {
    /// Lifecycle and transition messages.
    fn debug(&self, message: &str);

    /// High-volume messages: queueing, deferral, unhandled events.
    fn trace(&self, message: &str);
}

/// Logger that discards everything. This is the default.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn debug(&self, _message: &str) {}

    fn trace(&self, _message: &str) {}
}

/// Logger that forwards to the `tracing` crate under the `statenest` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "statenest", "{message}");
    }

    fn trace(&self, message: &str) {
        tracing::trace!(target: "statenest", "{message}");
    }
}

static LOGGER: RwLock<Option<Arc<dyn Logger>>> = RwLock::new(None);

/// Install `logger` as the process-wide sink, replacing any previous one.
pub fn set_logger<L>(logger: L)
where
    L: Logger + 'static,
{
    *LOGGER.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(logger));
}

/// Restore the default no-op sink.
pub fn reset_logger() {
    *LOGGER.write().unwrap_or_else(PoisonError::into_inner) = None;
}

/// Current sink. Returns a [`NoopLogger`] when nothing is installed.
pub fn logger() -> Arc<dyn Logger> {
    installed().unwrap_or_else(|| Arc::new(NoopLogger))
}

fn installed() -> Option<Arc<dyn Logger>> {
    LOGGER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map(Arc::clone)
}

pub(crate) fn debug(args: fmt::Arguments<'_>) {
    if let Some(sink) = installed() {
        sink.debug(&args.to_string());
    }
}

pub(crate) fn trace(args: fmt::Arguments<'_>) {
    if let Some(sink) = installed() {
        sink.trace(&args.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    thread_local! {
        static CAPTURED: RefCell<Vec<(String, String)>> = const { RefCell::new(Vec::new()) };
    }

    struct CaptureLogger;

    impl Logger for CaptureLogger {
        fn debug(&self, message: &str) {
            CAPTURED.with(|c| c.borrow_mut().push(("debug".into(), message.into())));
        }

        fn trace(&self, message: &str) {
            CAPTURED.with(|c| c.borrow_mut().push(("trace".into(), message.into())));
        }
    }

    #[test]
    fn noop_logger_accepts_everything() {
        let sink = NoopLogger;
        sink.debug("ignored");
        sink.trace("ignored");
    }

    #[test]
    fn installed_logger_receives_formatted_messages() {
        set_logger(CaptureLogger);

        debug(format_args!("entered {}", "A"));
        trace(format_args!("queued {}", 3));

        let captured = CAPTURED.with(|c| c.borrow().clone());
        assert!(captured.contains(&("debug".to_string(), "entered A".to_string())));
        assert!(captured.contains(&("trace".to_string(), "queued 3".to_string())));

        reset_logger();
    }
}
