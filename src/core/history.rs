//! Bounded record of completed state switches.
//!
//! Every machine keeps its own history. Nested machines record their own
//! switches, so the history of a root only shows switches between its
//! top-level states.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One completed switch.
///
/// `from` is `None` for the switch performed by `init`, `to` is `None` for
/// `teardown` or a handler without a target. `event` is `None` for lifecycle
/// switches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// Id of the state that was exited
    pub from: Option<String>,
    /// Id of the state that was entered
    pub to: Option<String>,
    /// Event that caused the switch
    pub event: Option<String>,
    /// When the switch completed
    pub timestamp: DateTime<Utc>,
}

/// Ordered, bounded history of switches.
///
/// Once `limit` entries are stored the oldest one is evicted. A limit of `0`
/// disables recording.
///
/// # Example
///
/// ```rust
/// use statenest::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let mut history = StateHistory::with_limit(8);
/// history.record(StateTransition {
///     from: None,
///     to: Some("Idle".into()),
///     event: None,
///     timestamp: Utc::now(),
/// });
/// history.record(StateTransition {
///     from: Some("Idle".into()),
///     to: Some("Busy".into()),
///     event: Some("start".into()),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec![None, Some("Idle"), Some("Busy")]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<StateTransition>,
    limit: usize,
}

impl Default for StateHistory {
    fn default() -> Self {
        Self::with_limit(crate::config::DEFAULT_HISTORY_LIMIT)
    }
}

impl StateHistory {
    /// Create an empty history keeping at most `limit` transitions.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: Vec::new(),
            limit,
        }
    }

    /// Maximum number of kept transitions.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Append a transition, evicting the oldest one when full.
    pub fn record(&mut self, transition: StateTransition) {
        if self.limit == 0 {
            return;
        }
        if self.transitions.len() == self.limit {
            self.transitions.remove(0);
        }
        self.transitions.push(transition);
    }

    /// States traversed: the `from` of the oldest kept transition, then the
    /// `to` of each transition.
    pub fn get_path(&self) -> Vec<Option<&str>> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(first.from.as_deref());
        }
        path.extend(self.transitions.iter().map(|t| t.to.as_deref()));
        path
    }

    /// Time between the oldest and newest kept transition.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Kept transitions, oldest first.
    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
