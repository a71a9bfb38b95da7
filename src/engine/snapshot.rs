//! Serializable view of the active state tree.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Active configuration of a machine and its nested regions.
///
/// A composite current state contributes one region, a parallel one
/// contributes one region per child machine, in declaration order.
///
/// # Example
///
/// ```rust
/// use statenest::{State, StateMachine};
///
/// let child: StateMachine = StateMachine::new(vec![State::leaf("Track1")]).unwrap();
/// let player = StateMachine::new(vec![
///     State::builder("Playing").composite(child).build(),
/// ])
/// .unwrap();
///
/// player.init(None);
/// let snapshot = player.configuration();
///
/// assert_eq!(snapshot.current.as_deref(), Some("Playing"));
/// assert!(snapshot.is_active("Track1"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Instance id of the machine
    pub machine: Uuid,
    /// Label configured for the machine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Id of the current state, `None` when inactive
    pub current: Option<String>,
    /// Configurations of the machines nested in the current state
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<Configuration>,
}

impl Configuration {
    /// Whether `id` is current here or in any nested region.
    pub fn is_active(&self, id: &str) -> bool {
        self.current.as_deref() == Some(id) || self.regions.iter().any(|r| r.is_active(id))
    }

    /// Ids of the innermost active states, depth first.
    pub fn leaves(&self) -> Vec<&str> {
        if self.regions.is_empty() {
            return self.current.as_deref().into_iter().collect();
        }
        self.regions.iter().flat_map(Configuration::leaves).collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
