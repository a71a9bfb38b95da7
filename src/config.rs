//! Per-machine configuration.

use serde::{Deserialize, Serialize};

/// Default number of transitions kept in a machine's history.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// Options applied when a machine is built.
///
/// Deserializable so embedding applications can keep machine options next to
/// the rest of their configuration. Missing fields take their defaults.
///
/// # Example
///
/// ```rust
/// use statenest::MachineConfig;
///
/// let config: MachineConfig = serde_json::from_str(r#"{ "label": "player" }"#).unwrap();
/// assert_eq!(config.label.as_deref(), Some("player"));
/// assert_eq!(config.history_limit, statenest::config::DEFAULT_HISTORY_LIMIT);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Human readable name used in diagnostics and snapshots
    pub label: Option<String>,
    /// Maximum number of recorded transitions; `0` disables recording
    pub history_limit: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            label: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}
