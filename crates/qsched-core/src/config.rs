//! Builder configuration.

use serde::{Deserialize, Serialize};

use crate::error::SchedResult;

/// Weights applied to sentinel edges and post-build checks.
///
/// The defaults give every edge leaving `Entry` and every closure edge into
/// `Exit` a weight of one cycle, so the first instruction lands in cycle 1
/// and the schedule length counts the closing edge.
///
/// ```
/// use qsched_core::HazardConfig;
///
/// let config = HazardConfig::from_json(r#"{ "exit_weight": 0 }"#).unwrap();
/// assert_eq!(config.entry_weight, 1);
/// assert_eq!(config.exit_weight, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardConfig {
    /// Weight of edges whose source is `Entry`.
    pub entry_weight: u32,
    /// Weight of the closure edges into `Exit`.
    pub exit_weight: u32,
    /// Check the graph invariants after every build.
    pub verify: bool,
}

impl HazardConfig {
    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> SchedResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the weight of edges leaving `Entry`.
    #[must_use]
    pub fn with_entry_weight(mut self, weight: u32) -> Self {
        self.entry_weight = weight;
        self
    }

    /// Set the weight of closure edges into `Exit`.
    #[must_use]
    pub fn with_exit_weight(mut self, weight: u32) -> Self {
        self.exit_weight = weight;
        self
    }

    /// Enable or disable post-build verification.
    #[must_use]
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            entry_weight: 1,
            exit_weight: 1,
            verify: cfg!(debug_assertions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HazardConfig::default();
        assert_eq!(config.entry_weight, 1);
        assert_eq!(config.exit_weight, 1);
    }

    #[test]
    fn test_from_json_partial() {
        let config = HazardConfig::from_json(r#"{ "entry_weight": 0, "verify": true }"#).unwrap();
        assert_eq!(config.entry_weight, 0);
        assert_eq!(config.exit_weight, 1);
        assert!(config.verify);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(HazardConfig::from_json("{ entry_weight: ").is_err());
    }
}
