//! Registry configuration

use crate::error::{MetricsError, MetricsResult};
use crate::history::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};

/// Settings applied to every history a registry creates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricsConfig {
    /// Number of recent samples kept per metric.
    ///
    /// Statistics describe at most this many samples; older ones are
    /// overwritten.
    pub history_capacity: usize,
}

impl MetricsConfig {
    /// Create a configuration with a custom history capacity.
    pub fn new(history_capacity: usize) -> Self {
        Self { history_capacity }
    }

    /// Builder method to set the history capacity.
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Check that the configuration can build a registry.
    pub fn validate(&self) -> MetricsResult<()> {
        if self.history_capacity == 0 {
            return Err(MetricsError::InvalidConfig(
                "history capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MetricsConfig::default();
        assert_eq!(config.history_capacity, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = MetricsConfig::default().with_history_capacity(0);
        assert!(matches!(
            config.validate(),
            Err(MetricsError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = MetricsConfig::new(64);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"historyCapacity":64}"#);

        let parsed: MetricsConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let parsed: MetricsConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, MetricsConfig::default());
    }
}
