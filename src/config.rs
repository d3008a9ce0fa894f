//! Store configuration.

use serde::{Deserialize, Serialize};

/// Tunable knobs for the marketplace core.
///
/// Deserializable so a host app can load overrides from its settings file;
/// every field falls back to the marketplace defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Sales tax applied at checkout, as a percentage of the subtotal.
    #[serde(default = "default_tax_rate")]
    pub tax_rate_percent: f64,

    /// Trailing window for dashboard statistics, in days.
    #[serde(default = "default_window_days")]
    pub analytics_window_days: i64,

    /// Number of entries in dashboard leaderboards.
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,

    /// Prefix for human-readable order numbers.
    #[serde(default = "default_order_prefix")]
    pub order_number_prefix: String,
}

fn default_tax_rate() -> f64 {
    8.75
}

fn default_window_days() -> i64 {
    30
}

fn default_leaderboard_size() -> usize {
    5
}

fn default_order_prefix() -> String {
    "ORD".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            tax_rate_percent: default_tax_rate(),
            analytics_window_days: default_window_days(),
            leaderboard_size: default_leaderboard_size(),
            order_number_prefix: default_order_prefix(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert!((config.tax_rate_percent - 8.75).abs() < f64::EPSILON);
        assert_eq!(config.analytics_window_days, 30);
        assert_eq!(config.leaderboard_size, 5);
        assert_eq!(config.order_number_prefix, "ORD");
    }

    #[test]
    fn test_partial_deserialization_fills_defaults() {
        let config: StoreConfig = serde_json::from_str(r#"{"tax_rate_percent": 5.0}"#).unwrap();
        assert!((config.tax_rate_percent - 5.0).abs() < f64::EPSILON);
        assert_eq!(config.analytics_window_days, 30);
        assert_eq!(config.order_number_prefix, "ORD");
    }
}
