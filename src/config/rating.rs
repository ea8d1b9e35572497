//! Rating system configuration

use crate::error::{RatingError, Result};
use serde::{Deserialize, Serialize};

/// Default rating for any competitor/partition pair with no recorded contest
pub const DEFAULT_BASELINE: f64 = 1500.0;

/// Default maximum number of points exchanged per contest
pub const DEFAULT_K_FACTOR: f64 = 32.0;

/// Tunable constants of the Elo update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    pub baseline: f64,
    pub k_factor: f64,
    /// Partitions offered to users; others are still rated, never rejected
    pub partitions: Vec<String>,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            baseline: DEFAULT_BASELINE,
            k_factor: DEFAULT_K_FACTOR,
            partitions: vec!["hard".to_string(), "clay".to_string(), "grass".to_string()],
        }
    }
}

impl RatingConfig {
    /// Whether a (normalized) partition is one of the configured surfaces
    pub fn is_recognized(&self, partition: &str) -> bool {
        self.partitions.iter().any(|p| p == partition)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.baseline.is_finite() {
            return Err(RatingError::ConfigurationError {
                message: "Baseline rating must be finite".to_string(),
            }
            .into());
        }

        if !self.k_factor.is_finite() || self.k_factor <= 0.0 {
            return Err(RatingError::ConfigurationError {
                message: "K-factor must be positive".to_string(),
            }
            .into());
        }

        if self.partitions.is_empty() {
            return Err(RatingError::ConfigurationError {
                message: "At least one partition must be configured".to_string(),
            }
            .into());
        }

        if let Some(bad) = self
            .partitions
            .iter()
            .find(|p| p.is_empty() || p.trim().to_lowercase() != **p)
        {
            return Err(RatingError::ConfigurationError {
                message: format!("Partition '{}' must be non-empty lowercase", bad),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RatingConfig::default();
        assert_eq!(config.baseline, 1500.0);
        assert_eq!(config.k_factor, 32.0);
        assert!(config.is_recognized("clay"));
        assert!(!config.is_recognized("carpet"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_k() {
        let config = RatingConfig {
            k_factor: 0.0,
            ..RatingConfig::default()
        };
        assert!(config.validate().is_err());

        let config = RatingConfig {
            k_factor: -4.0,
            ..RatingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_partitions() {
        let config = RatingConfig {
            partitions: vec![],
            ..RatingConfig::default()
        };
        assert!(config.validate().is_err());

        let config = RatingConfig {
            partitions: vec!["Hard".to_string()],
            ..RatingConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
