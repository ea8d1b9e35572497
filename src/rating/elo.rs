//! Elo rating system implementation
//!
//! This module provides the logistic Elo update using the skillratings
//! crate. The K-factor is fixed for every competitor and partition.

use crate::config::RatingConfig;
use crate::error::{RatingError, Result};
use crate::rating::calculator::{RatingCalculator, RatingUpdate};
use skillratings::elo::{elo, expected_score, EloConfig, EloRating};
use skillratings::Outcomes;

/// Elo rating calculator implementation
#[derive(Debug, Clone)]
pub struct EloRatingCalculator {
    config: EloConfig,
}

impl EloRatingCalculator {
    /// Create a calculator with the given K-factor
    pub fn new(k_factor: f64) -> Result<Self> {
        if !k_factor.is_finite() || k_factor <= 0.0 {
            return Err(RatingError::ConfigurationError {
                message: "K-factor must be positive".to_string(),
            }
            .into());
        }

        Ok(Self {
            config: EloConfig { k: k_factor },
        })
    }

    pub fn from_config(config: &RatingConfig) -> Result<Self> {
        Self::new(config.k_factor)
    }

    pub fn k_factor(&self) -> f64 {
        self.config.k
    }
}

impl Default for EloRatingCalculator {
    fn default() -> Self {
        Self {
            config: EloConfig {
                k: crate::config::DEFAULT_K_FACTOR,
            },
        }
    }
}

impl RatingCalculator for EloRatingCalculator {
    fn expected_score(&self, rating_a: f64, rating_b: f64) -> f64 {
        let (expected_a, _) =
            expected_score(&EloRating { rating: rating_a }, &EloRating { rating: rating_b });
        expected_a
    }

    fn rate(&self, winner_rating: f64, loser_rating: f64) -> RatingUpdate {
        let (winner, loser) = elo(
            &EloRating {
                rating: winner_rating,
            },
            &EloRating {
                rating: loser_rating,
            },
            &Outcomes::WIN,
            &self.config,
        );

        RatingUpdate {
            winner_before: winner_rating,
            loser_before: loser_rating,
            winner_after: winner.rating,
            loser_after: loser.rating,
        }
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "elo",
            "k_factor": self.config.k,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_score() {
        let calculator = EloRatingCalculator::default();

        // Equal ratings should give 0.5
        assert!((calculator.expected_score(1500.0, 1500.0) - 0.5).abs() < 1e-12);

        // 400 points is a 10:1 favourite
        let score = calculator.expected_score(1900.0, 1500.0);
        assert!((score - 10.0 / 11.0).abs() < 1e-12);

        assert!(calculator.expected_score(1400.0, 1600.0) < 0.5);
    }

    #[test]
    fn test_rate_from_baseline() {
        let calculator = EloRatingCalculator::default();
        let update = calculator.rate(1500.0, 1500.0);

        assert!((update.winner_after - 1516.0).abs() < 1e-9);
        assert!((update.loser_after - 1484.0).abs() < 1e-9);
        assert!((update.points_exchanged() - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_rate_matches_logistic_formula() {
        let calculator = EloRatingCalculator::new(24.0).unwrap();
        let (ra, rb) = (1620.0, 1480.0);

        let ea = 1.0 / (1.0 + 10f64.powf((rb - ra) / 400.0));
        let update = calculator.rate(ra, rb);

        assert!((update.winner_after - (ra + 24.0 * (1.0 - ea))).abs() < 1e-9);
        assert!((update.loser_after - (rb - 24.0 * (1.0 - ea))).abs() < 1e-9);
    }

    #[test]
    fn test_upset_moves_more_points() {
        let calculator = EloRatingCalculator::default();
        let favourite_wins = calculator.rate(1700.0, 1500.0).points_exchanged();
        let underdog_wins = calculator.rate(1500.0, 1700.0).points_exchanged();
        assert!(underdog_wins > favourite_wins);
        assert!((underdog_wins + favourite_wins - 32.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_invalid_k() {
        assert!(EloRatingCalculator::new(0.0).is_err());
        assert!(EloRatingCalculator::new(f64::NAN).is_err());
        assert_eq!(EloRatingCalculator::new(40.0).unwrap().k_factor(), 40.0);
    }

    #[test]
    fn test_config_json() {
        let calculator = EloRatingCalculator::default();
        assert_eq!(calculator.config()["k_factor"], 32.0);
        assert_eq!(calculator.config()["type"], "elo");
    }
}
