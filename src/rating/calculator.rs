//! Rating calculator trait
//!
//! The replay engine is written against this interface; the Elo
//! implementation lives in [`crate::rating::elo`].

use serde::{Deserialize, Serialize};

/// Ratings of both competitors before and after one contest
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingUpdate {
    pub winner_before: f64,
    pub loser_before: f64,
    pub winner_after: f64,
    pub loser_after: f64,
}

impl RatingUpdate {
    /// Points moved from the loser to the winner
    pub fn points_exchanged(&self) -> f64 {
        self.winner_after - self.winner_before
    }
}

/// Trait for calculating rating changes after a decided contest
pub trait RatingCalculator {
    /// Probability that a competitor rated `rating_a` beats one rated `rating_b`
    fn expected_score(&self, rating_a: f64, rating_b: f64) -> f64;

    /// New ratings after the `winner_rating` side beat the `loser_rating` side
    fn rate(&self, winner_rating: f64, loser_rating: f64) -> RatingUpdate;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;
}
