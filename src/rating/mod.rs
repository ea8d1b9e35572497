//! Rating system integration using the Elo algorithm
//!
//! This module provides the rating calculation interface, the Elo
//! implementation backed by the skillratings crate, and rating storage.

pub mod calculator;
pub mod elo;
pub mod storage;

// Re-export commonly used types
pub use calculator::{RatingCalculator, RatingUpdate};
pub use elo::EloRatingCalculator;
pub use storage::{InMemoryRatingStore, MockRatingStore, RatingStorage};
