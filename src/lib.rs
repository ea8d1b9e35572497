//! Surface Elo - surface-partitioned Elo ratings for tennis
//!
//! This crate replays chronologically ordered match records into per-surface
//! Elo ratings and answers win-probability and leaderboard queries against
//! the result.

pub mod config;
pub mod error;
pub mod ingest;
pub mod leaderboard;
pub mod prediction;
pub mod rating;
pub mod replay;
pub mod types;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use ingest::{RecordNormalizer, RecordSource};
pub use rating::{InMemoryRatingStore, RatingStorage};
pub use replay::{RatingSession, ReplayEngine};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
