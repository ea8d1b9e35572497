//! Replay of ordered match records into a rating store

pub mod engine;
pub mod session;

// Re-export commonly used types
pub use engine::{check_chronological, ReplayEngine, ReplaySummary};
pub use session::RatingSession;
