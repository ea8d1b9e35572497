//! A replay session: configuration, engine and the store it populates
//!
//! The store is rebuilt from scratch on every call to
//! [`RatingSession::rebuild`]; nothing carries over between record sets.

use crate::config::RatingConfig;
use crate::error::Result;
use crate::leaderboard;
use crate::prediction;
use crate::rating::{EloRatingCalculator, InMemoryRatingStore, RatingStorage};
use crate::replay::engine::{ReplayEngine, ReplaySummary};
use crate::types::{CompetitorId, LeaderboardEntry, MatchRecord, Partition, Prediction};
use tracing::debug;

/// Ratings computed from one complete, ordered record set
#[derive(Debug, Clone)]
pub struct RatingSession {
    config: RatingConfig,
    engine: ReplayEngine<EloRatingCalculator>,
    store: InMemoryRatingStore,
}

impl RatingSession {
    /// Create a session with an empty store
    pub fn new(config: RatingConfig) -> Result<Self> {
        config.validate()?;
        let engine = ReplayEngine::new(EloRatingCalculator::from_config(&config)?);
        let store = InMemoryRatingStore::new(config.baseline);

        Ok(Self {
            config,
            engine,
            store,
        })
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    pub fn store(&self) -> &InMemoryRatingStore {
        &self.store
    }

    /// Replace the ratings with a fresh replay of `records`
    ///
    /// On error the previous ratings are kept.
    pub fn rebuild(&mut self, records: &[MatchRecord]) -> Result<ReplaySummary> {
        let mut store = InMemoryRatingStore::new(self.config.baseline);
        let summary = self.engine.replay(&mut store, records)?;

        for partition in store.partitions() {
            if !self.config.is_recognized(&partition) {
                debug!("Rating unrecognized partition: {}", partition);
            }
        }

        self.store = store;
        Ok(summary)
    }

    pub fn rating(&self, competitor: &str, partition: &str) -> f64 {
        self.store.get(competitor, partition)
    }

    pub fn predict(
        &self,
        competitor_a: &str,
        competitor_b: &str,
        partition: &str,
    ) -> Result<Prediction> {
        prediction::predict_matchup(&self.store, competitor_a, competitor_b, partition)
    }

    pub fn leaderboard(&self, partition: &str, limit: usize) -> Vec<LeaderboardEntry> {
        leaderboard::rank(&self.store, partition, limit)
    }

    /// Whether any record mentioned this competitor
    pub fn is_known(&self, competitor: &str) -> bool {
        self.store.ratings_for(competitor).is_some()
    }

    /// All rated competitors, ascending
    pub fn competitors(&self) -> Vec<CompetitorId> {
        self.store.competitors()
    }

    /// Configured partitions first, then any other partition seen in the records
    pub fn partitions(&self) -> Vec<Partition> {
        let mut partitions = self.config.partitions.clone();
        for seen in self.store.partitions() {
            if !partitions.contains(&seen) {
                partitions.push(seen);
            }
        }
        partitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RatingError;
    use chrono::NaiveDate;

    fn record(month: u32, partition: &str, winner: &str, loser: &str) -> MatchRecord {
        MatchRecord::new(
            NaiveDate::from_ymd_opt(2022, month, 1).unwrap(),
            partition,
            winner,
            loser,
        )
        .unwrap()
    }

    #[test]
    fn test_rebuild_replaces_previous_ratings() {
        let mut session = RatingSession::new(RatingConfig::default()).unwrap();

        session.rebuild(&[record(1, "hard", "A", "B")]).unwrap();
        assert!(session.rating("A", "hard") > 1500.0);

        session.rebuild(&[record(2, "clay", "C", "D")]).unwrap();
        assert_eq!(session.rating("A", "hard"), 1500.0);
        assert_eq!(session.competitors(), vec!["C", "D"]);
    }

    #[test]
    fn test_failed_rebuild_keeps_ratings() {
        let mut session = RatingSession::new(RatingConfig::default()).unwrap();
        session.rebuild(&[record(1, "hard", "A", "B")]).unwrap();
        let before = session.store().clone();

        let err = session
            .rebuild(&[record(5, "hard", "A", "B"), record(2, "hard", "B", "A")])
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<RatingError>(),
            Some(RatingError::UnsortedRecords { .. })
        ));
        assert_eq!(session.store(), &before);
    }

    #[test]
    fn test_custom_baseline_and_k() {
        let config = RatingConfig {
            baseline: 1000.0,
            k_factor: 20.0,
            ..RatingConfig::default()
        };
        let mut session = RatingSession::new(config).unwrap();
        session.rebuild(&[record(1, "grass", "A", "B")]).unwrap();

        assert!((session.rating("A", "grass") - 1010.0).abs() < 1e-9);
        assert!((session.rating("B", "grass") - 990.0).abs() < 1e-9);
        assert_eq!(session.rating("A", "clay"), 1000.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RatingConfig {
            k_factor: 0.0,
            ..RatingConfig::default()
        };
        assert!(RatingSession::new(config).is_err());
    }

    #[test]
    fn test_partitions_include_unrecognized() {
        let mut session = RatingSession::new(RatingConfig::default()).unwrap();
        session
            .rebuild(&[record(1, "Carpet", "A", "B"), record(2, "clay", "A", "B")])
            .unwrap();

        assert_eq!(session.partitions(), vec!["hard", "clay", "grass", "carpet"]);
        assert!(session.rating("A", "carpet") > 1500.0);
    }

    #[test]
    fn test_queries() {
        let mut session = RatingSession::new(RatingConfig::default()).unwrap();
        session
            .rebuild(&[record(1, "clay", "A", "B"), record(2, "clay", "A", "C")])
            .unwrap();

        let prediction = session.predict("A", "B", "clay").unwrap();
        assert!(prediction.probability > 0.5);
        assert!(session.predict("A", "A", "clay").is_err());

        let board = session.leaderboard("clay", 2);
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].competitor, "A");

        assert!(session.is_known("C"));
        assert!(!session.is_known("Z"));
    }
}
