//! Rating storage interface and implementations
//!
//! A store maps (competitor, partition) to a rating. Reads never create
//! entries: an unseen cell reads as the baseline. Writes are total overwrites
//! and are performed only by the replay engine.

use crate::config::DEFAULT_BASELINE;
use crate::types::{CompetitorId, Partition};
use std::collections::{BTreeSet, HashMap};

/// Trait for rating storage operations
pub trait RatingStorage {
    /// Rating of a competitor on a partition, baseline when unseen
    fn get(&self, competitor: &str, partition: &str) -> f64;

    /// Overwrite a single cell
    fn set(&mut self, competitor: &str, partition: &str, rating: f64);

    /// Whether the cell has ever been written
    fn has_rating(&self, competitor: &str, partition: &str) -> bool;

    /// Every competitor with at least one written cell, ascending
    fn competitors(&self) -> Vec<CompetitorId>;

    /// Every partition with at least one written cell, ascending
    fn partitions(&self) -> Vec<Partition>;

    /// Value returned for unseen cells
    fn baseline(&self) -> f64;

    /// Number of competitors in the store
    fn len(&self) -> usize {
        self.competitors().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory rating store, one nested map per competitor
#[derive(Debug, Clone, PartialEq)]
pub struct InMemoryRatingStore {
    ratings: HashMap<CompetitorId, HashMap<Partition, f64>>,
    baseline: f64,
}

impl InMemoryRatingStore {
    /// Create an empty store with the given baseline
    pub fn new(baseline: f64) -> Self {
        Self {
            ratings: HashMap::new(),
            baseline,
        }
    }

    /// All written cells of one competitor
    pub fn ratings_for(&self, competitor: &str) -> Option<&HashMap<Partition, f64>> {
        self.ratings.get(competitor)
    }
}

impl Default for InMemoryRatingStore {
    fn default() -> Self {
        Self::new(DEFAULT_BASELINE)
    }
}

impl RatingStorage for InMemoryRatingStore {
    fn get(&self, competitor: &str, partition: &str) -> f64 {
        self.ratings
            .get(competitor)
            .and_then(|by_partition| by_partition.get(partition))
            .copied()
            .unwrap_or(self.baseline)
    }

    fn set(&mut self, competitor: &str, partition: &str, rating: f64) {
        self.ratings
            .entry(competitor.to_string())
            .or_default()
            .insert(partition.to_string(), rating);
    }

    fn has_rating(&self, competitor: &str, partition: &str) -> bool {
        self.ratings
            .get(competitor)
            .is_some_and(|by_partition| by_partition.contains_key(partition))
    }

    fn competitors(&self) -> Vec<CompetitorId> {
        let mut competitors: Vec<CompetitorId> = self.ratings.keys().cloned().collect();
        competitors.sort();
        competitors
    }

    fn partitions(&self) -> Vec<Partition> {
        self.ratings
            .values()
            .flat_map(|by_partition| by_partition.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn baseline(&self) -> f64 {
        self.baseline
    }

    fn len(&self) -> usize {
        self.ratings.len()
    }
}

/// Mock rating store for testing, records every write
#[derive(Debug, Default)]
pub struct MockRatingStore {
    inner: InMemoryRatingStore,
    set_calls: Vec<(CompetitorId, Partition, f64)>,
}

impl MockRatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all set calls made (for testing)
    pub fn get_set_calls(&self) -> &[(CompetitorId, Partition, f64)] {
        &self.set_calls
    }

    /// Clear set calls (for testing)
    pub fn clear_set_calls(&mut self) {
        self.set_calls.clear();
    }
}

impl RatingStorage for MockRatingStore {
    fn get(&self, competitor: &str, partition: &str) -> f64 {
        self.inner.get(competitor, partition)
    }

    fn set(&mut self, competitor: &str, partition: &str, rating: f64) {
        self.set_calls
            .push((competitor.to_string(), partition.to_string(), rating));
        self.inner.set(competitor, partition, rating);
    }

    fn has_rating(&self, competitor: &str, partition: &str) -> bool {
        self.inner.has_rating(competitor, partition)
    }

    fn competitors(&self) -> Vec<CompetitorId> {
        self.inner.competitors()
    }

    fn partitions(&self) -> Vec<Partition> {
        self.inner.partitions()
    }

    fn baseline(&self) -> f64 {
        self.inner.baseline()
    }
}
