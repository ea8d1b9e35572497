//! Common types used throughout the rating engine

use crate::error::{RatingError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable identifier for a competitor (exact string match, no fuzzy lookup)
pub type CompetitorId = String;

/// Case-normalized partition key (the playing surface)
pub type Partition = String;

/// Partition used when every record is rated on a single surface-agnostic scale
pub const COMBINED_PARTITION: &str = "overall";

/// A single validated contest outcome
///
/// Fields are private so that every value in circulation went through
/// [`MatchRecord::new`]: the partition is lowercase and the winner differs
/// from the loser.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MatchRecord {
    occurred_on: NaiveDate,
    partition: Partition,
    winner: CompetitorId,
    loser: CompetitorId,
}

impl MatchRecord {
    /// Build a record, folding the partition to lowercase
    pub fn new(
        occurred_on: NaiveDate,
        partition: impl AsRef<str>,
        winner: impl Into<CompetitorId>,
        loser: impl Into<CompetitorId>,
    ) -> Result<Self> {
        let partition = normalize_partition(partition.as_ref());
        let winner = winner.into();
        let loser = loser.into();

        if partition.is_empty() {
            return Err(malformed("partition is empty"));
        }
        if winner.is_empty() || loser.is_empty() {
            return Err(malformed("competitor name is empty"));
        }
        if winner == loser {
            return Err(malformed(&format!("{} is listed as both winner and loser", winner)));
        }

        Ok(Self {
            occurred_on,
            partition,
            winner,
            loser,
        })
    }

    pub fn occurred_on(&self) -> NaiveDate {
        self.occurred_on
    }

    pub fn partition(&self) -> &str {
        &self.partition
    }

    pub fn winner(&self) -> &str {
        &self.winner
    }

    pub fn loser(&self) -> &str {
        &self.loser
    }
}

fn malformed(reason: &str) -> anyhow::Error {
    RatingError::MalformedRecord {
        reason: reason.to_string(),
    }
    .into()
}

/// Canonical form of a partition key
pub fn normalize_partition(raw: &str) -> Partition {
    raw.trim().to_lowercase()
}

/// One row of a leaderboard, regenerated on every query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based position
    pub rank: usize,
    pub competitor: CompetitorId,
    pub rating: f64,
}

/// Win probability of `competitor_a` over `competitor_b` on a partition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub competitor_a: CompetitorId,
    pub competitor_b: CompetitorId,
    pub partition: Partition,
    pub rating_a: f64,
    pub rating_b: f64,
    pub probability: f64,
}
