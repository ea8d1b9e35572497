//! Chronological replay of match records
//!
//! The Elo update depends on every earlier update to the same competitors, so
//! records must be applied strictly in date order. The engine checks that
//! precondition up front and refuses unsorted input instead of re-sorting it.

use crate::error::{RatingError, Result};
use crate::rating::{EloRatingCalculator, RatingCalculator, RatingStorage, RatingUpdate};
use crate::types::MatchRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// What a replay did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaySummary {
    pub records_applied: usize,
    pub competitors: usize,
    pub partitions: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

/// Applies a rating calculator to a store, one record at a time
#[derive(Debug, Clone, Default)]
pub struct ReplayEngine<C = EloRatingCalculator> {
    calculator: C,
}

impl<C: RatingCalculator> ReplayEngine<C> {
    pub fn new(calculator: C) -> Self {
        Self { calculator }
    }

    pub fn calculator(&self) -> &C {
        &self.calculator
    }

    /// Update the two competitors of one record on its partition
    pub fn apply<S: RatingStorage + ?Sized>(&self, store: &mut S, record: &MatchRecord) -> RatingUpdate {
        let partition = record.partition();
        let winner_rating = store.get(record.winner(), partition);
        let loser_rating = store.get(record.loser(), partition);

        let update = self.calculator.rate(winner_rating, loser_rating);

        store.set(record.winner(), partition, update.winner_after);
        store.set(record.loser(), partition, update.loser_after);

        update
    }

    /// Apply every record in order
    ///
    /// Fails without touching the store when the records are not sorted by
    /// date.
    pub fn replay<S: RatingStorage + ?Sized>(
        &self,
        store: &mut S,
        records: &[MatchRecord],
    ) -> Result<ReplaySummary> {
        check_chronological(records)?;

        let mut competitors = BTreeSet::new();
        let mut partitions = BTreeSet::new();

        for record in records {
            let update = self.apply(store, record);
            debug!(
                "{} {} def. {} on {}: {:+.2}",
                record.occurred_on(),
                record.winner(),
                record.loser(),
                record.partition(),
                update.points_exchanged()
            );

            competitors.insert(record.winner());
            competitors.insert(record.loser());
            partitions.insert(record.partition());
        }

        let summary = ReplaySummary {
            records_applied: records.len(),
            competitors: competitors.len(),
            partitions: partitions.len(),
            first_date: records.first().map(MatchRecord::occurred_on),
            last_date: records.last().map(MatchRecord::occurred_on),
        };

        info!(
            "Replayed {} records: {} competitors across {} partitions",
            summary.records_applied, summary.competitors, summary.partitions
        );

        Ok(summary)
    }
}

/// Reject any record dated before its predecessor
pub fn check_chronological(records: &[MatchRecord]) -> Result<()> {
    for (index, pair) in records.windows(2).enumerate() {
        let previous = pair[0].occurred_on();
        let found = pair[1].occurred_on();
        if found < previous {
            return Err(RatingError::UnsortedRecords {
                index: index + 1,
                previous,
                found,
            }
            .into());
        }
    }
    Ok(())
}
