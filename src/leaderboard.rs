//! Leaderboards per partition

use crate::rating::RatingStorage;
use crate::types::LeaderboardEntry;
use std::cmp::Ordering;

/// Top `limit` competitors on `partition`, highest rating first
///
/// Every competitor in the store is ranked, using the baseline where they have
/// no rating on this partition. Equal ratings are ordered by competitor id.
pub fn rank<S: RatingStorage + ?Sized>(
    store: &S,
    partition: &str,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    let mut rows: Vec<(String, f64)> = store
        .competitors()
        .into_iter()
        .map(|competitor| {
            let rating = store.get(&competitor, partition);
            (competitor, rating)
        })
        .collect();

    rows.sort_by(|a, b| match b.1.total_cmp(&a.1) {
        Ordering::Equal => a.0.cmp(&b.0),
        other => other,
    });

    rows.into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, (competitor, rating))| LeaderboardEntry {
            rank: index + 1,
            competitor,
            rating,
        })
        .collect()
}
