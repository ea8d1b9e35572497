//! Win probability between two competitors

use crate::error::{RatingError, Result};
use crate::rating::RatingStorage;
use crate::types::Prediction;

/// Logistic expectation that a competitor rated `rating_a` beats one rated `rating_b`
pub fn predict(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / 400.0))
}

/// Win probability of `competitor_a` over `competitor_b` on `partition`
///
/// Unknown competitors and partitions read as the store's baseline. Asking for
/// a competitor against themselves is a caller error.
pub fn predict_matchup<S: RatingStorage + ?Sized>(
    store: &S,
    competitor_a: &str,
    competitor_b: &str,
    partition: &str,
) -> Result<Prediction> {
    if competitor_a == competitor_b {
        return Err(RatingError::IdenticalCompetitors {
            competitor: competitor_a.to_string(),
        }
        .into());
    }

    let rating_a = store.get(competitor_a, partition);
    let rating_b = store.get(competitor_b, partition);

    Ok(Prediction {
        competitor_a: competitor_a.to_string(),
        competitor_b: competitor_b.to_string(),
        partition: partition.to_string(),
        rating_a,
        rating_b,
        probability: predict(rating_a, rating_b),
    })
}
