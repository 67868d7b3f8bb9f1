//! Data preparation: rare-item filtering and pivoting into a [`RatingMatrix`].
//!
//! Items with few ratings produce noisy correlations, so they are removed
//! before the matrix is built. The raw [`RatingHistory`] is left untouched:
//! the user-based scorer still reads neighbour ratings on rare items.
//!
//! Every user in the history gets a matrix row, so a user whose ratings were
//! all on rare items is "known but without usable ratings" rather than unknown.

use tracing::info;

use crate::config::RecommenderConfig;
use crate::error::Result;
use crate::hybrid::Recommender;
use crate::matrix::RatingMatrix;
use crate::rating::{RatingHistory, RatingRecord};

/// Default rare-item threshold used on the full MovieLens 20M dataset.
pub const DEFAULT_MIN_ITEM_RATINGS: usize = 1000;

/// Which items survive into the matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterPolicy {
    /// An item is kept only if it has strictly more ratings than this.
    pub min_item_ratings: usize,
}

impl FilterPolicy {
    /// Keep items with more than `min_item_ratings` ratings.
    pub fn new(min_item_ratings: usize) -> Self {
        Self { min_item_ratings }
    }

    /// Keep every rated item.
    pub fn keep_all() -> Self {
        Self::new(0)
    }
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_ITEM_RATINGS)
    }
}

/// Pivot `history` into a matrix, dropping rare items.
///
/// Repeated `(user, item)` records are averaged.
///
/// # Errors
///
/// [`RecommendError::InvalidRating`] on a non-finite rating value.
///
/// [`RecommendError::InvalidRating`]: crate::error::RecommendError::InvalidRating
pub fn build_matrix(history: &RatingHistory, policy: &FilterPolicy) -> Result<RatingMatrix> {
    let counts = history.item_counts();
    let mut builder = RatingMatrix::builder();
    for user in history.users() {
        builder.user(user);
    }

    let mut dropped = 0usize;
    for record in history.records() {
        let count = counts.get(&record.item).copied().unwrap_or(0);
        if count > policy.min_item_ratings {
            builder.rate(record.user, record.item, record.rating)?;
        } else {
            dropped += 1;
        }
    }

    let matrix = builder.build();
    info!(
        records = history.len(),
        dropped,
        users = matrix.user_count(),
        items = matrix.item_count(),
        "rating matrix built"
    );
    Ok(matrix)
}

/// Index raw records, build the filtered matrix and bundle a [`Recommender`].
///
/// # Errors
///
/// Configuration errors are reported before the matrix is built; invalid
/// ratings as in [`build_matrix`].
pub fn build_recommender<I>(
    records: I,
    policy: &FilterPolicy,
    config: RecommenderConfig,
) -> Result<Recommender>
where
    I: IntoIterator<Item = RatingRecord>,
{
    config.validate()?;
    let history = RatingHistory::from_records(records);
    let matrix = build_matrix(&history, policy)?;
    Recommender::new(matrix, history, config)
}
