//! Item similarity: rank items by how closely their rating columns follow a
//! seed item's column.
//!
//! Only items sharing at least one rater with the seed can have a defined
//! correlation, so candidates are gathered by walking the seed's raters'
//! rows rather than scanning every column. Each candidate then costs one
//! merge-join of two sorted columns.
//!
//! The seed itself is always returned first with correlation exactly `1.0`;
//! callers that present results drop it.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use hashbrown::HashSet;
use tracing::debug;

use crate::config::validate_top_k;
use crate::error::{RecommendError, Result};
use crate::matrix::RatingMatrix;
use crate::rating::ItemId;
use crate::stats::{rank_desc, sparse_pearson};
use crate::user_based::ScoredItem;

/// Items most correlated with `seed`, seed first.
///
/// Items whose correlation with the seed is undefined (fewer than two
/// co-raters, or a constant column over the co-raters) are left out.
/// Returns at most `top_k` entries, sorted by correlation descending and
/// item ID ascending on ties, after the seed.
///
/// # Errors
///
/// - [`RecommendError::Config`] if `top_k == 0`.
/// - [`RecommendError::UnknownItem`] if `seed` has no column in `matrix`.
pub fn similar_items(matrix: &RatingMatrix, seed: ItemId, top_k: usize) -> Result<Vec<ScoredItem>> {
    validate_top_k("top_k", top_k)?;

    let seed_column = matrix
        .item_column(seed)
        .ok_or(RecommendError::UnknownItem(seed))?;

    let mut candidates: HashSet<ItemId> = HashSet::new();
    for &(user, _) in seed_column {
        for &(item, _) in matrix.user_row(user).unwrap_or(&[]) {
            if item != seed {
                candidates.insert(item);
            }
        }
    }
    let candidates: Vec<ItemId> = candidates.into_iter().collect();

    let correlate = |&item: &ItemId| -> Option<(ItemId, f64)> {
        let column = matrix.item_column(item)?;
        sparse_pearson(seed_column, column).map(|r| (item, r))
    };

    #[cfg(feature = "parallel")]
    let mut scored: Vec<(ItemId, f64)> = candidates.par_iter().filter_map(correlate).collect();
    #[cfg(not(feature = "parallel"))]
    let mut scored: Vec<(ItemId, f64)> = candidates.iter().filter_map(correlate).collect();

    scored.sort_by(rank_desc);

    debug!(
        seed = %seed,
        raters = seed_column.len(),
        candidates = candidates.len(),
        correlated = scored.len(),
        "item similarity done"
    );

    Ok(core::iter::once((seed, 1.0))
        .chain(scored)
        .take(top_k)
        .map(|(item, score)| ScoredItem { item, score })
        .collect())
}
