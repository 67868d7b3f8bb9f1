//! User-based scoring: turn a neighbourhood into ranked items.
//!
//! Every rating a neighbour gave is weighted by that neighbour's correlation
//! with the target. An item's score is the plain arithmetic mean of the
//! weighted ratings it received:
//!
//! ```text
//! score(i) = mean over neighbours n who rated i of  corr(n) × rating(n, i)
//! ```
//!
//! This is not the textbook `Σ corr·r / Σ corr`; a score can therefore never
//! exceed the highest rating and is pulled down by weaker neighbours.
//!
//! Neighbour ratings come from the raw [`RatingHistory`], not the filtered
//! matrix, so rare items can still be recommended. A neighbour who rated an
//! item more than once contributes the mean of those ratings, once, as in
//! the matrix. Non-finite ratings are skipped.

use hashbrown::{HashMap, HashSet};
use tracing::debug;

use crate::config::{validate_min_score, validate_top_k};
use crate::error::Result;
use crate::neighbors::Neighbor;
use crate::rating::{ItemId, RatingHistory, UserId};
use crate::stats::rank_desc;

/// An item with the score one of the two scorers assigned to it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredItem {
    /// The recommended item.
    pub item: ItemId,
    /// Weighted score (user-based) or correlation (item-based).
    pub score: f64,
}

/// Score items by the correlation-weighted ratings of `neighbors`.
///
/// Items the target already rated are never returned, and ratings by the
/// target are ignored even if the target slipped into `neighbors`. Keeps
/// items scoring strictly above `min_score`, best first (item ID ascending
/// on ties), at most `top_k` of them.
///
/// # Errors
///
/// [`RecommendError::Config`] if `min_score` is not finite or `top_k == 0`.
///
/// [`RecommendError::Config`]: crate::error::RecommendError::Config
pub fn score_by_neighbors(
    neighbors: &[Neighbor],
    history: &RatingHistory,
    target: UserId,
    min_score: f64,
    top_k: usize,
) -> Result<Vec<ScoredItem>> {
    validate_min_score(min_score)?;
    validate_top_k("top_k", top_k)?;

    if neighbors.is_empty() {
        return Ok(Vec::new());
    }

    let seen: HashSet<ItemId> = history.ratings_of(target).iter().map(|r| r.item).collect();

    // item → (Σ weighted rating, contributions)
    let mut sums: HashMap<ItemId, (f64, u32)> = HashMap::new();
    for neighbor in neighbors.iter().filter(|n| n.user != target) {
        for (item, rating) in collapsed_ratings(history, neighbor.user, &seen) {
            let slot = sums.entry(item).or_insert((0.0, 0));
            slot.0 += neighbor.correlation * rating;
            slot.1 += 1;
        }
    }

    let candidates = sums.len();
    let mut ranked: Vec<(ItemId, f64)> = sums
        .into_iter()
        .map(|(item, (sum, n))| (item, sum / f64::from(n)))
        .filter(|&(_, score)| score > min_score)
        .collect();
    ranked.sort_by(rank_desc);
    ranked.truncate(top_k);

    debug!(
        user = %target,
        neighbors = neighbors.len(),
        candidates,
        kept = ranked.len(),
        "user-based scoring done"
    );

    Ok(ranked
        .into_iter()
        .map(|(item, score)| ScoredItem { item, score })
        .collect())
}

/// One mean rating per unseen item for `user`.
fn collapsed_ratings(
    history: &RatingHistory,
    user: UserId,
    seen: &HashSet<ItemId>,
) -> impl Iterator<Item = (ItemId, f64)> {
    let mut per_item: HashMap<ItemId, (f64, u32)> = HashMap::new();
    for record in history.ratings_of(user) {
        if seen.contains(&record.item) || !record.rating.is_finite() {
            continue;
        }
        let slot = per_item.entry(record.item).or_insert((0.0, 0));
        slot.0 += record.rating;
        slot.1 += 1;
    }
    per_item
        .into_iter()
        .map(|(item, (sum, n))| (item, sum / f64::from(n)))
}
