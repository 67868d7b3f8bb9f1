/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Hybrid combiner: blend user-based and item-based recommendations.
//!
//! ```text
//!                 ┌─ find_neighbors ─→ score_by_neighbors ─→ top n_user ─┐
//! target user ────┤                                                      ├─→ concat + dedup
//!                 └─ select_seed ────→ similar_items ──→ drop seed, n_item┘
//! ```
//!
//! The user-based list comes first and wins on duplicates. Either branch
//! may come back empty (no neighbours, no seed, seed filtered out of the
//! matrix) without failing the request; only an unknown target user or a
//! bad configuration is an error.

use hashbrown::HashSet;
use tracing::{debug, info, instrument, warn};

use crate::config::RecommenderConfig;
use crate::error::{RecommendError, Result};
use crate::item_based::similar_items;
use crate::matrix::RatingMatrix;
use crate::neighbors::{find_neighbors, Neighbor};
use crate::rating::{ItemId, RatingHistory, UserId};
use crate::user_based::{score_by_neighbors, ScoredItem};

/// Both branches of a hybrid recommendation plus the blended result.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recommendation {
    /// The user the recommendation was computed for.
    pub target: UserId,
    /// Seed item of the item-based branch, if one could be chosen.
    pub seed: Option<ItemId>,
    /// Neighbours feeding the user-based branch.
    pub neighbors: Vec<Neighbor>,
    /// User-based branch, at most `n_user` entries.
    pub user_based: Vec<ScoredItem>,
    /// Item-based branch without the seed, at most `n_item` entries.
    pub item_based: Vec<ScoredItem>,
    /// Final blended list: user-based first, duplicates removed.
    pub items: Vec<ItemId>,
}

/// Pick the item-based seed from the target's raw history.
///
/// Among the target's highest-valued ratings, the most recent one wins;
/// equal timestamps fall back to the smallest item ID. Non-finite ratings
/// are ignored. `None` when the target has no finite ratings.
pub fn select_seed(history: &RatingHistory, target: UserId) -> Option<ItemId> {
    history
        .ratings_of(target)
        .iter()
        .filter(|r| r.rating.is_finite())
        .max_by(|a, b| {
            a.rating
                .total_cmp(&b.rating)
                .then(a.timestamp.cmp(&b.timestamp))
                .then(b.item.cmp(&a.item))
        })
        .map(|r| r.item)
}

/// Blended recommendation with both branches exposed.
///
/// `matrix` is the (filtered) user × item matrix used for neighbour and item
/// correlation; `history` is the raw record stream used for neighbour
/// ratings and seed selection.
///
/// # Errors
///
/// - [`RecommendError::Config`] for an invalid `config`, before any work.
/// - [`RecommendError::UnknownUser`] if `target` has no row in `matrix`.
#[instrument(skip_all, fields(user = %target))]
pub fn recommend_explained(
    matrix: &RatingMatrix,
    history: &RatingHistory,
    target: UserId,
    config: &RecommenderConfig,
) -> Result<Recommendation> {
    config.validate()?;
    if !matrix.contains_user(target) {
        return Err(RecommendError::UnknownUser(target));
    }

    let neighbors = find_neighbors(
        matrix,
        target,
        config.overlap_fraction,
        config.min_correlation,
    )?;
    let user_based =
        score_by_neighbors(&neighbors, history, target, config.min_score, config.n_user)?;

    let seed = select_seed(history, target);
    let item_based: Vec<ScoredItem> = match seed {
        Some(seed) if matrix.contains_item(seed) => {
            // One extra slot for the seed, which always ranks first.
            similar_items(matrix, seed, config.n_item.saturating_add(1))?
                .into_iter()
                .filter(|s| s.item != seed)
                .take(config.n_item)
                .collect()
        }
        Some(seed) => {
            warn!(seed = %seed, "seed item missing from rating matrix; item-based branch empty");
            Vec::new()
        }
        None => {
            debug!("no rating history; item-based branch empty");
            Vec::new()
        }
    };

    let items = blend(&user_based, &item_based);

    info!(
        neighbors = neighbors.len(),
        user_based = user_based.len(),
        item_based = item_based.len(),
        recommended = items.len(),
        "hybrid recommendation ready"
    );

    Ok(Recommendation {
        target,
        seed,
        neighbors,
        user_based,
        item_based,
        items,
    })
}

/// Blended recommendation: at most `n_user + n_item` distinct items.
///
/// # Errors
///
/// Same as [`recommend_explained`].
pub fn recommend(
    matrix: &RatingMatrix,
    history: &RatingHistory,
    target: UserId,
    config: &RecommenderConfig,
) -> Result<Vec<ItemId>> {
    recommend_explained(matrix, history, target, config).map(|r| r.items)
}

/// Concatenate both lists and keep the first occurrence of each item.
fn blend(user_based: &[ScoredItem], item_based: &[ScoredItem]) -> Vec<ItemId> {
    let mut seen: HashSet<ItemId> = HashSet::new();
    user_based
        .iter()
        .chain(item_based)
        .map(|s| s.item)
        .filter(|item| seen.insert(*item))
        .collect()
}

/// An immutable snapshot of the rating data bundled with its configuration.
///
/// `Recommender` is `Send + Sync`; share it by reference to serve many
/// target users concurrently.
#[derive(Clone, Debug)]
pub struct Recommender {
    matrix: RatingMatrix,
    history: RatingHistory,
    config: RecommenderConfig,
}

impl Recommender {
    /// Bundle a matrix, its raw history and a configuration.
    ///
    /// # Errors
    ///
    /// [`RecommendError::Config`] if `config` is out of range.
    pub fn new(
        matrix: RatingMatrix,
        history: RatingHistory,
        config: RecommenderConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            matrix,
            history,
            config,
        })
    }

    /// Item IDs recommended for `user`.
    pub fn recommend(&self, user: UserId) -> Result<Vec<ItemId>> {
        recommend(&self.matrix, &self.history, user, &self.config)
    }

    /// Full per-branch breakdown for `user`.
    pub fn recommend_explained(&self, user: UserId) -> Result<Recommendation> {
        recommend_explained(&self.matrix, &self.history, user, &self.config)
    }

    /// The matrix snapshot.
    pub fn matrix(&self) -> &RatingMatrix {
        &self.matrix
    }

    /// The raw rating history.
    pub fn history(&self) -> &RatingHistory {
        &self.history
    }

    /// The active configuration.
    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }
}
