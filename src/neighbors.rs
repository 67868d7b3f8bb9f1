//! Neighbour selection for user-based collaborative filtering.
//!
//! A neighbour is another user who
//!
//! 1. rated strictly more than `overlap_fraction` of the items the target
//!    rated, and
//! 2. correlates with the target at `min_correlation` or better, measured
//!    by Pearson over the items both rated.
//!
//! Candidates are discovered through the item → raters index, so only
//! users sharing at least one item with the target are ever visited. Cost
//! is `O(Σ |raters(i)|)` over the target's items for the overlap count, plus
//! one merge-join per surviving candidate.
//!
//! # Invariants
//!
//! - The target never appears in its own neighbour list.
//! - Users with an undefined correlation are dropped, not scored as zero.
//! - Output is sorted by correlation descending, user ID ascending on ties.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use hashbrown::HashMap;
use tracing::debug;

use crate::config::{validate_min_correlation, validate_overlap_fraction};
use crate::error::{RecommendError, Result};
use crate::matrix::RatingMatrix;
use crate::rating::UserId;
use crate::stats::{rank_desc, sparse_pearson};

/// A correlated neighbour of the target user.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Neighbor {
    /// The neighbouring user.
    pub user: UserId,
    /// Pearson correlation with the target, in `[min_correlation, 1.0]`.
    pub correlation: f64,
}

/// Find the users whose rating pattern tracks `target`'s.
///
/// Returns an empty list when the target has rated nothing or when no one
/// passes the overlap and correlation filters.
///
/// # Errors
///
/// - [`RecommendError::Config`] if `overlap_fraction ∉ (0, 1)` or
///   `min_correlation ∉ [-1, 1]`.
/// - [`RecommendError::UnknownUser`] if `target` has no row in `matrix`.
pub fn find_neighbors(
    matrix: &RatingMatrix,
    target: UserId,
    overlap_fraction: f64,
    min_correlation: f64,
) -> Result<Vec<Neighbor>> {
    validate_overlap_fraction(overlap_fraction)?;
    validate_min_correlation(min_correlation)?;

    let watched = matrix
        .user_row(target)
        .ok_or(RecommendError::UnknownUser(target))?;
    if watched.is_empty() {
        debug!(user = %target, "target has no ratings; no neighbourhood");
        return Ok(Vec::new());
    }

    // How many of the target's items each other user also rated.
    let mut overlap: HashMap<UserId, usize> = HashMap::new();
    for &(item, _) in watched {
        for &(user, _) in matrix.item_column(item).unwrap_or(&[]) {
            if user != target {
                *overlap.entry(user).or_insert(0) += 1;
            }
        }
    }

    let required = overlap_fraction * watched.len() as f64;
    let candidates: Vec<UserId> = overlap
        .into_iter()
        .filter(|&(_, count)| count as f64 > required)
        .map(|(user, _)| user)
        .collect();

    let correlate = |&user: &UserId| -> Option<(UserId, f64)> {
        let row = matrix.user_row(user)?;
        let r = sparse_pearson(watched, row)?;
        (r >= min_correlation).then_some((user, r))
    };

    #[cfg(feature = "parallel")]
    let mut scored: Vec<(UserId, f64)> = candidates.par_iter().filter_map(correlate).collect();
    #[cfg(not(feature = "parallel"))]
    let mut scored: Vec<(UserId, f64)> = candidates.iter().filter_map(correlate).collect();

    scored.sort_by(rank_desc);

    debug!(
        user = %target,
        watched = watched.len(),
        overlapping = candidates.len(),
        neighbors = scored.len(),
        "neighbour selection done"
    );

    Ok(scored
        .into_iter()
        .map(|(user, correlation)| Neighbor { user, correlation })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_MIN_CORRELATION, DEFAULT_OVERLAP_FRACTION};
    use crate::error::ConfigError;
    use crate::rating::ItemId;

    fn matrix(triples: &[(u32, u32, f64)]) -> RatingMatrix {
        RatingMatrix::from_triples(
            triples
                .iter()
                .map(|&(u, i, r)| (UserId(u), ItemId(i), r)),
        )
        .unwrap()
    }

    fn defaults(m: &RatingMatrix, target: u32) -> Result<Vec<Neighbor>> {
        find_neighbors(m, UserId(target), DEFAULT_OVERLAP_FRACTION, DEFAULT_MIN_CORRELATION)
    }

    #[test]
    fn test_three_user_overlap_scenario() {
        // user 2 mirrors user 1 exactly; user 3 has constant ratings on A, B.
        let m = matrix(&[
            (1, 1, 5.0), (1, 2, 4.0), (1, 3, 3.0),
            (2, 1, 5.0), (2, 2, 4.0), (2, 3, 3.0),
            (3, 1, 1.0), (3, 2, 1.0),
        ]);
        let n = defaults(&m, 1).unwrap();
        assert_eq!(n.len(), 1);
        assert_eq!(n[0].user, UserId(2));
        assert!((n[0].correlation - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_overlap_threshold_is_strict() {
        // Target rated 5 items; 60% of 5 = 3. A user sharing exactly 3 is out.
        let mut t = vec![(1, 1, 5.0), (1, 2, 4.0), (1, 3, 3.0), (1, 4, 2.0), (1, 5, 1.0)];
        t.extend([(2, 1, 5.0), (2, 2, 4.0), (2, 3, 3.0)]);
        t.extend([(3, 1, 5.0), (3, 2, 4.0), (3, 3, 3.0), (3, 4, 2.0)]);
        let n = defaults(&matrix(&t), 1).unwrap();
        let users: Vec<UserId> = n.iter().map(|x| x.user).collect();
        assert_eq!(users, vec![UserId(3)]);
    }

    #[test]
    fn test_low_correlation_filtered_and_order_descending() {
        let m = matrix(&[
            (1, 1, 5.0), (1, 2, 3.0), (1, 3, 1.0), (1, 4, 4.0),
            // perfect
            (2, 1, 5.0), (2, 2, 3.0), (2, 3, 1.0), (2, 4, 4.0),
            // strong but imperfect
            (3, 1, 4.0), (3, 2, 3.0), (3, 3, 2.0), (3, 4, 2.0),
            // inverted
            (4, 1, 1.0), (4, 2, 3.0), (4, 3, 5.0), (4, 4, 2.0),
        ]);
        let n = defaults(&m, 1).unwrap();
        let users: Vec<UserId> = n.iter().map(|x| x.user).collect();
        assert_eq!(users, vec![UserId(2), UserId(3)]);
        assert!(n[0].correlation > n[1].correlation);
        assert!(n.iter().all(|x| x.correlation >= DEFAULT_MIN_CORRELATION));
    }

    #[test]
    fn test_ties_broken_by_user_id() {
        let m = matrix(&[
            (1, 1, 5.0), (1, 2, 4.0), (1, 3, 3.0),
            (9, 1, 5.0), (9, 2, 4.0), (9, 3, 3.0),
            (4, 1, 4.0), (4, 2, 3.0), (4, 3, 2.0),
        ]);
        let users: Vec<UserId> = defaults(&m, 1).unwrap().iter().map(|x| x.user).collect();
        assert_eq!(users, vec![UserId(4), UserId(9)]);
    }

    #[test]
    fn test_unknown_user_fails() {
        let m = matrix(&[(1, 1, 5.0)]);
        assert_eq!(defaults(&m, 42), Err(RecommendError::UnknownUser(UserId(42))));
    }

    #[test]
    fn test_user_without_ratings_has_no_neighbors() {
        let mut b = RatingMatrix::builder();
        b.user(UserId(5));
        b.rate(UserId(1), ItemId(1), 4.0).unwrap();
        let m = b.build();
        assert!(defaults(&m, 5).unwrap().is_empty());
    }

    #[test]
    fn test_bad_parameters_rejected_before_lookup() {
        let m = RatingMatrix::default();
        assert_eq!(
            find_neighbors(&m, UserId(1), 1.0, 0.5),
            Err(RecommendError::Config(ConfigError::OverlapFraction(1.0)))
        );
        assert_eq!(
            find_neighbors(&m, UserId(1), 0.5, -2.0),
            Err(RecommendError::Config(ConfigError::MinCorrelation(-2.0)))
        );
    }
}
