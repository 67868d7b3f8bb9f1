//! Pairwise-complete Pearson correlation and the shared ranking order.
//!
//! Rows and columns of the [`RatingMatrix`] are sorted by key, so the
//! co-rated subset of two vectors is found with a single merge-join in
//! `O(|a| + |b|)` without materialising a dense vector.
//!
//! # Invariants
//!
//! - A correlation is `None` (undefined, not zero) when fewer than two
//!   co-rated entries exist or when either side has zero variance.
//! - Defined correlations are clamped to `[-1.0, 1.0]`.
//!
//! [`RatingMatrix`]: crate::matrix::RatingMatrix

use core::cmp::Ordering;

/// Minimum co-rated observations for a correlation to be defined.
pub const MIN_CO_RATED: usize = 2;

/// Values both sparse vectors observed, as `(a, b)` pairs in key order.
///
/// Both inputs must be sorted ascending by key with unique keys.
pub fn co_rated<K: Ord>(a: &[(K, f64)], b: &[(K, f64)]) -> Vec<(f64, f64)> {
    let mut pairs = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                pairs.push((a[i].1, b[j].1));
                i += 1;
                j += 1;
            }
        }
    }
    pairs
}

/// Number of keys both sorted sparse vectors share.
pub fn co_rated_count<K: Ord>(a: &[(K, f64)], b: &[(K, f64)]) -> usize {
    let (mut i, mut j, mut n) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                n += 1;
                i += 1;
                j += 1;
            }
        }
    }
    n
}

/// Pearson correlation coefficient of paired observations.
///
/// Two-pass (mean, then centred sums) for numerical stability on
/// half-star ratings.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < MIN_CO_RATED {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_a = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_b = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut cov, mut var_a, mut var_b) = (0.0, 0.0, 0.0);
    for &(a, b) in pairs {
        let da = a - mean_a;
        let db = b - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    let denom = (var_a * var_b).sqrt();
    if !(denom > f64::EPSILON) {
        return None;
    }
    Some((cov / denom).clamp(-1.0, 1.0))
}

/// Pearson correlation of two sorted sparse vectors over their co-rated keys.
pub fn sparse_pearson<K: Ord>(a: &[(K, f64)], b: &[(K, f64)]) -> Option<f64> {
    pearson(&co_rated(a, b))
}

/// Ranking order: score descending, then key ascending.
///
/// Uses `total_cmp`, so the order is total even for pathological floats.
pub fn rank_desc<K: Ord>(a: &(K, f64), b: &(K, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}
