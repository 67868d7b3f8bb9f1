//! Python FFI bindings via PyO3.
//!
//! Exposes the hybrid pipeline to Python with plain integer IDs and
//! `(user, item, rating, timestamp)` tuples, so a pandas rating frame can be
//! handed over with `list(df.itertuples(index=False))`.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! from hybrid_recommender import Recommender
//!
//! ratings = [(1, 10, 5.0, 964982703), (1, 20, 4.0, 964981247), ...]
//! rec = Recommender(ratings, min_item_ratings=1000)
//! print(rec.recommend(108170))           # [item ids]
//! print(rec.neighbors(108170)[:3])       # [(user id, correlation)]
//! print(rec.similar_items(356, top_k=6)) # [(item id, correlation)], seed first
//! ```

use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;

use crate::config::RecommenderConfig;
use crate::error::RecommendError;
use crate::hybrid::Recommender as RustRecommender;
use crate::item_based::similar_items;
use crate::neighbors::find_neighbors;
use crate::prepare::{build_recommender, FilterPolicy};
use crate::rating::{ItemId, RatingRecord, UserId};

fn to_py_err(err: RecommendError) -> PyErr {
    match err {
        RecommendError::UnknownUser(_) | RecommendError::UnknownItem(_) => {
            PyKeyError::new_err(err.to_string())
        }
        RecommendError::InvalidRating { .. } | RecommendError::Config(_) => {
            PyValueError::new_err(err.to_string())
        }
    }
}

// ── Recommender ───────────────────────────────────────────────────────────────

/// Hybrid user-based + item-based movie recommender.
///
/// Built once from the full rating table; every query is read-only.
#[pyclass(name = "Recommender")]
pub struct PyRecommender {
    inner: RustRecommender,
}

#[pymethods]
impl PyRecommender {
    /// Build a recommender from rating tuples.
    ///
    /// Args:
    ///     ratings:          list of (user_id, item_id, rating, timestamp)
    ///     min_item_ratings: items with this many ratings or fewer are dropped (default 0)
    ///     overlap_fraction: share of the target's items a neighbour must have rated (default 0.60)
    ///     min_correlation:  minimum neighbour correlation (default 0.65)
    ///     min_score:        minimum user-based score (default 3.5)
    ///     n_user:           user-based recommendations (default 5)
    ///     n_item:           item-based recommendations (default 5)
    #[new]
    #[pyo3(signature = (
        ratings,
        min_item_ratings=0,
        overlap_fraction=0.60,
        min_correlation=0.65,
        min_score=3.5,
        n_user=5,
        n_item=5
    ))]
    pub fn new(
        ratings: Vec<(u32, u32, f64, i64)>,
        min_item_ratings: usize,
        overlap_fraction: f64,
        min_correlation: f64,
        min_score: f64,
        n_user: usize,
        n_item: usize,
    ) -> PyResult<Self> {
        let config = RecommenderConfig::new()
            .with_overlap_fraction(overlap_fraction)
            .with_min_correlation(min_correlation)
            .with_min_score(min_score)
            .with_n_user(n_user)
            .with_n_item(n_item);
        let records = ratings
            .into_iter()
            .map(|(u, i, r, ts)| RatingRecord::new(UserId(u), ItemId(i), r, ts));
        let inner = build_recommender(records, &FilterPolicy::new(min_item_ratings), config)
            .map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Blended recommendation for a user as a list of item ids.
    ///
    /// Raises KeyError for an unknown user.
    pub fn recommend(&self, user: u32) -> PyResult<Vec<u32>> {
        let items = self.inner.recommend(UserId(user)).map_err(to_py_err)?;
        Ok(items.into_iter().map(|i| i.0).collect())
    }

    /// Correlated neighbours of a user as (user_id, correlation), best first.
    pub fn neighbors(&self, user: u32) -> PyResult<Vec<(u32, f64)>> {
        let config = self.inner.config();
        let neighbors = find_neighbors(
            self.inner.matrix(),
            UserId(user),
            config.overlap_fraction,
            config.min_correlation,
        )
        .map_err(to_py_err)?;
        Ok(neighbors
            .into_iter()
            .map(|n| (n.user.0, n.correlation))
            .collect())
    }

    /// Items most similar to a seed item as (item_id, correlation), seed first.
    #[pyo3(signature = (item, top_k=10))]
    pub fn similar_items(&self, item: u32, top_k: usize) -> PyResult<Vec<(u32, f64)>> {
        let scored = similar_items(self.inner.matrix(), ItemId(item), top_k).map_err(to_py_err)?;
        Ok(scored.into_iter().map(|s| (s.item.0, s.score)).collect())
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        let m = self.inner.matrix();
        format!(
            "Recommender(users={}, items={}, ratings={})",
            m.user_count(),
            m.item_count(),
            m.rating_count()
        )
    }
}

// ── Module entry point ────────────────────────────────────────────────────────

/// Hybrid collaborative-filtering recommender bindings.
#[pymodule]
pub fn hybrid_recommender(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyRecommender>()?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
