//! # hybrid-recommender
//!
//! Personalised movie recommendations from two collaborative-filtering
//! strategies blended into one list.
//!
//! ---
//!
//! ## Two views of the same rating matrix
//!
//! **User-based**: find the people who watched most of what you watched and
//! rated it the way you did (Pearson correlation over the films you share).
//! Their ratings, weighted by how closely they track you, score the films you
//! have not seen.
//! > "People like you loved this."
//!
//! **Item-based**: take your highest-rated, most recent film and rank every
//! other film by how closely its rating column follows that film's column
//! across all users.
//! > "Because you loved that, you will like this."
//!
//! The hybrid takes the top of both lists, user-based first, without repeats.
//!
//! ---
//!
//! ## The pipeline
//!
//! ```text
//! RatingRecord* → RatingHistory ──────────────────────────────┐
//!                      │ build_matrix (rare-item filter)       │
//!                      ↓                                       ↓
//!                RatingMatrix → find_neighbors → score_by_neighbors ─┐
//!                      │                                             ├→ recommend
//!                      └──────→ similar_items(select_seed) ──────────┘
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`rating`] | [`UserId`], [`ItemId`], [`RatingHistory`] | Raw rating records grouped by user |
//! | [`matrix`] | [`RatingMatrix`] | Sparse user × item adjacency, rows and columns sorted |
//! | [`prepare`] | [`FilterPolicy`] | Rare-item filter and pivot into the matrix |
//! | [`stats`] | — | Pairwise-complete Pearson correlation, ranking order |
//! | [`neighbors`] | [`Neighbor`] | Overlap + correlation neighbour selection |
//! | [`user_based`] | [`ScoredItem`] | Correlation-weighted neighbour scoring |
//! | [`item_based`] | — | Item-item similarity ranking from a seed |
//! | [`hybrid`] | [`Recommender`], [`Recommendation`] | Seed selection and blending |
//! | [`catalog`] | [`Movie`], [`Catalog`] | Titles and genres for presentation |
//! | [`config`] | [`RecommenderConfig`] | Tunables with range validation |
//! | `report` | `RecommendationReport` | JSON-ready titled report (requires `serde`) |
//!
//! ## Quick start
//!
//! ```rust
//! use hybrid_recommender::{
//!     build_recommender, FilterPolicy, ItemId, RatingRecord, RecommenderConfig, UserId,
//! };
//!
//! let r = |u, i, v, t| RatingRecord::new(UserId(u), ItemId(i), v, t);
//! let records = vec![
//!     r(1, 1, 5.0, 10), r(1, 2, 4.0, 11), r(1, 3, 3.0, 12),
//!     r(2, 1, 5.0, 20), r(2, 2, 4.0, 21), r(2, 3, 3.0, 22), r(2, 4, 5.0, 23),
//! ];
//! let rec = build_recommender(records, &FilterPolicy::keep_all(), RecommenderConfig::default())?;
//! assert_eq!(rec.recommend(UserId(1))?, vec![ItemId(4)]);
//! # Ok::<(), hybrid_recommender::RecommendError>(())
//! ```
//!
//! ## Concurrency
//!
//! Every operation is a pure function of an immutable snapshot. Share a
//! [`Recommender`] by reference across threads; no locking is involved. The
//! `parallel` feature splits the per-candidate correlation passes over a
//! `rayon` pool, with the final sort done once afterwards.
//!
//! ## Features
//!
//! - `serde`: serde derives, JSON configuration, the `report` module.
//! - `parallel`: rayon-parallel correlation passes.
//! - `python-ffi`: PyO3 extension module.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod hybrid;
pub mod item_based;
pub mod matrix;
pub mod neighbors;
pub mod prepare;
pub mod rating;
pub mod stats;
pub mod user_based;

#[cfg(feature = "serde")]
pub mod report;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use catalog::{Catalog, Movie};
pub use config::RecommenderConfig;
pub use error::{ConfigError, RecommendError, Result};
pub use hybrid::{recommend, recommend_explained, select_seed, Recommendation, Recommender};
pub use item_based::similar_items;
pub use matrix::{RatingMatrix, RatingMatrixBuilder};
pub use neighbors::{find_neighbors, Neighbor};
pub use prepare::{build_matrix, build_recommender, FilterPolicy};
pub use rating::{ItemId, RatingHistory, RatingRecord, UserId};
pub use user_based::{score_by_neighbors, ScoredItem};
