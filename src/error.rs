//! Error types for the recommendation pipeline.
//!
//! Only two situations fail a request: an unknown target user and an
//! out-of-range parameter. Empty neighbourhoods, missing seeds and
//! below-threshold scores are valid states that shrink the result instead.

use crate::rating::{ItemId, UserId};

/// Convenience alias used across the crate.
pub type Result<T> = core::result::Result<T, RecommendError>;

/// Errors raised by the recommendation pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecommendError {
    /// The target user has no row in the rating matrix.
    #[error("unknown user: {0}")]
    UnknownUser(UserId),

    /// The seed item has no column in the rating matrix.
    #[error("unknown item: {0}")]
    UnknownItem(ItemId),

    /// A rating value that cannot take part in a correlation.
    #[error("invalid rating {value} for user {user} on item {item}")]
    InvalidRating {
        /// Rating owner.
        user: UserId,
        /// Rated item.
        item: ItemId,
        /// Offending value.
        value: f64,
    },

    /// A parameter is out of range. Raised before any computation runs.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Out-of-range configuration parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// `overlap_fraction` must lie in the open interval (0, 1).
    #[error("overlap_fraction must be in (0, 1), got {0}")]
    OverlapFraction(f64),

    /// `min_correlation` must lie in [-1, 1].
    #[error("min_correlation must be in [-1, 1], got {0}")]
    MinCorrelation(f64),

    /// `min_score` must be a finite number.
    #[error("min_score must be finite, got {0}")]
    MinScore(f64),

    /// A per-stage result count was zero.
    #[error("{0} must be a positive integer")]
    ZeroTopK(&'static str),

    /// The configuration document could not be parsed.
    #[error("malformed configuration: {0}")]
    Malformed(String),
}
