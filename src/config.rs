/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Pipeline parameters.
//!
//! [`RecommenderConfig`] carries every tunable of the hybrid pipeline. All
//! fields default to the values the MovieLens hybrid recommender was tuned
//! with, and [`RecommenderConfig::validate`] is called by every entry point
//! before the matrix is touched.
//!
//! | Field | Default | Valid range |
//! |-------|---------|-------------|
//! | `overlap_fraction` | 0.60 | open interval (0, 1) |
//! | `min_correlation` | 0.65 | [-1, 1] |
//! | `min_score` | 3.5 | any finite value |
//! | `n_user` | 5 | ≥ 1 |
//! | `n_item` | 5 | ≥ 1 |

use crate::error::ConfigError;

/// Default share of the target's rated items a neighbour must also have rated.
pub const DEFAULT_OVERLAP_FRACTION: f64 = 0.60;
/// Default minimum Pearson correlation for a neighbour.
pub const DEFAULT_MIN_CORRELATION: f64 = 0.65;
/// Default minimum weighted score for a user-based recommendation.
pub const DEFAULT_MIN_SCORE: f64 = 3.5;
/// Default number of user-based recommendations.
pub const DEFAULT_N_USER: usize = 5;
/// Default number of item-based recommendations.
pub const DEFAULT_N_ITEM: usize = 5;
/// Default result size of a standalone item-similarity query.
pub const DEFAULT_SIMILAR_TOP_K: usize = 10;

/// Tunables for neighbour selection, scoring and blending.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RecommenderConfig {
    /// A candidate neighbour must have rated strictly more than
    /// `overlap_fraction × |target's items|` of the target's items.
    pub overlap_fraction: f64,
    /// Neighbours need a correlation of at least this value.
    pub min_correlation: f64,
    /// User-based items need a score strictly above this value.
    pub min_score: f64,
    /// How many user-based items to blend in.
    pub n_user: usize,
    /// How many item-based items to blend in (seed excluded).
    pub n_item: usize,
}

impl RecommenderConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override `overlap_fraction`.
    pub fn with_overlap_fraction(mut self, value: f64) -> Self {
        self.overlap_fraction = value;
        self
    }

    /// Override `min_correlation`.
    pub fn with_min_correlation(mut self, value: f64) -> Self {
        self.min_correlation = value;
        self
    }

    /// Override `min_score`.
    pub fn with_min_score(mut self, value: f64) -> Self {
        self.min_score = value;
        self
    }

    /// Override `n_user`.
    pub fn with_n_user(mut self, value: usize) -> Self {
        self.n_user = value;
        self
    }

    /// Override `n_item`.
    pub fn with_n_item(mut self, value: usize) -> Self {
        self.n_item = value;
        self
    }

    /// Check every field, reporting the first one out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_overlap_fraction(self.overlap_fraction)?;
        validate_min_correlation(self.min_correlation)?;
        validate_min_score(self.min_score)?;
        validate_top_k("n_user", self.n_user)?;
        validate_top_k("n_item", self.n_item)?;
        Ok(())
    }

    /// Parse a JSON document; missing fields take their defaults.
    ///
    /// The parsed configuration is validated before it is returned.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            overlap_fraction: DEFAULT_OVERLAP_FRACTION,
            min_correlation: DEFAULT_MIN_CORRELATION,
            min_score: DEFAULT_MIN_SCORE,
            n_user: DEFAULT_N_USER,
            n_item: DEFAULT_N_ITEM,
        }
    }
}

pub(crate) fn validate_overlap_fraction(value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OverlapFraction(value))
    }
}

pub(crate) fn validate_min_correlation(value: f64) -> Result<(), ConfigError> {
    if (-1.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::MinCorrelation(value))
    }
}

pub(crate) fn validate_min_score(value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::MinScore(value))
    }
}

pub(crate) fn validate_top_k(name: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::ZeroTopK(name))
    } else {
        Ok(())
    }
}
