//! Serialisable recommendation report for the presentation layer.
//!
//! A [`RecommendationReport`] flattens a [`Recommendation`] into plain
//! records annotated with catalog titles, ready for JSON transport:
//!
//! ```rust,ignore
//! use hybrid_recommender::report::RecommendationReport;
//!
//! let rec = recommender.recommend_explained(UserId(108170))?;
//! let report = RecommendationReport::new(&rec, &catalog);
//! let json = serde_json::to_string_pretty(&report)?;
//! ```
//!
//! Requires the `serde` feature.

use crate::catalog::Catalog;
use crate::hybrid::Recommendation;
use crate::rating::{ItemId, UserId};
use crate::user_based::ScoredItem;

/// Current report format version.
pub const REPORT_VERSION: u16 = 1;

/// Which branch produced an entry.
#[derive(serde::Serialize, serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Correlated-neighbour scoring.
    UserBased,
    /// Similarity to the seed item.
    ItemBased,
}

/// One recommended item.
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct ReportEntry {
    /// Position in the blended list, starting at 0.
    pub rank: usize,
    /// Item identifier.
    pub item: ItemId,
    /// Catalog title; `None` when the item is not in the catalog.
    pub title: Option<String>,
    /// Branch that contributed the item first.
    pub source: Source,
    /// Weighted score (user-based) or correlation with the seed (item-based).
    pub score: f64,
}

/// A flat, titled view of one [`Recommendation`].
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct RecommendationReport {
    /// Format version, [`REPORT_VERSION`] for new reports.
    pub version: u16,
    /// Target user.
    pub user: UserId,
    /// Seed item of the item-based branch.
    pub seed: Option<ItemId>,
    /// Seed title, when the seed is in the catalog.
    pub seed_title: Option<String>,
    /// Number of correlated neighbours found.
    pub neighbor_count: usize,
    /// Blended entries in recommendation order.
    pub entries: Vec<ReportEntry>,
}

impl RecommendationReport {
    /// Build a report, resolving titles through `catalog`.
    pub fn new(recommendation: &Recommendation, catalog: &Catalog) -> Self {
        let title = |id: ItemId| catalog.title(id).map(String::from);
        let tagged = recommendation
            .user_based
            .iter()
            .map(|s| (s, Source::UserBased))
            .chain(
                recommendation
                    .item_based
                    .iter()
                    .map(|s| (s, Source::ItemBased)),
            );

        // `items` is already deduplicated; take each item's first branch entry.
        let entries = recommendation
            .items
            .iter()
            .enumerate()
            .filter_map(|(rank, &item)| {
                let (scored, source): (&ScoredItem, Source) =
                    tagged.clone().find(|(s, _)| s.item == item)?;
                Some(ReportEntry {
                    rank,
                    item,
                    title: title(item),
                    source,
                    score: scored.score,
                })
            })
            .collect();

        Self {
            version: REPORT_VERSION,
            user: recommendation.target,
            seed: recommendation.seed,
            seed_title: recommendation.seed.and_then(title),
            neighbor_count: recommendation.neighbors.len(),
            entries,
        }
    }

    /// Entry titles in order, skipping items missing from the catalog.
    pub fn titles(&self) -> Vec<&str> {
        self.entries.iter().filter_map(|e| e.title.as_deref()).collect()
    }
}
