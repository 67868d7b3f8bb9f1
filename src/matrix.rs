//! Sparse user × item rating matrix.
//!
//! The matrix is stored twice, as two adjacency indexes over the same cells:
//!
//! ```text
//! rows:    user → [(item, rating), ...]   sorted by item
//! columns: item → [(user, rating), ...]   sorted by user
//! ```
//!
//! Neighbour discovery walks rows, item similarity walks columns; neither
//! ever materialises the dense matrix. An absent cell means "not rated".
//!
//! # Invariants
//!
//! - At most one rating per `(user, item)`; duplicates fed to the builder
//!   are averaged.
//! - Every stored rating is finite.
//! - A user may own an empty row: registered users stay known even when the
//!   rare-item filter removed all of their ratings.

use hashbrown::{HashMap, HashSet};

use crate::error::{RecommendError, Result};
use crate::rating::{ItemId, UserId};

/// Immutable sparse rating matrix.
///
/// Cheap to share across threads: every query borrows.
#[derive(Clone, Debug, Default)]
pub struct RatingMatrix {
    rows: HashMap<UserId, Vec<(ItemId, f64)>>,
    columns: HashMap<ItemId, Vec<(UserId, f64)>>,
    rating_count: usize,
}

impl RatingMatrix {
    /// Start building a matrix.
    pub fn builder() -> RatingMatrixBuilder {
        RatingMatrixBuilder::new()
    }

    /// Build a matrix directly from `(user, item, rating)` triples.
    pub fn from_triples<I>(triples: I) -> Result<Self>
    where
        I: IntoIterator<Item = (UserId, ItemId, f64)>,
    {
        let mut builder = RatingMatrixBuilder::new();
        for (user, item, rating) in triples {
            builder.rate(user, item, rating)?;
        }
        Ok(builder.build())
    }

    /// Whether `user` has a row (possibly empty).
    pub fn contains_user(&self, user: UserId) -> bool {
        self.rows.contains_key(&user)
    }

    /// Whether `item` has a column.
    pub fn contains_item(&self, item: ItemId) -> bool {
        self.columns.contains_key(&item)
    }

    /// The user's ratings sorted by item, or `None` for an unknown user.
    pub fn user_row(&self, user: UserId) -> Option<&[(ItemId, f64)]> {
        self.rows.get(&user).map(Vec::as_slice)
    }

    /// The item's raters sorted by user, or `None` for an unknown item.
    pub fn item_column(&self, item: ItemId) -> Option<&[(UserId, f64)]> {
        self.columns.get(&item).map(Vec::as_slice)
    }

    /// A single cell.
    pub fn rating(&self, user: UserId, item: ItemId) -> Option<f64> {
        let row = self.rows.get(&user)?;
        row.binary_search_by_key(&item, |&(i, _)| i)
            .ok()
            .map(|idx| row[idx].1)
    }

    /// Iterate over all users (arbitrary order).
    pub fn users(&self) -> impl Iterator<Item = UserId> + '_ {
        self.rows.keys().copied()
    }

    /// Iterate over all items (arbitrary order).
    pub fn items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.columns.keys().copied()
    }

    /// Number of users (rows).
    pub fn user_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of items (columns).
    pub fn item_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rated cells.
    pub fn rating_count(&self) -> usize {
        self.rating_count
    }
}

/// Accumulates ratings before freezing them into a [`RatingMatrix`].
#[derive(Debug, Default)]
pub struct RatingMatrixBuilder {
    users: HashSet<UserId>,
    cells: HashMap<(UserId, ItemId), (f64, u32)>,
}

impl RatingMatrixBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user so it gets a row even without ratings.
    pub fn user(&mut self, user: UserId) -> &mut Self {
        self.users.insert(user);
        self
    }

    /// Record a rating. Repeated `(user, item)` pairs are averaged on build.
    pub fn rate(&mut self, user: UserId, item: ItemId, rating: f64) -> Result<&mut Self> {
        if !rating.is_finite() {
            return Err(RecommendError::InvalidRating {
                user,
                item,
                value: rating,
            });
        }
        self.users.insert(user);
        let cell = self.cells.entry((user, item)).or_insert((0.0, 0));
        cell.0 += rating;
        cell.1 += 1;
        Ok(self)
    }

    /// Freeze into an immutable matrix with sorted rows and columns.
    pub fn build(self) -> RatingMatrix {
        let mut rows: HashMap<UserId, Vec<(ItemId, f64)>> =
            self.users.into_iter().map(|u| (u, Vec::new())).collect();
        let mut columns: HashMap<ItemId, Vec<(UserId, f64)>> = HashMap::new();
        let rating_count = self.cells.len();

        for ((user, item), (sum, count)) in self.cells {
            let value = sum / f64::from(count);
            rows.entry(user).or_default().push((item, value));
            columns.entry(item).or_default().push((user, value));
        }
        for row in rows.values_mut() {
            row.sort_unstable_by_key(|&(item, _)| item);
        }
        for column in columns.values_mut() {
            column.sort_unstable_by_key(|&(user, _)| user);
        }

        RatingMatrix {
            rows,
            columns,
            rating_count,
        }
    }
}
