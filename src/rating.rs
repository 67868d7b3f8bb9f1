//! Identifiers and raw rating records.
//!
//! A [`RatingHistory`] is the untouched record stream as delivered by the
//! data loader: one entry per `(user, item, rating, timestamp)` row, grouped
//! by user. It keeps timestamps (needed for seed selection) and ratings on
//! items that the rare-item filter later drops from the [`RatingMatrix`].
//!
//! [`RatingMatrix`]: crate::matrix::RatingMatrix

use core::fmt;

use hashbrown::HashMap;

/// Opaque user identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UserId(pub u32);

/// Opaque item (movie) identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub u32);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One raw rating row.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RatingRecord {
    /// Who rated.
    pub user: UserId,
    /// What was rated.
    pub item: ItemId,
    /// Rating value; MovieLens uses 0.5..=5.0 in half steps.
    pub rating: f64,
    /// Unix timestamp (seconds) of the rating.
    pub timestamp: i64,
}

impl RatingRecord {
    /// Construct a record.
    pub fn new(user: UserId, item: ItemId, rating: f64, timestamp: i64) -> Self {
        Self {
            user,
            item,
            rating,
            timestamp,
        }
    }
}

/// Raw rating records grouped by user.
///
/// Read-only once built. Records keep their input order within each user.
#[derive(Clone, Debug, Default)]
pub struct RatingHistory {
    by_user: HashMap<UserId, Vec<RatingRecord>>,
    record_count: usize,
}

impl RatingHistory {
    /// Index a record stream by user.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RatingRecord>,
    {
        let mut by_user: HashMap<UserId, Vec<RatingRecord>> = HashMap::new();
        let mut record_count = 0;
        for record in records {
            by_user.entry(record.user).or_default().push(record);
            record_count += 1;
        }
        Self {
            by_user,
            record_count,
        }
    }

    /// All records for `user`; empty if the user never rated anything.
    pub fn ratings_of(&self, user: UserId) -> &[RatingRecord] {
        self.by_user.get(&user).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `user` has at least one record.
    pub fn contains_user(&self, user: UserId) -> bool {
        self.by_user.contains_key(&user)
    }

    /// Iterate over every user with at least one record (arbitrary order).
    pub fn users(&self) -> impl Iterator<Item = UserId> + '_ {
        self.by_user.keys().copied()
    }

    /// Iterate over every record (arbitrary user order).
    pub fn records(&self) -> impl Iterator<Item = &RatingRecord> + '_ {
        self.by_user.values().flatten()
    }

    /// Number of rating rows per item, duplicates included.
    pub fn item_counts(&self) -> HashMap<ItemId, usize> {
        let mut counts: HashMap<ItemId, usize> = HashMap::new();
        for record in self.records() {
            *counts.entry(record.item).or_insert(0) += 1;
        }
        counts
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.record_count
    }

    /// True when no records were supplied.
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Number of distinct users.
    pub fn user_count(&self) -> usize {
        self.by_user.len()
    }
}

impl FromIterator<RatingRecord> for RatingHistory {
    fn from_iter<I: IntoIterator<Item = RatingRecord>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}
