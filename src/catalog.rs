//! Movie catalog used to present recommendations.
//!
//! The pipeline works on [`ItemId`]s only; titles and genres are looked up
//! here when results are shown to a person.

use hashbrown::HashMap;

use crate::rating::ItemId;

/// Genre marker MovieLens uses for movies without genres.
pub const NO_GENRES: &str = "(no genres listed)";

/// One catalog entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Movie {
    /// Item identifier, shared with the rating table.
    pub id: ItemId,
    /// Display title, e.g. `"Super Troopers (2001)"`.
    pub title: String,
    /// Genre names.
    pub genres: Vec<String>,
}

impl Movie {
    /// Build an entry from a MovieLens-style `"Adventure|Comedy"` genre field.
    pub fn from_pipe_genres(id: ItemId, title: impl Into<String>, genres: &str) -> Self {
        let genres = if genres.trim() == NO_GENRES {
            Vec::new()
        } else {
            genres
                .split('|')
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(String::from)
                .collect()
        };
        Self {
            id,
            title: title.into(),
            genres,
        }
    }
}

/// Item ID → [`Movie`] lookup.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    movies: HashMap<ItemId, Movie>,
}

impl Catalog {
    /// Index a list of movies. A later entry with the same ID replaces an earlier one.
    pub fn from_movies<I>(movies: I) -> Self
    where
        I: IntoIterator<Item = Movie>,
    {
        Self {
            movies: movies.into_iter().map(|m| (m.id, m)).collect(),
        }
    }

    /// Catalog entry for `id`.
    pub fn get(&self, id: ItemId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    /// Title for `id`.
    pub fn title(&self, id: ItemId) -> Option<&str> {
        self.movies.get(&id).map(|m| m.title.as_str())
    }

    /// Titles for a ranked ID list, in the same order. Unknown IDs are skipped.
    pub fn titles(&self, ids: &[ItemId]) -> Vec<&str> {
        ids.iter().filter_map(|&id| self.title(id)).collect()
    }

    /// Number of movies.
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// True when the catalog holds no movies.
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipe_genres_are_split() {
        let m = Movie::from_pipe_genres(ItemId(1), "Toy Story (1995)", "Adventure|Animation|Children");
        assert_eq!(m.genres, vec!["Adventure", "Animation", "Children"]);
    }

    #[test]
    fn test_no_genres_marker_yields_empty_list() {
        let m = Movie::from_pipe_genres(ItemId(2), "Untitled", NO_GENRES);
        assert!(m.genres.is_empty());
    }

    #[test]
    fn test_titles_preserve_order_and_skip_unknown() {
        let catalog = Catalog::from_movies([
            Movie::from_pipe_genres(ItemId(1), "Natural, The (1984)", "Drama"),
            Movie::from_pipe_genres(ItemId(2), "Super Troopers (2001)", "Comedy|Crime"),
        ]);
        assert_eq!(
            catalog.titles(&[ItemId(2), ItemId(99), ItemId(1)]),
            vec!["Super Troopers (2001)", "Natural, The (1984)"]
        );
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(ItemId(2)).map(|m| m.genres.len()), Some(2));
    }
}
