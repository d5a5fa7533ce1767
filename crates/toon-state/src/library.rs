//! Catalog views driven by the reader state.
//!
//! These are what the "My Series" shelves and the series page show. They
//! only read: all changes go through [`UserStateStore`](crate::UserStateStore).

use std::fmt;

use toon_model::{Catalog, Episode, Series, UserState};

/// The personal shelves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShelfFilter {
    #[default]
    Subscribed,
    Favorites,
    Recent,
}

impl ShelfFilter {
    pub const ALL: [ShelfFilter; 3] = [
        ShelfFilter::Subscribed,
        ShelfFilter::Favorites,
        ShelfFilter::Recent,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ShelfFilter::Subscribed => "Subscriptions",
            ShelfFilter::Favorites => "Favorites",
            ShelfFilter::Recent => "History",
        }
    }
}

impl fmt::Display for ShelfFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Read-only join of the catalog with one reader state.
#[derive(Debug, Clone, Copy)]
pub struct Library<'a> {
    catalog: &'a Catalog,
    state: &'a UserState,
}

impl<'a> Library<'a> {
    pub fn new(catalog: &'a Catalog, state: &'a UserState) -> Self {
        Self { catalog, state }
    }

    /// Subscribed series, in catalog order.
    pub fn subscribed_series(&self) -> Vec<&'a Series> {
        let state = self.state;
        self.filter(|series| state.is_subscribed(&series.id))
    }

    /// Favorite series, in catalog order.
    pub fn favorite_series(&self) -> Vec<&'a Series> {
        let state = self.state;
        self.filter(|series| state.is_favorite(&series.id))
    }

    /// Series with at least one episode in the read history, in catalog order.
    ///
    /// History entries that no longer match a catalog episode are ignored.
    pub fn recently_read_series(&self) -> Vec<&'a Series> {
        let state = self.state;
        self.filter(|series| {
            series
                .episodes
                .iter()
                .any(|episode| state.has_read(&episode.id))
        })
    }

    pub fn shelf(&self, filter: ShelfFilter) -> Vec<&'a Series> {
        match filter {
            ShelfFilter::Subscribed => self.subscribed_series(),
            ShelfFilter::Favorites => self.favorite_series(),
            ShelfFilter::Recent => self.recently_read_series(),
        }
    }

    /// Number of series on each shelf, in [`ShelfFilter::ALL`] order.
    pub fn shelf_counts(&self) -> [(ShelfFilter, usize); 3] {
        ShelfFilter::ALL.map(|filter| (filter, self.shelf(filter).len()))
    }

    /// Episodes of `series_id` not yet read. Zero for unknown series.
    pub fn unread_count(&self, series_id: &str) -> usize {
        self.catalog.series(series_id).map_or(0, |series| {
            series
                .episodes
                .iter()
                .filter(|episode| !self.state.has_read(&episode.id))
                .count()
        })
    }

    /// First episode of `series_id`, in order, that has not been read.
    pub fn next_unread(&self, series_id: &str) -> Option<&'a Episode> {
        let state = self.state;
        self.catalog
            .series(series_id)?
            .episodes
            .iter()
            .find(|episode| !state.has_read(&episode.id))
    }

    fn filter(&self, keep: impl Fn(&Series) -> bool) -> Vec<&'a Series> {
        self.catalog.all().iter().filter(|series| keep(*series)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_shelves() {
        let catalog = Catalog::seed();
        let state = UserState::seed();
        let library = Library::new(&catalog, &state);

        let ids = |series: Vec<&Series>| -> Vec<String> {
            series.into_iter().map(|s| s.id.clone()).collect()
        };
        assert_eq!(ids(library.subscribed_series()), ["s1", "s2"]);
        assert_eq!(ids(library.favorite_series()), ["s1", "s3"]);
        assert_eq!(ids(library.recently_read_series()), ["s1", "s2"]);
        assert_eq!(
            library.shelf_counts(),
            [
                (ShelfFilter::Subscribed, 2),
                (ShelfFilter::Favorites, 2),
                (ShelfFilter::Recent, 2),
            ]
        );
    }

    #[test]
    fn unread_counts_and_next() {
        let catalog = Catalog::seed();
        let state = UserState::seed();
        let library = Library::new(&catalog, &state);

        assert_eq!(library.unread_count("s1"), 3);
        assert_eq!(library.unread_count("s2"), 2);
        assert_eq!(library.unread_count("missing"), 0);
        assert_eq!(library.next_unread("s1").map(|e| e.id.as_str()), Some("s1_e3"));

        let finished = state.with_episode_read("s4_e1").unwrap();
        let library = Library::new(&catalog, &finished);
        assert_eq!(library.unread_count("s4"), 0);
        assert!(library.next_unread("s4").is_none());
    }

    #[test]
    fn unknown_history_entries_are_ignored() {
        let catalog = Catalog::seed();
        let state = UserState::new(["zz_e1"], Vec::<String>::new(), ["zz"], 0);
        let library = Library::new(&catalog, &state);
        assert!(library.recently_read_series().is_empty());
        assert!(library.favorite_series().is_empty());
    }
}
