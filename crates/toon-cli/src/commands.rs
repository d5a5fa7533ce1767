//! Subcommand implementations.
//!
//! Each function renders its output to a `String`; `main` prints it.
//! Mutating commands only touch the store; persisting is left to the
//! store's writer and `main` flushes it before exiting.

use std::fmt::Write as _;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use toon_model::{Catalog, Series, UserState};
use toon_persistence::PersistenceError;
use toon_state::{Library, ShelfFilter, UserStateStore};

use crate::view::{episode_table, genre_table, series_table};

pub fn run_catalog(catalog: &Catalog, state: &UserState) -> String {
    let library = Library::new(catalog, state);
    let ranked = catalog.ranked();
    let mut out = format!("Ranking ({} series)\n", ranked.len());
    let _ = write!(out, "{}", series_table(&ranked, &library, state));
    out
}

pub fn run_genres(catalog: &Catalog) -> String {
    genre_table(catalog.genres()).to_string()
}

pub fn run_genre(catalog: &Catalog, state: &UserState, genre_id: &str) -> Result<String> {
    let genre = catalog
        .genre(genre_id)
        .ok_or_else(|| anyhow!("unknown genre: {genre_id}"))?;
    let series = catalog.series_by_genre(&genre.name);
    if series.is_empty() {
        return Ok(format!("{} {}: no series yet\n", genre.icon, genre.name));
    }
    let library = Library::new(catalog, state);
    Ok(format!(
        "{} {} ({} series)\n{}",
        genre.icon,
        genre.name,
        series.len(),
        series_table(&series, &library, state)
    ))
}

pub fn run_series(
    catalog: &Catalog,
    state: &UserState,
    series_id: &str,
    today: NaiveDate,
) -> Result<String> {
    let series = find_series(catalog, series_id)?;
    let library = Library::new(catalog, state);
    let mut out = String::new();
    let _ = writeln!(out, "{} by {}", series.title, series.author);
    let _ = writeln!(
        out,
        "{} · {} · ★ {:.2} · {} subscribers",
        series.genre,
        series.status,
        series.rating,
        toon_model::format_count(series.subscribers)
    );
    let _ = writeln!(out, "{}", series.synopsis);
    let _ = writeln!(
        out,
        "Subscribed: {} · Favorite: {} · Unread: {}",
        yes_no(state.is_subscribed(&series.id)),
        yes_no(state.is_favorite(&series.id)),
        library.unread_count(&series.id)
    );
    match library.next_unread(&series.id) {
        Some(episode) => {
            let _ = writeln!(out, "Continue with: {} ({})", episode.title, episode.id);
        }
        None if series.episodes.is_empty() => {
            let _ = writeln!(out, "No episodes yet");
        }
        None => {
            let _ = writeln!(out, "All caught up");
        }
    }
    let _ = write!(out, "{}", episode_table(series, state, today));
    Ok(out)
}

/// Open an episode: mark it read and show where to go next.
pub fn run_read(catalog: &Catalog, store: &UserStateStore, episode_id: &str) -> Result<String> {
    let cursor = catalog
        .locate_episode(episode_id)
        .ok_or_else(|| anyhow!("unknown episode: {episode_id}"))?;
    let first_time = !store.is_episode_read(episode_id);
    store.mark_as_read(episode_id);

    let episode = cursor.episode;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} · Ep. {} {}",
        cursor.series.title, episode.number, episode.title
    );
    let _ = writeln!(
        out,
        "{} panels{}",
        episode.panel_count(),
        if first_time { "" } else { " (read before)" }
    );
    if let Some(previous) = cursor.previous() {
        let _ = writeln!(out, "Previous: {} ({})", previous.title, previous.id);
    }
    match cursor.next() {
        Some(next) => {
            let _ = writeln!(out, "Next: {} ({})", next.title, next.id);
        }
        None => {
            let _ = writeln!(out, "Latest episode");
        }
    }
    Ok(out)
}

pub fn run_subscribe(catalog: &Catalog, store: &UserStateStore, series_id: &str) -> Result<String> {
    let series = find_series(catalog, series_id)?;
    store.toggle_subscription(series_id);
    Ok(if store.is_series_subscribed(series_id) {
        format!("Subscribed to {}\n", series.title)
    } else {
        format!("Unsubscribed from {}\n", series.title)
    })
}

pub fn run_favorite(catalog: &Catalog, store: &UserStateStore, series_id: &str) -> Result<String> {
    let series = find_series(catalog, series_id)?;
    store.toggle_favorite(series_id);
    Ok(if store.is_series_favorite(series_id) {
        format!("Added {} to favorites\n", series.title)
    } else {
        format!("Removed {} from favorites\n", series.title)
    })
}

pub fn run_library(catalog: &Catalog, state: &UserState, filter: ShelfFilter) -> String {
    let library = Library::new(catalog, state);
    let mut out = String::new();
    let tabs: Vec<String> = library
        .shelf_counts()
        .iter()
        .map(|(shelf, count)| {
            if *shelf == filter {
                format!("[{shelf} {count}]")
            } else {
                format!("{shelf} {count}")
            }
        })
        .collect();
    let _ = writeln!(out, "{}", tabs.join("  "));
    let _ = writeln!(out, "Coins: {}", state.coins_balance());

    let shelf = library.shelf(filter);
    if shelf.is_empty() {
        let _ = writeln!(out, "{}", empty_shelf_message(filter));
    } else {
        let _ = write!(out, "{}", series_table(&shelf, &library, state));
    }
    out
}

pub fn run_state(state: &UserState) -> Result<String> {
    serde_json::to_string_pretty(state).context("serialize reader state")
}

/// Extra stderr lines for a failed command caused by a storage problem.
pub fn persistence_notes(error: &anyhow::Error) -> Vec<String> {
    let Some(cause) = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<PersistenceError>())
    else {
        return Vec::new();
    };
    let mut notes = vec![format!("note: {}", cause.user_message())];
    if let Some(suggestion) = cause.suggestion() {
        notes.push(format!("hint: {suggestion}"));
    }
    notes
}

fn find_series<'a>(catalog: &'a Catalog, series_id: &str) -> Result<&'a Series> {
    catalog
        .series(series_id)
        .ok_or_else(|| anyhow!("unknown series: {series_id}"))
}

fn empty_shelf_message(filter: ShelfFilter) -> &'static str {
    match filter {
        ShelfFilter::Subscribed => "No subscriptions yet",
        ShelfFilter::Favorites => "No favorites yet",
        ShelfFilter::Recent => "Nothing read yet",
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()
    }

    #[test]
    fn unknown_ids_are_errors() {
        let catalog = Catalog::seed();
        let state = UserState::seed();
        let error = run_series(&catalog, &state, "s404", today()).unwrap_err();
        assert_eq!(error.to_string(), "unknown series: s404");
        assert!(run_genre(&catalog, &state, "western").is_err());
    }

    #[test]
    fn series_detail_reports_progress() {
        let catalog = Catalog::seed();
        let state = UserState::seed();
        let out = run_series(&catalog, &state, "s1", today()).unwrap();
        assert!(out.starts_with("Honey Trap by Sarah Kim\n"));
        assert!(out.contains("Subscribed: yes · Favorite: yes"));
    }

    #[test]
    fn library_marks_selected_shelf() {
        let catalog = Catalog::seed();
        let out = run_library(&catalog, &UserState::empty(), ShelfFilter::Favorites);
        assert!(out.starts_with("Subscriptions 0  [Favorites 0]  History 0\n"));
        assert!(out.contains("Coins: 0"));
        assert!(out.contains("No favorites yet"));
    }

    #[test]
    fn storage_errors_carry_hint() {
        let error = anyhow::Error::new(PersistenceError::InvalidKey {
            key: "../state".to_string(),
        })
        .context("invalid storage key in config.toml");
        assert_eq!(
            persistence_notes(&error),
            vec![
                "note: '../state' cannot be used as a storage key.".to_string(),
                "hint: Use only letters, digits, '-' and '_' in storage keys.".to_string(),
            ]
        );
        assert!(persistence_notes(&anyhow!("unknown series: s404")).is_empty());
    }

    #[test]
    fn state_is_camel_case_json() {
        let out = run_state(&UserState::seed()).unwrap();
        assert!(out.contains("\"coinsBalance\": 50"));
        assert!(out.contains("\"readHistory\""));
    }
}
