//! Read-only catalog of series, episodes and genres.
//!
//! The catalog is static for the lifetime of the process. Consumers look
//! series and episodes up by id and filter them for display; nothing in
//! this module is ever mutated after construction.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Publication status of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesStatus {
    Ongoing,
    Completed,
    Hiatus,
}

impl SeriesStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesStatus::Ongoing => "Ongoing",
            SeriesStatus::Completed => "Completed",
            SeriesStatus::Hiatus => "Hiatus",
        }
    }
}

impl fmt::Display for SeriesStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeriesStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ongoing" => Ok(SeriesStatus::Ongoing),
            "completed" => Ok(SeriesStatus::Completed),
            "hiatus" => Ok(SeriesStatus::Hiatus),
            _ => Err(ModelError::UnknownStatus(s.to_string())),
        }
    }
}

/// One numbered installment of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: String,
    pub series_id: String,
    pub number: u32,
    pub title: String,
    /// ISO-8601 calendar date (`YYYY-MM-DD`).
    pub upload_date: String,
    pub thumbnail_url: String,
    pub likes: u64,
    /// Panel images in reading order.
    pub images: Vec<String>,
}

impl Episode {
    /// Parse the upload date.
    pub fn upload_date(&self) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(&self.upload_date, "%Y-%m-%d").map_err(|source| {
            ModelError::InvalidDate {
                value: self.upload_date.clone(),
                source,
            }
        })
    }

    pub fn panel_count(&self) -> usize {
        self.images.len()
    }
}

/// A title composed of ordered episodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub status: SeriesStatus,
    pub rating: f32,
    /// Position in the popularity ranking, if ranked.
    pub rank: Option<u32>,
    pub thumbnail_url: String,
    pub banner_url: String,
    pub synopsis: String,
    pub subscribers: u64,
    pub total_likes: u64,
    pub episodes: Vec<Episode>,
}

impl Series {
    pub fn episode(&self, episode_id: &str) -> Option<&Episode> {
        self.episodes.iter().find(|episode| episode.id == episode_id)
    }

    pub fn first_episode(&self) -> Option<&Episode> {
        self.episodes.first()
    }

    /// Case-insensitive genre comparison, as used by the genre browser.
    pub fn is_genre(&self, genre: &str) -> bool {
        self.genre.eq_ignore_ascii_case(genre)
    }
}

/// Genre shown in the genre browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: String,
    pub name: String,
    pub icon: String,
    /// Advertised number of titles; not derived from the catalog.
    pub count: u32,
}

/// Position of an episode inside its series, with its neighbours.
#[derive(Debug, Clone, Copy)]
pub struct EpisodeCursor<'a> {
    pub series: &'a Series,
    pub episode: &'a Episode,
    pub index: usize,
}

impl<'a> EpisodeCursor<'a> {
    pub fn previous(&self) -> Option<&'a Episode> {
        self.index
            .checked_sub(1)
            .and_then(|index| self.series.episodes.get(index))
    }

    pub fn next(&self) -> Option<&'a Episode> {
        self.series.episodes.get(self.index + 1)
    }

    pub fn has_previous(&self) -> bool {
        self.previous().is_some()
    }

    pub fn has_next(&self) -> bool {
        self.next().is_some()
    }
}

/// Static collection of series and genres.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    series: Vec<Series>,
    genres: Vec<Genre>,
}

impl Catalog {
    pub fn new(series: Vec<Series>, genres: Vec<Genre>) -> Self {
        Self { series, genres }
    }

    /// All series in catalog order.
    pub fn all(&self) -> &[Series] {
        &self.series
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn series(&self, series_id: &str) -> Option<&Series> {
        self.series.iter().find(|series| series.id == series_id)
    }

    pub fn genre(&self, genre_id: &str) -> Option<&Genre> {
        self.genres.iter().find(|genre| genre.id == genre_id)
    }

    pub fn episode(&self, episode_id: &str) -> Option<&Episode> {
        self.locate_episode(episode_id).map(|cursor| cursor.episode)
    }

    /// Find an episode together with its parent series and position.
    pub fn locate_episode(&self, episode_id: &str) -> Option<EpisodeCursor<'_>> {
        self.series.iter().find_map(|series| {
            series
                .episodes
                .iter()
                .position(|episode| episode.id == episode_id)
                .map(|index| EpisodeCursor {
                    series,
                    episode: &series.episodes[index],
                    index,
                })
        })
    }

    pub fn series_by_genre(&self, genre: &str) -> Vec<&Series> {
        self.series
            .iter()
            .filter(|series| series.is_genre(genre))
            .collect()
    }

    /// Ranked series ordered by ascending rank. Unranked series are skipped.
    pub fn ranked(&self) -> Vec<&Series> {
        let mut ranked: Vec<&Series> = self
            .series
            .iter()
            .filter(|series| series.rank.is_some())
            .collect();
        ranked.sort_by_key(|series| series.rank);
        ranked
    }

    /// The first `count` series, used for the hero banner.
    pub fn featured(&self, count: usize) -> &[Series] {
        &self.series[..count.min(self.series.len())]
    }
}

/// Render a count compactly: `2450000` becomes `2.5M`, `1500` becomes `1.5K`.
pub fn format_count(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}K", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}

/// Human-readable age of an upload relative to `today`.
pub fn format_age(date: NaiveDate, today: NaiveDate) -> String {
    let days = (today - date).num_days().abs();
    match days {
        0 => "today".to_string(),
        1 => "yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=29 => format!("{} wk ago", days / 7),
        _ => date.format("%-d %b").to_string(),
    }
}
