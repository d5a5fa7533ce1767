//! Data model for the webtoon reader: the static catalog and the
//! per-installation reader state.

pub mod catalog;
pub mod error;
mod seed;
pub mod state;

pub use catalog::{
    Catalog, Episode, EpisodeCursor, Genre, Series, SeriesStatus, format_age, format_count,
};
pub use error::{ModelError, Result};
pub use state::UserState;
