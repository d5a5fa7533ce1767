//! Command-line reader for the webtoon catalog.

pub mod commands;
pub mod config;
pub mod logging;
pub mod view;
