//! CLI argument definitions for the webtoon reader.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use toon_state::ShelfFilter;

#[derive(Parser)]
#[command(
    name = "toon",
    version,
    about = "Browse the webtoon catalog and keep track of what you read",
    long_about = "Browse the webtoon catalog and keep track of what you read.\n\n\
                  Read history, subscriptions and favorites are stored locally\n\
                  and loaded again on the next run."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Configuration file (default: config.toml in the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the stored reader state (overrides the config file).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List ranked series.
    Catalog,

    /// List genres.
    Genres,

    /// List the series of one genre.
    Genre {
        /// Genre id, e.g. "drama".
        #[arg(value_name = "GENRE")]
        id: String,
    },

    /// Show a series with its episodes.
    Series {
        #[arg(value_name = "SERIES_ID")]
        id: String,
    },

    /// Open an episode and mark it as read.
    Read {
        #[arg(value_name = "EPISODE_ID")]
        id: String,
    },

    /// Subscribe to a series, or unsubscribe if already subscribed.
    Subscribe {
        #[arg(value_name = "SERIES_ID")]
        id: String,
    },

    /// Add a series to favorites, or remove it.
    Favorite {
        #[arg(value_name = "SERIES_ID")]
        id: String,
    },

    /// Show a personal shelf.
    Library {
        #[arg(long = "filter", value_enum, default_value = "subscribed")]
        filter: ShelfArg,
    },

    /// Print the stored reader state as JSON.
    State,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ShelfArg {
    Subscribed,
    Favorites,
    Recent,
}

impl From<ShelfArg> for ShelfFilter {
    fn from(arg: ShelfArg) -> Self {
        match arg {
            ShelfArg::Subscribed => ShelfFilter::Subscribed,
            ShelfArg::Favorites => ShelfFilter::Favorites,
            ShelfArg::Recent => ShelfFilter::Recent,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
