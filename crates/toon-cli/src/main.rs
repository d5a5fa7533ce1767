//! Webtoon reader CLI.

use std::io::{self, IsTerminal};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use tokio::runtime::{Builder, Runtime};
use toon_cli::commands::{
    persistence_notes, run_catalog, run_favorite, run_genre, run_genres, run_library, run_read,
    run_series, run_state, run_subscribe,
};
use toon_cli::config::Settings;
use toon_cli::logging::{LogConfig, LogFormat, init_logging};
use toon_model::Catalog;
use toon_persistence::{FileStore, KeyValueStore};
use toon_state::UserStateStore;
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(output) => {
            print!("{output}");
            if !output.ends_with('\n') {
                println!();
            }
            0
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            for note in persistence_notes(&error) {
                eprintln!("{note}");
            }
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<String> {
    let settings = Settings::load(cli.config.as_deref());
    let data_dir = settings.data_dir(cli.data_dir.as_deref())?;
    let backend = FileStore::new(&data_dir);
    let path = backend
        .path_for(&settings.storage.key)
        .with_context(|| format!("invalid storage key in {}", describe_config(cli)))?;
    tracing::debug!(path = %path.display(), "Using reader state file");

    let runtime = build_runtime()?;
    let backend: Arc<dyn KeyValueStore> = Arc::new(backend);
    let store = UserStateStore::open_on(runtime.handle(), backend, settings.storage.key.clone());
    runtime.block_on(store.wait_ready());

    let catalog = Catalog::seed();
    let output = dispatch(&cli.command, &catalog, &store);
    runtime.block_on(store.flush());
    output
}

fn dispatch(command: &Command, catalog: &Catalog, store: &UserStateStore) -> Result<String> {
    let state = store.snapshot();
    match command {
        Command::Catalog => Ok(run_catalog(catalog, &state)),
        Command::Genres => Ok(run_genres(catalog)),
        Command::Genre { id } => run_genre(catalog, &state, id),
        Command::Series { id } => {
            run_series(catalog, &state, id, chrono::Local::now().date_naive())
        }
        Command::Read { id } => run_read(catalog, store, id),
        Command::Subscribe { id } => run_subscribe(catalog, store, id),
        Command::Favorite { id } => run_favorite(catalog, store, id),
        Command::Library { filter } => Ok(run_library(catalog, &state, (*filter).into())),
        Command::State => run_state(&state),
    }
}

fn build_runtime() -> Result<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .context("start async runtime")
}

fn describe_config(cli: &Cli) -> String {
    cli.config
        .clone()
        .or_else(Settings::config_path)
        .map_or_else(|| "configuration".to_string(), |path| path.display().to_string())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
