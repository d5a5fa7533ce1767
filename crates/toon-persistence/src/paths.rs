//! Platform directories.
//!
//! - macOS: ~/Library/Application Support/com.Webtoon.toon/
//! - Windows: %APPDATA%/Webtoon/toon/
//! - Linux: ~/.local/share/toon/ (data) and ~/.config/toon/ (config)

use std::path::PathBuf;

use directories::ProjectDirs;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "Webtoon";
const APP_NAME: &str = "toon";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

/// Directory the reader state is stored in by default.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn default_data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Directory configuration files are looked up in.
pub fn default_config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}
