//! File System Utilities
//!
//! Configuration and data directory management.

use crate::constants::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME).ok_or_else(|| Error::Invalid {
        message: "Could not determine project directories".to_string(),
    })
}

/// Create `dir` if missing and return it as an owned path
fn ensure_dir(dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(dir.to_path_buf())
}

/// Get or create the application's configuration directory
///
/// Platform-specific locations:
/// - **Linux**: `~/.config/datahub-store/` or `$XDG_CONFIG_HOME/datahub-store/`
/// - **macOS**: `~/Library/Application Support/dk.energinet.datahub-store/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\energinet\datahub-store\config\`
pub fn get_or_create_config_dir() -> Result<PathBuf> {
    ensure_dir(project_dirs()?.config_dir())
}

/// Create a directory given explicitly in configuration
pub fn get_or_create_dir(dir: &Path) -> Result<PathBuf> {
    ensure_dir(dir)
}

