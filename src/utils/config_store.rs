//! ConfigStore - Local Configuration Storage

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::constants::CONFIG_FILE_NAME;
use crate::domain::config::AppConfig;
use crate::error::Result;
use crate::helpers::get_or_create_config_dir;

/// Default config file path inside the platform config directory
pub fn default_config_path() -> Result<PathBuf> {
    Ok(get_or_create_config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the configuration from the default location
///
/// A missing or empty file yields the defaults.
pub fn load_config() -> Result<AppConfig> {
    load_config_from(&default_config_path()?)
}

/// Load and validate a TOML config file
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        #[cfg(debug_assertions)]
        info!("Config file {} not found, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig = if content.trim().is_empty() {
        AppConfig::default()
    } else {
        toml::from_str(&content)?
    };
    config.validate()?;
    Ok(config)
}

/// Save a config file as pretty TOML
pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<()> {
    config.validate()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    info!("Saved config to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("datahub-store-test-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = load_config_from(&temp_path("absent.toml")).expect("defaults");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path(CONFIG_FILE_NAME);
        let mut config = AppConfig::default();
        config.api.base_url = "https://api.datahub.example/".into();
        config.query.page_size = 200;

        save_config_to(&path, &config).expect("save");
        let loaded = load_config_from(&path).expect("load");
        assert_eq!(loaded, config);

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_invalid_values_rejected() {
        let path = temp_path(CONFIG_FILE_NAME);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).expect("temp dir");
        }
        fs::write(&path, "[api]\ntimeout_secs = 0\n").expect("write");

        let err = load_config_from(&path).expect_err("zero timeout");
        assert!(matches!(err, Error::Invalid { .. }));

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }
}
