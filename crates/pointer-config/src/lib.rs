mod types;

pub use types::*;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

const APP_DIR: &str = "universal-pointer";
const CONFIG_FILE: &str = "config.toml";

/// Default config file: `<platform config dir>/universal-pointer/config.toml`.
pub fn config_path() -> Result<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Platform has no config directory"))?;
    Ok(base.join(APP_DIR).join(CONFIG_FILE))
}

/// Load the default config file. On first run a file holding the defaults is
/// written there so it can be edited.
pub fn load_config() -> Result<AppConfig> {
    load_or_create(&config_path()?)
}

/// Like [`load_config_from`], but writes the defaults to `path` when it is missing.
pub fn load_or_create(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        return load_config_from(path);
    }
    let config = AppConfig::default();
    save_config_to(&config, path)?;
    Ok(config)
}

/// Load and validate config from `path`, or return defaults if it does not exist.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        info!(?path, "Loaded config");
        Ok(config)
    } else {
        info!(?path, "No config found, using defaults");
        Ok(AppConfig::default())
    }
}

/// Write `config` as TOML, creating parent directories as needed.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    info!(?path, "Saved config");
    Ok(())
}

impl AppConfig {
    /// Reject geometry the pointer core would refuse.
    pub fn validate(&self) -> Result<()> {
        if !self.screen.geometry().is_valid() {
            anyhow::bail!(
                "Screen dimensions must be positive: {}x{} at {}",
                self.screen.width,
                self.screen.height,
                self.screen.distance
            );
        }
        let room = &self.room;
        if !room.is_valid() {
            anyhow::bail!(
                "Room dimensions must be positive: {}x{}",
                room.width,
                room.height
            );
        }
        if self.tick_ms == 0 {
            anyhow::bail!("tick_ms must be at least 1");
        }
        Ok(())
    }
}
