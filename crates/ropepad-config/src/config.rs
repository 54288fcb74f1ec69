//! Application configuration: load, save, and sanitize.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "ROPEPAD_CONFIG";

const CONFIG_FILE_NAME: &str = "ropepad.json";

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// How long a key read waits before reporting "no data", in milliseconds.
    /// The terminal works in tenths of a second, so this is rounded to 100ms steps.
    pub key_timeout_ms: u64,
    /// Rope depth above which the buffer is compacted after an edit.
    pub rebalance_depth: usize,
    /// Max undo actions kept per session.
    pub history_max_depth: usize,
    /// Draw `~` on rows past the end of the buffer.
    pub show_tildes: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            key_timeout_ms: 100,
            rebalance_depth: 64,
            history_max_depth: 10_000,
            show_tildes: true,
        }
    }
}

impl AppConfig {
    /// Returns the config file path.
    ///
    /// Resolution order:
    /// 1. `ROPEPAD_CONFIG` environment variable
    /// 2. `<config dir>/ropepad/ropepad.json`
    /// 3. `ropepad.json` in the working directory
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .map(|d| d.join("ropepad").join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (unreadable file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                    Ok(mut config) => {
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            // Return defaults on error (don't overwrite broken file)
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Clamps values to valid ranges.
    pub fn sanitize(&mut self) {
        let clamped = self.key_timeout_ms.clamp(10, 2_500);
        // Round to the nearest tenth of a second, never below one tenth.
        self.key_timeout_ms = (((clamped + 50) / 100).max(1)) * 100;
        self.rebalance_depth = self.rebalance_depth.max(8);
        self.history_max_depth = self.history_max_depth.max(1);
    }

    /// Key timeout in tenths of a second, as the terminal's `VTIME` expects.
    pub fn key_timeout_deciseconds(&self) -> u8 {
        (self.key_timeout_ms / 100).clamp(1, u8::MAX as u64) as u8
    }
}
