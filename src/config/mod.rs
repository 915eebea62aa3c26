// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[player]` - Volume, keyboard steps, subtitle suppression
//! - `[overlay]` - Auto-hide countdowns, fade length, tick interval
//!
//! Every field is optional. Missing values fall back to [`defaults`], and
//! out-of-range values are clamped when the runtime settings are built.
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config-dir` on the command line
//! 3. Set `KLYDIO_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use klydio::config;
//!
//! let (mut config, _warning) = config::load();
//! config.player.volume = Some(60);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::Result;
use crate::overlay::OverlayTimings;
use crate::player::VolumePercent;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Preferences file name inside the config directory.
pub const CONFIG_FILE: &str = "settings.toml";

/// Player preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Last used volume (percent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u8>,

    /// Left/Right arrow relative seek (seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seek_step_secs: Option<u32>,

    /// Up/Down arrow relative volume change (percent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_step: Option<u8>,

    /// Ask the engine not to render subtitle streams.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suppress_subtitles: Option<bool>,
}

/// Transport overlay timings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OverlayConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_hide_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_hide_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fade_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_ms: Option<u64>,
}

/// Root of `settings.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub overlay: OverlayConfig,
}

/// Player preferences with defaults applied and ranges enforced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSettings {
    pub volume: VolumePercent,
    pub seek_step: Duration,
    pub volume_step: u8,
    pub suppress_subtitles: bool,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Config::default().player_settings()
    }
}

impl Config {
    /// Resolves the `[player]` section into runtime settings.
    pub fn player_settings(&self) -> PlayerSettings {
        let seek_secs = self
            .player
            .seek_step_secs
            .unwrap_or(DEFAULT_SEEK_STEP_SECS)
            .clamp(MIN_SEEK_STEP_SECS, MAX_SEEK_STEP_SECS);
        let volume_step = self
            .player
            .volume_step
            .unwrap_or(DEFAULT_VOLUME_STEP_PERCENT)
            .clamp(1, MAX_VOLUME_STEP_PERCENT);

        PlayerSettings {
            volume: VolumePercent::new(i32::from(
                self.player.volume.unwrap_or(DEFAULT_VOLUME_PERCENT),
            )),
            seek_step: Duration::from_secs(u64::from(seek_secs)),
            volume_step,
            suppress_subtitles: self.player.suppress_subtitles.unwrap_or(true),
        }
    }

    /// Resolves the `[overlay]` section into runtime timings.
    ///
    /// The cursor countdown never exceeds the overlay countdown.
    pub fn overlay_timings(&self) -> OverlayTimings {
        let idle_hide_ms = self
            .overlay
            .idle_hide_ms
            .unwrap_or(DEFAULT_IDLE_HIDE_MS)
            .clamp(MIN_IDLE_HIDE_MS, MAX_IDLE_HIDE_MS);
        let cursor_hide_ms = self
            .overlay
            .cursor_hide_ms
            .unwrap_or(DEFAULT_CURSOR_HIDE_MS)
            .clamp(MIN_IDLE_HIDE_MS, idle_hide_ms);
        let fade_ms = self
            .overlay
            .fade_ms
            .unwrap_or(DEFAULT_FADE_MS)
            .min(MAX_FADE_MS);
        let tick_ms = self
            .overlay
            .tick_ms
            .unwrap_or(DEFAULT_TICK_MS)
            .clamp(MIN_TICK_MS, MAX_TICK_MS);

        OverlayTimings {
            idle_hide: Duration::from_millis(idle_hide_ms),
            cursor_hide: Duration::from_millis(cursor_hide_ms),
            fade: Duration::from_millis(fade_ms),
            tick: Duration::from_millis(tick_ms),
        }
    }
}

// =============================================================================
// Load Functions
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut dir| {
        dir.push(CONFIG_FILE);
        dir
    })
}

/// Loads the configuration from the default location.
///
/// Returns the defaults when no file exists. When the file exists but cannot
/// be parsed, the defaults are returned together with a warning message.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("Ignoring unreadable config {}: {}", path.display(), err);
                    return (
                        Config::default(),
                        Some(format!("Settings could not be read, using defaults ({err})")),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
