//! Configuration types for rpgshare.
//!
//! [`Config::load`] layers the built-in defaults, `~/.config/rpgshare/config.toml`
//! (created with the defaults if it does not yet exist) and `RPGSHARE_*`
//! environment overrides. [`Config::defaults`] returns the built-in defaults
//! without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cooldown::DEFAULT_MAX_TRACKED_PLAYERS;
use crate::error::ConfigError;
use crate::normalizer::DisplayLimits;
use crate::scanner::DEFAULT_MARKER;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[item_sharing]
enabled              = true
cooldown_seconds     = 60
max_affixes_display  = 3
max_parts_display    = 3
show_enhanced_embeds = true
marker               = "[RPGShare]"
source_tag           = "rpgshare"
max_tracked_players  = 10000
"#;

const ENV_PREFIX: &str = "RPGSHARE";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub item_sharing: ItemSharingConfig,
}

/// `[item_sharing]` section of `config.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemSharingConfig {
    /// When false every line is a no-op.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: f64,
    #[serde(default = "default_max_display")]
    pub max_affixes_display: usize,
    #[serde(default = "default_max_display")]
    pub max_parts_display: usize,
    /// Passed through to consumers on every event.
    #[serde(default = "default_show_enhanced_embeds")]
    pub show_enhanced_embeds: bool,
    #[serde(default = "default_marker")]
    pub marker: String,
    #[serde(default = "default_source_tag")]
    pub source_tag: String,
    #[serde(default = "default_max_tracked_players")]
    pub max_tracked_players: usize,
}

fn default_enabled() -> bool { true }
fn default_cooldown_seconds() -> f64 { 60.0 }
fn default_max_display() -> usize { 3 }
fn default_show_enhanced_embeds() -> bool { true }
fn default_marker() -> String { DEFAULT_MARKER.to_string() }
fn default_source_tag() -> String { "rpgshare".to_string() }
fn default_max_tracked_players() -> usize { DEFAULT_MAX_TRACKED_PLAYERS }

impl Default for ItemSharingConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            cooldown_seconds: default_cooldown_seconds(),
            max_affixes_display: default_max_display(),
            max_parts_display: default_max_display(),
            show_enhanced_embeds: default_show_enhanced_embeds(),
            marker: default_marker(),
            source_tag: default_source_tag(),
            max_tracked_players: default_max_tracked_players(),
        }
    }
}

impl ItemSharingConfig {
    /// Reject values the pipeline can't run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(e) = Duration::try_from_secs_f64(self.cooldown_seconds) {
            return Err(invalid(
                "item_sharing.cooldown_seconds",
                format!("{} is not a usable duration: {e}", self.cooldown_seconds),
            ));
        }
        if self.max_affixes_display == 0 {
            return Err(invalid("item_sharing.max_affixes_display", "must be at least 1"));
        }
        if self.max_parts_display == 0 {
            return Err(invalid("item_sharing.max_parts_display", "must be at least 1"));
        }
        if self.marker.trim().is_empty() {
            return Err(invalid("item_sharing.marker", "must not be empty"));
        }
        if self.max_tracked_players == 0 {
            return Err(invalid("item_sharing.max_tracked_players", "must be at least 1"));
        }
        Ok(())
    }

    /// Values that fail [`validate`](Self::validate) saturate to
    /// `Duration::MAX`.
    pub fn cooldown(&self) -> Duration {
        Duration::try_from_secs_f64(self.cooldown_seconds).unwrap_or(Duration::MAX)
    }

    pub fn display_limits(&self) -> DisplayLimits {
        DisplayLimits {
            max_affixes: self.max_affixes_display,
            max_parts: self.max_parts_display,
        }
    }
}

fn invalid(key: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        key,
        reason: reason.into(),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/rpgshare/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Ok(Self::from_path(&path)?)
    }

    /// Load an explicit file (which must exist) over the built-in defaults.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let cfg: Config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;
        cfg.item_sharing.validate()?;
        Ok(cfg)
    }

    /// Parse TOML text over the built-in defaults. No environment overrides.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let cfg: Config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(text, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        cfg.item_sharing.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// `$XDG_CONFIG_HOME/rpgshare/config.toml`, falling back to `~/.config`.
pub fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("rpgshare")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
