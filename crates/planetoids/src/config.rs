//! Game configuration.
//!
//! Settings load from TOML or RON files, picked by extension, and
//! every field falls back to a sensible default so a missing or
//! partial file still yields a playable setup.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use sim_core::math::Vec2;
use sim_core::rng::SharedRng;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read or written.
    #[error("failed to access config file '{path}': {source}")]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// TOML text did not parse.
    #[error("failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),
    /// Value did not serialize to TOML.
    #[error("failed to serialize TOML config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    /// RON text did not parse.
    #[error("failed to parse RON config: {0}")]
    RonParse(#[from] ron::error::SpannedError),
    /// Value did not serialize to RON.
    #[error("failed to serialize RON config: {0}")]
    RonSerialize(#[from] ron::Error),
    /// Extension is neither `.toml` nor `.ron`.
    #[error("unsupported config extension '{0}', expected 'toml' or 'ron'")]
    UnsupportedFormat(String),
    /// Values parsed but fail the sanity checks.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Window dimensions in simulation units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Width in units.
    pub width: f32,
    /// Height in units.
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
        }
    }
}

/// Belt spawner pacing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Shortest pause between belt spawns, milliseconds.
    pub min_delay_ms: u64,
    /// Longest pause between belt spawns, milliseconds.
    pub max_delay_ms: u64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 500,
            max_delay_ms: 800,
        }
    }
}

/// Driver run settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Seed for the shared random stream. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Stop after this many ticks. `None` runs until the round ends.
    pub max_ticks: Option<u64>,
    /// Background stars seeded at startup.
    pub starfield: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_ticks: Some(3600),
            starfield: 24,
        }
    }
}

/// Top-level game configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window dimensions.
    pub window: WindowConfig,
    /// Belt spawner pacing.
    pub spawning: SpawnConfig,
    /// Driver run settings.
    pub run: RunConfig,
}

impl GameConfig {
    /// Loads and validates a config file, picking the format from the
    /// extension.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = match extension_of(path).as_deref() {
            Some("toml") => toml::from_str(&text)?,
            Some("ron") => ron::from_str(&text)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                ))
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Writes the config in the format matching the extension.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = match extension_of(path).as_deref() {
            Some("toml") => toml::to_string_pretty(self)?,
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                ))
            }
        };
        fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path` when it exists, falling back to defaults when it
    /// is absent or broken.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            debug!("no config at '{}', using defaults", path.display());
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(err) => {
                warn!("config '{}' rejected ({err}), using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Sanity checks the parsed values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width < 100.0 || self.window.height < 100.0 {
            return Err(ConfigError::Invalid(format!(
                "window must be at least 100x100 units, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if self.spawning.min_delay_ms > self.spawning.max_delay_ms {
            return Err(ConfigError::Invalid(format!(
                "spawn interval is inverted: {}ms > {}ms",
                self.spawning.min_delay_ms, self.spawning.max_delay_ms
            )));
        }
        Ok(())
    }

    /// Window size as a vector.
    #[must_use]
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.window.width, self.window.height)
    }

    /// Builds the shared random stream, seeded when configured.
    #[must_use]
    pub fn build_rng(&self) -> SharedRng {
        match self.run.seed {
            Some(seed) => SharedRng::seeded(seed),
            None => SharedRng::from_entropy(),
        }
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}
