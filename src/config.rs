//! Game configuration
//!
//! Optional RON file read once at startup. Every field has a default, so a
//! partial file (or no file at all) is fine:
//!
//! ```ron
//! (
//!     player_sprite: "images/char-boy.png",
//!     enemy_count: 4,
//!     enemy_speed: (min: 150.0, max: 450.0),
//!     fps_limit: Fps30,
//! )
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::board::sprites;
use crate::game::enemy::SpeedRange;
use crate::game::runtime::FpsLimit;

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "bug-crossing.ron";

/// Environment variable that overrides the config path
pub const CONFIG_ENV_VAR: &str = "BUG_CROSSING_CONFIG";

/// Error type for config loading
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Startup settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Directory sprite paths are resolved against
    pub asset_root: PathBuf,
    /// Sprite used for the player character
    pub player_sprite: String,
    /// Number of bugs on the board (fixed for the whole run)
    pub enemy_count: usize,
    /// Range bug speeds are drawn from
    pub enemy_speed: SpeedRange,
    /// RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
    pub fps_limit: FpsLimit,
    /// Give up if images are still loading after this many seconds
    pub load_timeout_secs: Option<f32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("assets"),
            player_sprite: sprites::CHAR_HORN_GIRL.to_string(),
            enemy_count: 3,
            enemy_speed: SpeedRange::default(),
            seed: None,
            fps_limit: FpsLimit::default(),
            load_timeout_secs: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a RON config string
    pub fn from_ron(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text, path)
    }

    /// Load a config file, falling back to defaults if it does not exist.
    ///
    /// Returns the config and whether it came from the file.
    pub fn load_or_default(path: &Path) -> Result<(Self, bool), ConfigError> {
        if !path.exists() {
            return Ok((Self::default(), false));
        }
        Self::load(path).map(|config| (config, true))
    }

    /// Config path: `BUG_CROSSING_CONFIG` if set, else the default file name
    pub fn resolve_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enemy_count == 0 {
            return Err(ConfigError::Invalid("enemy_count must be at least 1".into()));
        }
        let speed = &self.enemy_speed;
        if !(speed.min.is_finite() && speed.max.is_finite()) {
            return Err(ConfigError::Invalid("enemy_speed bounds must be finite".into()));
        }
        if speed.min <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "enemy_speed.min must be positive, got {}",
                speed.min
            )));
        }
        if speed.max <= speed.min {
            return Err(ConfigError::Invalid(format!(
                "enemy_speed range is empty: [{}, {})",
                speed.min, speed.max
            )));
        }
        if self.player_sprite.trim().is_empty() {
            return Err(ConfigError::Invalid("player_sprite is empty".into()));
        }
        if self.asset_root.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("asset_root is empty".into()));
        }
        if let Some(timeout) = self.load_timeout_secs {
            if timeout.is_nan() || timeout <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "load_timeout_secs must be positive, got {}",
                    timeout
                )));
            }
        }
        Ok(())
    }

    /// Every sprite the game draws: board tiles, the bug, every character
    /// and the configured player sprite. Deduplicated, in load order.
    pub fn required_sprites(&self) -> Vec<String> {
        let board = crate::game::board::Board::standard();
        let mut out: Vec<String> = Vec::new();
        let all = board
            .sprites()
            .into_iter()
            .chain([sprites::ENEMY_BUG])
            .chain(sprites::CHARACTERS)
            .chain([self.player_sprite.as_str()]);
        for sprite in all {
            if !out.iter().any(|s| s == sprite) {
                out.push(sprite.to_string());
            }
        }
        out
    }
}
