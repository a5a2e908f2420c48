use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::direction_buffer::BufferPolicy;
use crate::error::ConfigError;
use crate::grid::Board;

const APP_DIR_NAME: &str = "grid-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default board width in cells (800 px window at 50 px tiles).
pub const DEFAULT_GRID_WIDTH: u16 = 16;

/// Default board height in cells (600 px window at 50 px tiles).
pub const DEFAULT_GRID_HEIGHT: u16 = 12;

/// Smallest width that fits the three-cell starting snake.
pub const MIN_GRID_WIDTH: u16 = 3;

pub const MIN_GRID_HEIGHT: u16 = 1;

/// Cells in the starting snake; a board needs at least one more for the apple.
pub const INITIAL_SNAKE_LEN: usize = 3;

/// Default clock rate driving `Session::on_tick`.
pub const DEFAULT_TICK_HZ: u32 = 8;

pub const MAX_TICK_HZ: u32 = 60;

/// Score awarded per eaten apple.
pub const APPLE_POINTS: u32 = 10;

/// Random draws attempted before apple placement enumerates free cells.
pub const MAX_APPLE_SAMPLES: usize = 64;

/// Runtime configuration accepted by the engine and its shell.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    pub tick_hz: u32,
    pub buffer_policy: BufferPolicy,
    /// Fixed apple PRNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            tick_hz: DEFAULT_TICK_HZ,
            buffer_policy: BufferPolicy::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from `path`, or from the default location.
    ///
    /// An explicit path must exist. A missing file at the default location
    /// yields [`GameConfig::default`].
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => match default_config_path() {
                Some(path) => Self::load_or_default(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Parses a JSON document; absent fields take their default values.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Checks board dimensions and tick rate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.board()?;
        if self.tick_hz == 0 || self.tick_hz > MAX_TICK_HZ {
            return Err(ConfigError::InvalidTickRate(self.tick_hz));
        }
        Ok(())
    }

    /// Returns the configured board.
    pub fn board(&self) -> Result<Board, ConfigError> {
        Board::new(self.width, self.height)
    }

    /// Interval between two ticks for the external clock.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_hz.max(1)
    }

    fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(raw) => Self::from_json(&raw),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Returns the platform-correct config file path.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    Some(base)
}
