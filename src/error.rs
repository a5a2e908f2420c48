use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::grid::Cell;

/// Errors raised by the simulation engine and its input mapping.
#[derive(Debug, Error)]
pub enum GameError {
    /// An input token did not map to one of the four directions.
    #[error("invalid snake direction: {0:?}")]
    InvalidDirection(String),

    /// The snake covers every cell, so no apple can be placed.
    #[error("no free cell for apple on {width}x{height} board ({occupied} cells occupied)")]
    NoFreeCellForApple {
        width: u16,
        height: u16,
        occupied: usize,
    },

    /// A snake body must contain at least one cell.
    #[error("snake body must contain at least one cell")]
    EmptyBody,

    #[error("snake body lists cell {0:?} more than once")]
    DuplicateCell(Cell),

    #[error("cell {0:?} lies outside the board")]
    CellOutOfBounds(Cell),

    #[error("apple at {0:?} overlaps the snake")]
    AppleOnSnake(Cell),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while loading or validating [`crate::config::GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The board cannot hold the three-cell starting snake plus an apple.
    #[error(
        "invalid board size {width}x{height} (need width >= 3, height >= 1 and more than 3 cells)"
    )]
    InvalidBoard { width: u16, height: u16 },

    #[error("invalid tick rate {0} Hz (expected 1..=60)")]
    InvalidTickRate(u32),

    #[error("unknown buffer policy {0:?} (expected drop-repeat or queue-one)")]
    UnknownPolicy(String),
}
