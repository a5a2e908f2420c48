use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}

impl FromStr for Direction {
    type Err = GameError;

    /// Accepts full names, or a single key letter mapped as by `TryFrom<char>`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let token = raw.trim().to_ascii_lowercase();
        match token.as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(key), None) => Self::try_from(key)
                        .map_err(|_| GameError::InvalidDirection(raw.to_owned())),
                    _ => Err(GameError::InvalidDirection(raw.to_owned())),
                }
            }
        }
    }
}

impl TryFrom<char> for Direction {
    type Error = GameError;

    /// Maps WASD and vi-style keys to a direction.
    fn try_from(key: char) -> Result<Self, Self::Error> {
        match key.to_ascii_lowercase() {
            'w' | 'k' => Ok(Self::Up),
            's' | 'j' => Ok(Self::Down),
            'a' | 'h' => Ok(Self::Left),
            'd' | 'l' => Ok(Self::Right),
            _ => Err(GameError::InvalidDirection(key.to_string())),
        }
    }
}

/// High-level input events delivered to the session by the outer shell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Restart,
    Tick,
    Quit,
}

impl FromStr for GameInput {
    type Err = GameError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "restart" | "space" => Ok(Self::Restart),
            "tick" | "." => Ok(Self::Tick),
            "quit" | "q" => Ok(Self::Quit),
            _ => raw.parse().map(Self::Direction),
        }
    }
}

/// Splits a command script into inputs, failing on the first unknown token.
///
/// Single-letter direction tokens use the WASD / vi key mapping, so `d` is
/// `Right` and `j` is `Down`. Text after `#` on a line is ignored.
pub fn parse_script(script: &str) -> Result<Vec<GameInput>, GameError> {
    script
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .flat_map(str::split_whitespace)
        .map(|token| token.parse::<GameInput>())
        .collect()
}
