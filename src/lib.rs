//! Deterministic movement and collision engine for a single-player grid Snake.
//!
//! The [`game::Session`] owns all simulation state. External collaborators
//! (clock, input mapping, rendering, audio) drive it through discrete tick and
//! command calls and read it back through [`game::Snapshot`] and the
//! [`game::GameEvent`] values those calls return.

pub mod apple;
pub mod collision;
pub mod config;
pub mod direction_buffer;
pub mod error;
pub mod game;
pub mod grid;
pub mod input;
pub mod snake;
