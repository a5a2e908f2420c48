use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::input::Direction;

/// What happens to a second command arriving before the next tick.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferPolicy {
    /// The command is discarded.
    DropRepeat,
    /// The command is held (last one wins) and applied after the next move.
    #[default]
    QueueOne,
}

impl FromStr for BufferPolicy {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "drop-repeat" => Ok(Self::DropRepeat),
            "queue-one" => Ok(Self::QueueOne),
            _ => Err(ConfigError::UnknownPolicy(raw.to_owned())),
        }
    }
}

/// Result of feeding one command into a [`DirectionBuffer`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BufferOutcome {
    /// Became the current direction.
    Applied,
    /// Stored as the pending command for the next tick.
    Queued,
    /// Reversal of the current direction.
    Rejected,
    /// A command was already applied this tick and the policy drops repeats.
    Dropped,
}

/// Movement direction plus the single command that may wait for the next tick.
///
/// At most one command takes effect per tick. Once a command has been
/// applied, the buffer stays locked until [`DirectionBuffer::resolve`] runs
/// after the snake has physically moved.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DirectionBuffer {
    current: Direction,
    pending: Option<Direction>,
    locked: bool,
    policy: BufferPolicy,
}

impl DirectionBuffer {
    #[must_use]
    pub fn new(initial: Direction, policy: BufferPolicy) -> Self {
        Self {
            current: initial,
            pending: None,
            locked: false,
            policy,
        }
    }

    /// Direction applied on the next tick.
    #[must_use]
    pub fn current(&self) -> Direction {
        self.current
    }

    #[must_use]
    pub fn pending(&self) -> Option<Direction> {
        self.pending
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub fn policy(&self) -> BufferPolicy {
        self.policy
    }

    /// Feeds one direction command.
    ///
    /// While locked, the command is queued without a reversal check; the
    /// check happens against the new current direction in [`Self::resolve`].
    pub fn set_direction(&mut self, requested: Direction) -> BufferOutcome {
        if self.locked {
            return match self.policy {
                BufferPolicy::DropRepeat => BufferOutcome::Dropped,
                BufferPolicy::QueueOne => {
                    self.pending = Some(requested);
                    BufferOutcome::Queued
                }
            };
        }

        if requested == self.current.opposite() {
            return BufferOutcome::Rejected;
        }

        self.current = requested;
        self.locked = true;
        BufferOutcome::Applied
    }

    /// Unlocks after a move and promotes the pending command, if any.
    ///
    /// A promoted command locks the buffer again for the following tick.
    pub fn resolve(&mut self) -> Option<BufferOutcome> {
        self.locked = false;
        self.pending
            .take()
            .map(|pending| self.set_direction(pending))
    }

    /// Restores `initial` with no pending command and no lock.
    pub fn reset(&mut self, initial: Direction) {
        self.current = initial;
        self.pending = None;
        self.locked = false;
    }
}
