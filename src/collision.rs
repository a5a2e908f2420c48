use serde::Serialize;

use crate::grid::{Board, Cell};
use crate::snake::SnakeBody;

/// Why a prospective move ended the run.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collision {
    Border,
    SelfBody,
}

#[must_use]
pub fn is_border_collision(next_head: Cell, board: Board) -> bool {
    !board.contains(next_head)
}

/// Tests against the whole pre-move body, tail included.
///
/// Moving into the cell the tail is about to vacate counts as a collision.
#[must_use]
pub fn is_self_collision(next_head: Cell, body: &SnakeBody) -> bool {
    body.occupies(next_head)
}

/// Checks the border first, then the body.
#[must_use]
pub fn detect(next_head: Cell, board: Board, body: &SnakeBody) -> Option<Collision> {
    if is_border_collision(next_head, board) {
        Some(Collision::Border)
    } else if is_self_collision(next_head, body) {
        Some(Collision::SelfBody)
    } else {
        None
    }
}
