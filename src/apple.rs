use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::MAX_APPLE_SAMPLES;
use crate::error::GameError;
use crate::grid::{Board, Cell};
use crate::snake::SnakeBody;

/// Picks a uniformly random board cell not occupied by `body`.
///
/// Draws cell indices up to [`MAX_APPLE_SAMPLES`] times, then falls back to
/// choosing among the enumerated free cells so a crowded board still
/// terminates.
pub fn place_apple<R: Rng + ?Sized>(
    rng: &mut R,
    board: Board,
    body: &SnakeBody,
) -> Result<Cell, GameError> {
    let total = board.total_cells();
    let no_free_cell = || GameError::NoFreeCellForApple {
        width: board.width(),
        height: board.height(),
        occupied: body.len(),
    };

    if body.len() >= total {
        return Err(no_free_cell());
    }

    for _ in 0..MAX_APPLE_SAMPLES {
        let candidate = board.cell_at(rng.gen_range(0..total));
        if !body.occupies(candidate) {
            return Ok(candidate);
        }
    }

    debug!(
        "apple sampling exhausted after {MAX_APPLE_SAMPLES} draws, enumerating free cells ({} of {total} occupied)",
        body.len()
    );
    let free: Vec<Cell> = board.cells().filter(|cell| !body.occupies(*cell)).collect();
    free.choose(rng).copied().ok_or_else(no_free_cell)
}
