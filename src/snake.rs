use std::collections::{HashSet, VecDeque};

use crate::error::GameError;
use crate::grid::{Board, Cell};
use crate::input::Direction;

/// Ordered snake cells, tail first and head last.
///
/// `head` mirrors the back of `cells`, which is never empty.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SnakeBody {
    cells: VecDeque<Cell>,
    head: Cell,
}

impl SnakeBody {
    /// Creates the starting snake for `board`.
    #[must_use]
    pub fn initial(board: Board) -> Self {
        let [tail, middle, head] = board.initial_snake();
        Self {
            cells: VecDeque::from([tail, middle, head]),
            head,
        }
    }

    /// Creates a snake from explicit cells (front is tail, back is head).
    ///
    /// Fails on an empty list or a cell listed twice.
    pub fn from_cells(cells: Vec<Cell>) -> Result<Self, GameError> {
        let Some(&head) = cells.last() else {
            return Err(GameError::EmptyBody);
        };

        let mut seen = HashSet::with_capacity(cells.len());
        if let Some(duplicate) = cells.iter().find(|cell| !seen.insert(**cell)) {
            return Err(GameError::DuplicateCell(*duplicate));
        }

        Ok(Self {
            cells: VecDeque::from(cells),
            head,
        })
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        self.head
    }

    /// Returns the oldest cell.
    #[must_use]
    pub fn tail(&self) -> Cell {
        self.cells.front().copied().unwrap_or(self.head)
    }

    /// Head position after one step towards `direction`.
    #[must_use]
    pub fn next_head(&self, direction: Direction) -> Cell {
        self.head().advance(direction)
    }

    /// Returns true if any cell equals `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Pushes `new_head`, then drops the tail unless the snake is growing.
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.cells.push_back(new_head);
        self.head = new_head;
        if !grow {
            let _ = self.cells.pop_front();
        }
    }

    /// Restores the starting snake for `board`.
    pub fn reset(&mut self, board: Board) {
        *self = Self::initial(board);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over cells from tail to head.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}
