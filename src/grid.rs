use serde::{Deserialize, Serialize};

use crate::config::{INITIAL_SNAKE_LEN, MIN_GRID_HEIGHT, MIN_GRID_WIDTH};
use crate::error::ConfigError;
use crate::input::Direction;

/// Grid position in logical cell coordinates (column, row).
///
/// Rows grow upwards: `Up` increments `row`, `Down` decrements it. Cells
/// outside the board are representable so that a prospective head position
/// can be tested before the snake moves.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Returns the neighbouring cell one step towards `direction`.
    #[must_use]
    pub fn advance(self, direction: Direction) -> Self {
        self.offset(direction, 1)
    }

    /// Translates this cell `step` cells towards `direction`.
    #[must_use]
    pub fn offset(self, direction: Direction, step: i32) -> Self {
        match direction {
            Direction::Up => Self::new(self.col, self.row + step),
            Direction::Down => Self::new(self.col, self.row - step),
            Direction::Left => Self::new(self.col - step, self.row),
            Direction::Right => Self::new(self.col + step, self.row),
        }
    }
}

/// Bounding rectangle of the play field, in cells.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Board {
    width: u16,
    height: u16,
}

impl Board {
    /// Creates a board that fits the three-cell starting snake and an apple.
    pub fn new(width: u16, height: u16) -> Result<Self, ConfigError> {
        let board = Self { width, height };
        if width < MIN_GRID_WIDTH
            || height < MIN_GRID_HEIGHT
            || board.total_cells() <= INITIAL_SNAKE_LEN
        {
            return Err(ConfigError::InvalidBoard { width, height });
        }
        Ok(board)
    }

    #[must_use]
    pub fn width(self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(self) -> u16 {
        self.height
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns true when `cell` lies inside the board.
    #[must_use]
    pub fn contains(self, cell: Cell) -> bool {
        cell.col >= 0
            && cell.row >= 0
            && cell.col < i32::from(self.width)
            && cell.row < i32::from(self.height)
    }

    /// Maps a row-major index in `0..total_cells()` to its cell.
    #[must_use]
    pub fn cell_at(self, index: usize) -> Cell {
        let width = usize::from(self.width);
        Cell::new((index % width) as i32, (index / width) as i32)
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.total_cells()).map(move |index| self.cell_at(index))
    }

    /// Starting body: three contiguous cells left of centre, tail first,
    /// laid out towards `Right`.
    #[must_use]
    pub fn initial_snake(self) -> [Cell; 3] {
        let row = i32::from((self.height / 2).saturating_sub(1));
        let tail_col = i32::from((self.width / 2).saturating_sub(1));
        let tail = Cell::new(tail_col, row);

        [tail, tail.offset(Direction::Right, 1), tail.offset(Direction::Right, 2)]
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ConfigError;
    use crate::input::Direction;

    use super::{Board, Cell};

    #[test]
    fn advance_follows_row_up_convention() {
        let origin = Cell::new(2, 2);

        assert_eq!(origin.advance(Direction::Up), Cell::new(2, 3));
        assert_eq!(origin.advance(Direction::Down), Cell::new(2, 1));
        assert_eq!(origin.advance(Direction::Left), Cell::new(1, 2));
        assert_eq!(origin.advance(Direction::Right), Cell::new(3, 2));
        assert_eq!(origin.offset(Direction::Left, 3), Cell::new(-1, 2));
    }

    #[test]
    fn board_contains_only_cells_inside_bounds() {
        let board = Board::new(5, 4).expect("valid board");

        assert!(board.contains(Cell::new(0, 0)));
        assert!(board.contains(Cell::new(4, 3)));
        assert!(!board.contains(Cell::new(5, 0)));
        assert!(!board.contains(Cell::new(0, 4)));
        assert!(!board.contains(Cell::new(-1, 2)));
        assert!(!board.contains(Cell::new(2, -1)));
    }

    #[test]
    fn board_rejects_too_small_dimensions() {
        assert!(matches!(
            Board::new(2, 5),
            Err(ConfigError::InvalidBoard {
                width: 2,
                height: 5
            })
        ));
        assert!(Board::new(3, 0).is_err());
        assert!(matches!(
            Board::new(3, 1),
            Err(ConfigError::InvalidBoard {
                width: 3,
                height: 1
            })
        ));
        assert!(Board::new(4, 1).is_ok());
        assert!(Board::new(3, 2).is_ok());
    }

    #[test]
    fn cells_enumerates_row_major() {
        let board = Board::new(3, 2).expect("valid board");
        let cells: Vec<Cell> = board.cells().collect();

        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[2], Cell::new(2, 0));
        assert_eq!(cells[3], Cell::new(0, 1));
    }

    #[test]
    fn initial_snake_is_centered_and_in_bounds() {
        let board = Board::new(16, 12).expect("valid board");
        assert_eq!(
            board.initial_snake(),
            [Cell::new(7, 5), Cell::new(8, 5), Cell::new(9, 5)]
        );

        for (width, height) in [(4, 1), (3, 2)] {
            let narrow = Board::new(width, height).expect("valid board");
            for cell in narrow.initial_snake() {
                assert!(narrow.contains(cell));
            }
        }
    }
}
