use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::apple::place_apple;
use crate::collision::{self, Collision};
use crate::config::{APPLE_POINTS, GameConfig};
use crate::direction_buffer::{BufferOutcome, BufferPolicy, DirectionBuffer};
use crate::error::GameError;
use crate::grid::{Board, Cell};
use crate::input::{Direction, GameInput};
use crate::snake::SnakeBody;

/// Direction the snake faces at the start of every run.
pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// Current high-level session state.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    NotStarted,
    Playing,
    GameOver,
}

/// Notifications for the outer shell (audio cues, UI refresh).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    Started { direction: Direction },
    Ate { score: u32, length: usize },
    Died { cause: Collision, score: u32 },
    Restarted,
}

/// Read-only view handed to rendering collaborators.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Snapshot {
    pub state: SessionState,
    pub score: u32,
    pub direction: Direction,
    pub length: usize,
    /// Tail first, head last.
    pub body: Vec<Cell>,
    pub apple: Cell,
}

/// Complete simulation state for one player.
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    snake: SnakeBody,
    buffer: DirectionBuffer,
    apple: Cell,
    state: SessionState,
    score: u32,
    rng: StdRng,
}

impl Session {
    /// Creates a session from validated configuration.
    ///
    /// Uses the configured seed when present, entropy otherwise.
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config.board()?, config.buffer_policy, rng)
    }

    /// Creates a deterministic session for tests and reproducible runs.
    pub fn with_seed(board: Board, policy: BufferPolicy, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(board, policy, StdRng::seed_from_u64(seed))
    }

    /// Creates a session already in `Playing` from an explicit layout.
    ///
    /// `cells` run tail first. Every cell and the apple must lie on the
    /// board, and the apple must not overlap the snake.
    pub fn from_parts(
        board: Board,
        cells: Vec<Cell>,
        direction: Direction,
        apple: Cell,
        policy: BufferPolicy,
        seed: u64,
    ) -> Result<Self, GameError> {
        if let Some(outside) = cells.iter().copied().find(|cell| !board.contains(*cell)) {
            return Err(GameError::CellOutOfBounds(outside));
        }
        let snake = SnakeBody::from_cells(cells)?;
        if !board.contains(apple) {
            return Err(GameError::CellOutOfBounds(apple));
        }
        if snake.occupies(apple) {
            return Err(GameError::AppleOnSnake(apple));
        }

        Ok(Self {
            board,
            snake,
            buffer: DirectionBuffer::new(direction, policy),
            apple,
            state: SessionState::Playing,
            score: 0,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    fn with_rng(board: Board, policy: BufferPolicy, mut rng: StdRng) -> Result<Self, GameError> {
        let snake = SnakeBody::initial(board);
        let apple = place_apple(&mut rng, board, &snake)?;

        Ok(Self {
            board,
            snake,
            buffer: DirectionBuffer::new(INITIAL_DIRECTION, policy),
            apple,
            state: SessionState::NotStarted,
            score: 0,
            rng,
        })
    }

    /// Applies one external input event.
    ///
    /// `Quit` is left to the shell and never changes the session.
    pub fn handle_input(&mut self, input: GameInput) -> Result<Option<GameEvent>, GameError> {
        match input {
            GameInput::Direction(direction) => Ok(self.on_direction_command(direction)),
            GameInput::Restart => self.on_restart(),
            GameInput::Tick => self.on_tick(),
            GameInput::Quit => Ok(None),
        }
    }

    /// Forwards a direction command; the first one starts the run.
    ///
    /// Ignored after game over.
    pub fn on_direction_command(&mut self, direction: Direction) -> Option<GameEvent> {
        match self.state {
            SessionState::GameOver => {
                debug!("ignoring {direction} after game over");
                None
            }
            SessionState::NotStarted => {
                self.state = SessionState::Playing;
                self.feed_buffer(direction);
                info!("run started with {direction}");
                Some(GameEvent::Started { direction })
            }
            SessionState::Playing => {
                self.feed_buffer(direction);
                None
            }
        }
    }

    /// Resets the session, but only once the run is over.
    pub fn on_restart(&mut self) -> Result<Option<GameEvent>, GameError> {
        if self.state != SessionState::GameOver {
            debug!("ignoring restart while {:?}", self.state);
            return Ok(None);
        }
        self.reset()?;
        Ok(Some(GameEvent::Restarted))
    }

    /// Advances simulation by one tick.
    ///
    /// Collision is checked against the prospective head before any
    /// mutation. Running out of free cells for the apple ends the run and is
    /// returned as an error.
    pub fn on_tick(&mut self) -> Result<Option<GameEvent>, GameError> {
        if self.state != SessionState::Playing {
            return Ok(None);
        }

        let next = self.snake.next_head(self.buffer.current());
        if let Some(cause) = collision::detect(next, self.board, &self.snake) {
            self.state = SessionState::GameOver;
            info!("snake died ({cause:?}) at {next:?} with score {}", self.score);
            return Ok(Some(GameEvent::Died {
                cause,
                score: self.score,
            }));
        }

        let grow = next == self.apple;
        self.snake.advance(next, grow);
        if let Some(outcome) = self.buffer.resolve() {
            debug!("pending direction resolved: {outcome:?}");
        }

        if !grow {
            return Ok(None);
        }

        self.score += APPLE_POINTS;
        self.apple = match place_apple(&mut self.rng, self.board, &self.snake) {
            Ok(apple) => apple,
            Err(error) => {
                warn!("{error}");
                self.state = SessionState::GameOver;
                return Err(error);
            }
        };
        debug!("ate apple at {next:?}, next apple at {:?}", self.apple);

        Ok(Some(GameEvent::Ate {
            score: self.score,
            length: self.snake.len(),
        }))
    }

    /// Returns to `NotStarted` with a fresh snake, buffer, score and apple.
    pub fn reset(&mut self) -> Result<(), GameError> {
        self.state = SessionState::NotStarted;
        self.score = 0;
        self.snake.reset(self.board);
        self.buffer.reset(INITIAL_DIRECTION);
        self.apple = place_apple(&mut self.rng, self.board, &self.snake)?;
        info!("session reset");
        Ok(())
    }

    fn feed_buffer(&mut self, direction: Direction) {
        let outcome = self.buffer.set_direction(direction);
        if outcome != BufferOutcome::Applied {
            debug!("direction {direction} {outcome:?}");
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn apple(&self) -> Cell {
        self.apple
    }

    #[must_use]
    pub fn snake(&self) -> &SnakeBody {
        &self.snake
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.buffer.current()
    }

    #[must_use]
    pub fn buffer(&self) -> &DirectionBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn board(&self) -> Board {
        self.board
    }

    /// Copies the state a renderer needs.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            score: self.score,
            direction: self.buffer.current(),
            length: self.snake.len(),
            body: self.snake.cells().copied().collect(),
            apple: self.apple,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::collision::Collision;
    use crate::direction_buffer::BufferPolicy;
    use crate::error::GameError;
    use crate::grid::{Board, Cell};
    use crate::input::{Direction, GameInput};

    use super::{GameEvent, Session, SessionState};

    fn cells(raw: &[(i32, i32)]) -> Vec<Cell> {
        raw.iter().map(|&(c, r)| Cell::new(c, r)).collect()
    }

    fn board(width: u16, height: u16) -> Board {
        Board::new(width, height).expect("valid board")
    }

    #[test]
    fn new_session_waits_for_first_direction() {
        let mut session =
            Session::with_seed(board(10, 10), BufferPolicy::QueueOne, 1).expect("session");
        let before = session.snapshot();

        assert_eq!(session.state(), SessionState::NotStarted);
        assert_eq!(session.on_tick().expect("tick"), None);
        assert_eq!(session.snapshot(), before);
        assert!(!session.snake().occupies(session.apple()));
    }

    #[test]
    fn reversal_as_first_command_still_starts_run() {
        let mut session =
            Session::with_seed(board(10, 10), BufferPolicy::QueueOne, 2).expect("session");

        let event = session.on_direction_command(Direction::Left);

        assert_eq!(
            event,
            Some(GameEvent::Started {
                direction: Direction::Left
            })
        );
        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.direction(), Direction::Right);
    }

    #[test]
    fn wall_collision_sets_game_over_without_moving() {
        let mut session = Session::from_parts(
            board(5, 5),
            cells(&[(2, 2), (3, 2), (4, 2)]),
            Direction::Right,
            Cell::new(0, 0),
            BufferPolicy::QueueOne,
            3,
        )
        .expect("session");

        let event = session.on_tick().expect("tick");

        assert_eq!(
            event,
            Some(GameEvent::Died {
                cause: Collision::Border,
                score: 0
            })
        );
        assert_eq!(session.state(), SessionState::GameOver);
        assert_eq!(session.snake().head(), Cell::new(4, 2));
    }

    #[test]
    fn self_collision_sets_game_over() {
        let mut session = Session::from_parts(
            board(6, 6),
            cells(&[(3, 2), (3, 3), (2, 3), (1, 3), (1, 2), (2, 2)]),
            Direction::Right,
            Cell::new(5, 5),
            BufferPolicy::QueueOne,
            4,
        )
        .expect("session");

        let event = session.on_tick().expect("tick");

        assert_eq!(
            event,
            Some(GameEvent::Died {
                cause: Collision::SelfBody,
                score: 0
            })
        );
    }

    #[test]
    fn explicit_layout_must_respect_invariants() {
        let layout = |raw: &[(i32, i32)], apple: Cell| {
            Session::from_parts(
                board(5, 5),
                cells(raw),
                Direction::Right,
                apple,
                BufferPolicy::QueueOne,
                10,
            )
        };

        assert!(matches!(
            layout(&[(1, 1), (1, 1)], Cell::new(3, 3)),
            Err(GameError::DuplicateCell(_))
        ));
        assert!(matches!(
            layout(&[(4, 1), (5, 1)], Cell::new(3, 3)),
            Err(GameError::CellOutOfBounds(cell)) if cell == Cell::new(5, 1)
        ));
        assert!(matches!(
            layout(&[(1, 1), (2, 1)], Cell::new(0, 7)),
            Err(GameError::CellOutOfBounds(cell)) if cell == Cell::new(0, 7)
        ));
        assert!(matches!(
            layout(&[(1, 1), (2, 1)], Cell::new(1, 1)),
            Err(GameError::AppleOnSnake(_))
        ));
        assert!(matches!(layout(&[], Cell::new(3, 3)), Err(GameError::EmptyBody)));
        assert!(layout(&[(1, 1), (2, 1)], Cell::new(3, 3)).is_ok());
    }

    #[test]
    fn commands_after_game_over_are_ignored() {
        let mut session = Session::from_parts(
            board(5, 5),
            cells(&[(4, 2)]),
            Direction::Right,
            Cell::new(0, 0),
            BufferPolicy::QueueOne,
            5,
        )
        .expect("session");
        session.on_tick().expect("tick");

        assert_eq!(session.on_direction_command(Direction::Up), None);
        assert_eq!(session.direction(), Direction::Right);
        assert_eq!(session.on_tick().expect("tick"), None);
        assert_eq!(session.state(), SessionState::GameOver);
    }

    #[test]
    fn restart_only_applies_after_game_over() {
        let mut session = Session::from_parts(
            board(5, 5),
            cells(&[(2, 2), (3, 2), (4, 2)]),
            Direction::Right,
            Cell::new(0, 0),
            BufferPolicy::QueueOne,
            6,
        )
        .expect("session");

        assert_eq!(session.handle_input(GameInput::Restart).expect("restart"), None);
        assert_eq!(session.state(), SessionState::Playing);

        session.handle_input(GameInput::Tick).expect("tick");
        let event = session.handle_input(GameInput::Restart).expect("restart");

        assert_eq!(event, Some(GameEvent::Restarted));
        assert_eq!(session.state(), SessionState::NotStarted);
        assert_eq!(session.score(), 0);
        assert_eq!(session.snake().len(), 3);
    }

    #[test]
    fn filling_the_board_reports_no_free_cell() {
        // 4x1 board, three-cell snake eats the last free cell.
        let mut session = Session::from_parts(
            board(4, 1),
            cells(&[(0, 0), (1, 0), (2, 0)]),
            Direction::Right,
            Cell::new(3, 0),
            BufferPolicy::QueueOne,
            7,
        )
        .expect("session");

        let result = session.on_tick();

        assert!(matches!(
            result,
            Err(GameError::NoFreeCellForApple { occupied: 4, .. })
        ));
        assert_eq!(session.state(), SessionState::GameOver);
        assert_eq!(session.score(), 10);
    }

    #[test]
    fn quick_double_tap_turns_on_consecutive_ticks() {
        let mut session = Session::from_parts(
            board(10, 10),
            cells(&[(1, 5), (2, 5), (3, 5)]),
            Direction::Right,
            Cell::new(9, 9),
            BufferPolicy::QueueOne,
            8,
        )
        .expect("session");

        session.on_direction_command(Direction::Up);
        session.on_direction_command(Direction::Left);

        session.on_tick().expect("tick");
        assert_eq!(session.snake().head(), Cell::new(3, 6));
        session.on_tick().expect("tick");
        assert_eq!(session.snake().head(), Cell::new(2, 6));
    }

    #[test]
    fn drop_repeat_ignores_second_tap() {
        let mut session = Session::from_parts(
            board(10, 10),
            cells(&[(1, 5), (2, 5), (3, 5)]),
            Direction::Right,
            Cell::new(9, 9),
            BufferPolicy::DropRepeat,
            9,
        )
        .expect("session");

        session.on_direction_command(Direction::Up);
        session.on_direction_command(Direction::Left);

        session.on_tick().expect("tick");
        session.on_tick().expect("tick");
        assert_eq!(session.snake().head(), Cell::new(3, 7));
    }
}
