use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::INITIAL_SNAKE_LENGTH;
use crate::error::GameError;
use crate::food::{drop_food, FoodSet};
use crate::geometry::{Cell, Grid};
use crate::input::{direction_change_is_valid, Direction};
use crate::snake::Snake;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Why a game stopped.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    SelfCollision,
    /// No free cell was left for the next food item.
    BoardFull,
}

/// Result of one [`GameState::tick`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    Continued,
    /// The snake ran into itself; carries the final score.
    Ended(u32),
    Stalemate,
    /// The game was already over; nothing moved.
    Unchanged,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    snake: Snake,
    food: FoodSet,
    direction: Direction,
    pending_growth: bool,
    status: GameStatus,
    end_reason: Option<EndReason>,
    tick_count: u64,
    rng: StdRng,
}

impl GameState {
    /// Starts a game on a `width` × `height` grid.
    ///
    /// The snake starts as two cells heading right near the centre, with one
    /// food item dropped. Without a seed the food sequence is drawn from OS
    /// entropy.
    pub fn new(width: u16, height: u16, seed: Option<u64>) -> Result<Self, GameError> {
        let grid = Grid::new(width, height)?;
        if width < 4 || grid.interior_cell_count() <= INITIAL_SNAKE_LENGTH {
            return Err(GameError::InvalidGeometry { width, height });
        }

        let head = Cell::new((i32::from(width) / 2 - 1).max(2), i32::from(height) / 2);
        let tail = Cell::new(head.x - 1, head.y);
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self::build(grid, Snake::new(head, tail), Direction::Right, FoodSet::new(), rng)
    }

    /// Creates a game from an explicit layout, for tests and crafted positions.
    ///
    /// Food is dropped when `food` is empty. The layout is rejected with
    /// [`GameError::InvalidGeometry`] when the snake is shorter than the
    /// starting length, overlaps itself, or leaves the interior, or when a
    /// food cell lies on the snake or outside the interior.
    pub fn with_layout(
        grid: Grid,
        snake: Snake,
        direction: Direction,
        food: impl IntoIterator<Item = Cell>,
        seed: u64,
    ) -> Result<Self, GameError> {
        let food: FoodSet = food.into_iter().collect();
        if !layout_is_valid(grid, &snake, &food) {
            return Err(GameError::InvalidGeometry {
                width: grid.width(),
                height: grid.height(),
            });
        }

        Self::build(grid, snake, direction, food, StdRng::seed_from_u64(seed))
    }

    fn build(
        grid: Grid,
        snake: Snake,
        direction: Direction,
        food: FoodSet,
        rng: StdRng,
    ) -> Result<Self, GameError> {
        let mut state = Self {
            grid,
            snake,
            food,
            direction,
            pending_growth: false,
            status: GameStatus::Running,
            end_reason: None,
            tick_count: 0,
            rng,
        };

        if state.food.is_empty() {
            state.replenish_food()?;
        }

        Ok(state)
    }

    /// Requests a new heading. Reversals and requests after game over are ignored.
    pub fn set_direction(&mut self, requested: Direction) {
        if self.status != GameStatus::Running {
            return;
        }

        if direction_change_is_valid(self.direction, requested) {
            self.direction = requested;
        }
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Unchanged;
        }

        self.tick_count += 1;
        let head = self.snake.advance(self.grid, self.direction, self.pending_growth);
        self.pending_growth = false;

        if self.snake.is_self_collision() {
            self.finish(EndReason::SelfCollision);
            return TickOutcome::Ended(self.score());
        }

        if self.food.remove(head) {
            // Growth lands on the following tick, when the tail is kept.
            self.pending_growth = true;
            if self.replenish_food().is_err() {
                self.finish(EndReason::BoardFull);
                return TickOutcome::Stalemate;
            }
        }

        TickOutcome::Continued
    }

    fn replenish_food(&mut self) -> Result<(), GameError> {
        let snake = &self.snake;
        let food = &self.food;
        let cell = drop_food(&mut self.rng, self.grid, |cell| {
            snake.occupies(cell) || food.contains(cell)
        })?;
        self.food.insert(cell);
        Ok(())
    }

    fn finish(&mut self, reason: EndReason) {
        self.status = GameStatus::GameOver;
        self.end_reason = Some(reason);
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> &FoodSet {
        &self.food
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Segments grown beyond the starting length.
    #[must_use]
    pub fn score(&self) -> u32 {
        let grown = self.snake.len().saturating_sub(INITIAL_SNAKE_LENGTH);
        u32::try_from(grown).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    #[must_use]
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    /// True right after food was eaten, until the next tick keeps the tail.
    #[must_use]
    pub fn pending_growth(&self) -> bool {
        self.pending_growth
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

fn layout_is_valid(grid: Grid, snake: &Snake, food: &FoodSet) -> bool {
    if snake.len() < INITIAL_SNAKE_LENGTH {
        return false;
    }

    let mut seen = BTreeSet::new();
    let snake_fits = snake
        .segments()
        .all(|segment| grid.is_interior(*segment) && seen.insert(*segment));

    snake_fits
        && food
            .iter()
            .all(|cell| grid.is_interior(*cell) && !snake.occupies(*cell))
}

#[cfg(test)]
mod tests {
    use crate::error::GameError;
    use crate::geometry::{Cell, Grid};
    use crate::input::Direction;
    use crate::snake::Snake;

    use super::{EndReason, GameState, GameStatus, TickOutcome};

    const ALL_DIRECTIONS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    fn grid(width: u16, height: u16) -> Grid {
        Grid::new(width, height).expect("test grid should be valid")
    }

    #[test]
    fn new_game_starts_centred_heading_right() {
        let state = GameState::new(10, 10, Some(1)).expect("10x10 is playable");

        assert_eq!(
            state.snake().segments().copied().collect::<Vec<_>>(),
            vec![Cell::new(4, 5), Cell::new(3, 5)]
        );
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.status(), GameStatus::Running);
        assert_eq!(state.food().len(), 1);
        assert_eq!(state.score(), 0);
        assert_eq!(state.tick_count(), 0);
    }

    #[test]
    fn initial_food_avoids_snake() {
        for seed in 0..50 {
            let state = GameState::new(6, 4, Some(seed)).expect("6x4 is playable");
            let food = *state.food().iter().next().expect("one food item");

            assert!(!state.snake().occupies(food));
            assert!(state.grid().is_interior(food));
        }
    }

    #[test]
    fn undersized_grids_are_rejected() {
        assert_eq!(
            GameState::new(2, 10, Some(0)).err(),
            Some(GameError::InvalidGeometry {
                width: 2,
                height: 10
            })
        );
        assert!(GameState::new(3, 10, Some(0)).is_err());
        assert!(GameState::new(4, 3, Some(0)).is_err());
        assert!(GameState::new(5, 3, Some(0)).is_ok());
        assert!(GameState::new(4, 4, Some(0)).is_ok());
    }

    #[test]
    fn small_grid_start_stays_inside_interior() {
        let state = GameState::new(4, 4, Some(9)).expect("4x4 is playable");

        for segment in state.snake().segments() {
            assert!(state.grid().is_interior(*segment));
        }
    }

    fn layout_error(snake: Snake, food: Vec<Cell>) -> Option<GameError> {
        GameState::with_layout(grid(10, 10), snake, Direction::Right, food, 1).err()
    }

    const LAYOUT_ERROR: Option<GameError> = Some(GameError::InvalidGeometry {
        width: 10,
        height: 10,
    });

    #[test]
    fn layout_rejects_single_cell_snake() {
        let snake = Snake::from_segments(vec![Cell::new(4, 4)]);

        assert_eq!(layout_error(snake, vec![Cell::new(2, 2)]), LAYOUT_ERROR);
    }

    #[test]
    fn layout_rejects_snake_on_frame() {
        let snake = Snake::new(Cell::new(1, 5), Cell::new(0, 5));

        assert_eq!(layout_error(snake, vec![Cell::new(2, 2)]), LAYOUT_ERROR);
    }

    #[test]
    fn layout_rejects_overlapping_segments() {
        let snake = Snake::from_segments(vec![
            Cell::new(4, 4),
            Cell::new(5, 4),
            Cell::new(4, 4),
        ]);

        assert_eq!(layout_error(snake, vec![Cell::new(2, 2)]), LAYOUT_ERROR);
    }

    #[test]
    fn layout_rejects_food_on_snake() {
        let snake = Snake::new(Cell::new(4, 5), Cell::new(3, 5));

        assert_eq!(layout_error(snake, vec![Cell::new(3, 5)]), LAYOUT_ERROR);
    }

    #[test]
    fn layout_rejects_food_on_frame() {
        let snake = Snake::new(Cell::new(4, 5), Cell::new(3, 5));

        assert_eq!(layout_error(snake, vec![Cell::new(9, 5)]), LAYOUT_ERROR);
    }

    #[test]
    fn valid_layout_is_accepted() {
        let snake = Snake::new(Cell::new(4, 5), Cell::new(3, 5));

        assert_eq!(layout_error(snake, vec![Cell::new(5, 5)]), None);
    }

    #[test]
    fn reversal_is_never_applied() {
        for current in ALL_DIRECTIONS {
            let mut state = GameState::with_layout(
                grid(10, 10),
                Snake::new(Cell::new(4, 5), Cell::new(3, 5)),
                current,
                [Cell::new(7, 7)],
                0,
            )
            .expect("layout is valid");

            state.set_direction(current.opposite());

            assert_eq!(state.direction(), current);
        }
    }

    #[test]
    fn reversal_on_two_cell_snake_keeps_moving_forward() {
        let mut state = GameState::new(10, 10, Some(2)).expect("10x10 is playable");

        state.set_direction(Direction::Left);
        let outcome = state.tick();

        assert_eq!(outcome, TickOutcome::Continued);
        assert_eq!(state.snake().head(), Cell::new(5, 5));
    }

    #[test]
    fn perpendicular_turn_is_applied() {
        let mut state = GameState::new(10, 10, Some(2)).expect("10x10 is playable");

        state.set_direction(Direction::Up);
        state.tick();

        assert_eq!(state.direction(), Direction::Up);
        assert_eq!(state.snake().head(), Cell::new(4, 4));
    }

    #[test]
    fn growth_is_delayed_by_one_tick() {
        let mut state = GameState::with_layout(
            grid(10, 10),
            Snake::new(Cell::new(4, 5), Cell::new(3, 5)),
            Direction::Right,
            [Cell::new(5, 5)],
            4,
        )
        .expect("layout is valid");

        assert_eq!(state.tick(), TickOutcome::Continued);
        assert_eq!(state.snake().len(), 2);
        assert!(state.pending_growth());
        assert_eq!(state.score(), 0);

        assert_eq!(state.tick(), TickOutcome::Continued);
        assert_eq!(state.snake().len(), 3);
        assert!(!state.pending_growth());
        assert_eq!(state.score(), 1);

        assert_eq!(state.tick(), TickOutcome::Continued);
        assert_eq!(state.snake().len(), 3);
    }

    #[test]
    fn self_collision_ends_game() {
        let mut state = GameState::with_layout(
            grid(10, 10),
            Snake::from_segments(vec![
                Cell::new(3, 3),
                Cell::new(4, 3),
                Cell::new(4, 4),
                Cell::new(3, 4),
                Cell::new(2, 4),
            ]),
            Direction::Left,
            [Cell::new(7, 7)],
            5,
        )
        .expect("layout is valid");

        state.set_direction(Direction::Down);

        assert_eq!(state.tick(), TickOutcome::Ended(3));
        assert_eq!(state.status(), GameStatus::GameOver);
        assert_eq!(state.end_reason(), Some(EndReason::SelfCollision));
        assert!(!state.is_running());
    }

    #[test]
    fn game_over_is_absorbing() {
        let mut state = GameState::with_layout(
            grid(10, 10),
            Snake::from_segments(vec![
                Cell::new(3, 3),
                Cell::new(4, 3),
                Cell::new(4, 4),
                Cell::new(3, 4),
                Cell::new(2, 4),
            ]),
            Direction::Down,
            [Cell::new(7, 7)],
            5,
        )
        .expect("layout is valid");

        state.tick();
        let snapshot: Vec<Cell> = state.snake().segments().copied().collect();
        let ticks = state.tick_count();

        state.set_direction(Direction::Left);
        assert_eq!(state.tick(), TickOutcome::Unchanged);
        assert_eq!(state.direction(), Direction::Down);
        assert_eq!(state.snake().segments().copied().collect::<Vec<_>>(), snapshot);
        assert_eq!(state.tick_count(), ticks);
    }

    #[test]
    fn full_board_is_stalemate() {
        // 5x3 leaves a single interior row of three cells.
        let mut state = GameState::with_layout(
            grid(5, 3),
            Snake::new(Cell::new(2, 1), Cell::new(1, 1)),
            Direction::Right,
            [Cell::new(3, 1)],
            6,
        )
        .expect("layout is valid");

        assert_eq!(state.tick(), TickOutcome::Continued);
        assert_eq!(
            state.food().iter().copied().collect::<Vec<_>>(),
            vec![Cell::new(1, 1)]
        );

        assert_eq!(state.tick(), TickOutcome::Stalemate);
        assert_eq!(state.status(), GameStatus::GameOver);
        assert_eq!(state.end_reason(), Some(EndReason::BoardFull));
        assert_eq!(state.score(), 1);
        assert_eq!(state.tick(), TickOutcome::Unchanged);
    }

    #[test]
    fn random_play_keeps_invariants() {
        for seed in 0..20_u64 {
            let mut state = GameState::new(9, 7, Some(seed)).expect("9x7 is playable");

            for step in 0..300_u64 {
                state.set_direction(ALL_DIRECTIONS[((seed + step * 7) % 4) as usize]);
                let before = state.snake().len();
                let grow = state.pending_growth();
                let outcome = state.tick();

                assert_eq!(state.score() as usize, state.snake().len() - 2);
                match outcome {
                    TickOutcome::Continued => {
                        assert_eq!(state.snake().len(), before + usize::from(grow));
                        assert_eq!(state.food().len(), 1);
                        for food in state.food().iter() {
                            assert!(!state.snake().occupies(*food));
                        }
                    }
                    TickOutcome::Ended(score) => {
                        assert_eq!(score, state.score());
                        break;
                    }
                    TickOutcome::Stalemate => break,
                    TickOutcome::Unchanged => panic!("running game returned Unchanged"),
                }
            }
        }
    }
}
