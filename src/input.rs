use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
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

    /// Unit step `(dx, dy)` for one move; y grows downwards.
    #[must_use]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// High-level input events consumed by the driver loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Quit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Maps a raw key event to a game input. Unbound keys map to `None`.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Up => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Right => Some(GameInput::Direction(Direction::Right)),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(GameInput::Quit)
        }
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(GameInput::Quit),
        _ => None,
    }
}

/// Inputs gathered during one frame, coalesced for a single tick.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct FrameInput {
    /// Last direction requested during the frame.
    pub direction: Option<Direction>,
    pub quit: bool,
}

impl FrameInput {
    /// Folds one input into the frame. Later directions replace earlier ones.
    pub fn push(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => self.direction = Some(direction),
            GameInput::Quit => self.quit = true,
        }
    }
}

/// Polls the terminal for key events, one frame at a time.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Collects key events until `frame` has elapsed, doubling as the frame sleep.
    ///
    /// Returns early when a quit is requested.
    pub fn collect_frame(&mut self, frame: Duration) -> io::Result<FrameInput> {
        let deadline = Instant::now() + frame;
        let mut collected = FrameInput::default();

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !event::poll(remaining)? {
                break;
            }

            if let Event::Key(key) = event::read()? {
                if let Some(input) = map_key(key) {
                    debug!("key {:?} mapped to {input:?}", key.code);
                    collected.push(input);
                }
            }

            if collected.quit {
                break;
            }
        }

        Ok(collected)
    }
}
