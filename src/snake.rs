use std::collections::VecDeque;

use crate::geometry::{Cell, Grid};
use crate::input::Direction;

/// Ordered snake body, head first.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Creates a two-cell snake from its head and tail.
    #[must_use]
    pub fn new(head: Cell, tail: Cell) -> Self {
        Self {
            body: VecDeque::from([head, tail]),
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>) -> Self {
        debug_assert!(!segments.is_empty(), "snake needs at least a head");

        Self {
            body: VecDeque::from(segments),
        }
    }

    /// Moves one step: pushes the new head and drops the tail unless `grow`.
    ///
    /// The head is inserted unconditionally; callers check
    /// [`Snake::is_self_collision`] afterwards.
    pub fn advance(&mut self, grid: Grid, direction: Direction, grow: bool) -> Cell {
        let next_head = grid.wrap(self.head(), direction);

        self.body.push_front(next_head);
        if !grow {
            let _ = self.body.pop_back();
        }

        next_head
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn is_self_collision(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}
