use rand::Rng;

use crate::error::GameError;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Rectangular board with a one-cell frame around the playable interior.
///
/// Columns `0` and `width - 1`, and rows `0` and `height - 1`, belong to the
/// frame. Movement wraps inside `[1, width - 2] × [1, height - 2]`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    width: u16,
    height: u16,
}

impl Grid {
    /// Smallest width or height that leaves a non-empty interior.
    pub const MIN_SIDE: u16 = 3;

    /// Creates a grid, failing when either side is below [`Grid::MIN_SIDE`].
    pub fn new(width: u16, height: u16) -> Result<Self, GameError> {
        if width < Self::MIN_SIDE || height < Self::MIN_SIDE {
            return Err(GameError::InvalidGeometry { width, height });
        }

        Ok(Self { width, height })
    }

    #[must_use]
    pub fn width(self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(self) -> u16 {
        self.height
    }

    /// Top-left playable cell.
    #[must_use]
    pub fn interior_min(self) -> Cell {
        Cell::new(1, 1)
    }

    /// Bottom-right playable cell.
    #[must_use]
    pub fn interior_max(self) -> Cell {
        Cell::new(i32::from(self.width) - 2, i32::from(self.height) - 2)
    }

    /// Returns true when `cell` lies in the playable interior.
    #[must_use]
    pub fn is_interior(self, cell: Cell) -> bool {
        let (min, max) = (self.interior_min(), self.interior_max());
        (min.x..=max.x).contains(&cell.x) && (min.y..=max.y).contains(&cell.y)
    }

    /// Returns the number of playable cells.
    #[must_use]
    pub fn interior_cell_count(self) -> usize {
        usize::from(self.width - 2) * usize::from(self.height - 2)
    }

    /// Iterates over every playable cell, row by row.
    pub fn interior_cells(self) -> impl Iterator<Item = Cell> {
        let (min, max) = (self.interior_min(), self.interior_max());
        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| Cell::new(x, y)))
    }

    /// Picks a uniformly random playable cell.
    #[must_use]
    pub fn random_interior_cell<R: Rng + ?Sized>(self, rng: &mut R) -> Cell {
        let (min, max) = (self.interior_min(), self.interior_max());
        Cell::new(rng.gen_range(min.x..=max.x), rng.gen_range(min.y..=max.y))
    }

    /// Moves `cell` one step in `direction`, reappearing on the opposite
    /// interior edge when the step leaves the playable area.
    #[must_use]
    pub fn wrap(self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.offset();
        let (min, max) = (self.interior_min(), self.interior_max());

        Cell::new(
            wrap_axis(cell.x + dx, min.x, max.x),
            wrap_axis(cell.y + dy, min.y, max.y),
        )
    }
}

fn wrap_axis(value: i32, low: i32, high: i32) -> i32 {
    if value < low {
        high
    } else if value > high {
        low
    } else {
        value
    }
}
