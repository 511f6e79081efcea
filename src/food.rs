use std::collections::BTreeSet;

use rand::Rng;

use crate::error::GameError;
use crate::geometry::{Cell, Grid};

/// Random draws attempted before falling back to scanning free cells.
pub const MAX_SAMPLE_ATTEMPTS: usize = 64;

/// Food items currently on the board.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct FoodSet {
    cells: BTreeSet<Cell>,
}

impl FoodSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds food at `cell`. Returns false when food was already there.
    pub fn insert(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    /// Removes food at `cell`. Returns true when food was eaten.
    pub fn remove(&mut self, cell: Cell) -> bool {
        self.cells.remove(&cell)
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}

impl FromIterator<Cell> for FoodSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// Picks a uniformly random playable cell for which `occupied` is false.
///
/// Rejection sampling is tried first; after [`MAX_SAMPLE_ATTEMPTS`] misses the
/// free cells are enumerated and one is chosen directly, so a crowded board
/// still terminates. Fails with [`GameError::NoSpaceAvailable`] when every
/// playable cell is occupied.
pub fn drop_food<R, F>(rng: &mut R, grid: Grid, occupied: F) -> Result<Cell, GameError>
where
    R: Rng + ?Sized,
    F: Fn(Cell) -> bool,
{
    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let cell = grid.random_interior_cell(rng);
        if !occupied(cell) {
            return Ok(cell);
        }
    }

    let candidates: Vec<Cell> = grid.interior_cells().filter(|cell| !occupied(*cell)).collect();
    if candidates.is_empty() {
        return Err(GameError::NoSpaceAvailable);
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates[index])
}
