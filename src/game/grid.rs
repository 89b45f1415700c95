use std::collections::HashSet;
use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;

use super::state::Position;

/// Returned when every cell of the grid is occupied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridExhausted;

impl fmt::Display for GridExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no unoccupied cell left on the grid")
    }
}

impl std::error::Error for GridExhausted {}

/// Fixed-size discrete playing field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Check if a position is within the grid bounds
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    pub fn center(&self) -> Position {
        Position::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Pick a cell uniformly at random among those not in `occupied`.
    pub fn pick_unoccupied<R: Rng + ?Sized>(
        &self,
        occupied: &HashSet<Position>,
        rng: &mut R,
    ) -> Result<Position, GridExhausted> {
        let free: Vec<Position> = self
            .cells()
            .filter(|pos| !occupied.contains(pos))
            .collect();

        free.choose(rng).copied().ok_or(GridExhausted)
    }

    fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
    }
}
