use itertools::Itertools;
use std::fmt;

/// A coordinate on the minesweeper board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }

    pub fn in_bounds(&self, height: usize, width: usize) -> bool {
        self.row < height && self.col < width
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// All valid neighbor coordinates of `cell`, handling board edges and corners.
/// The cell itself is not included.
pub fn neighbors(cell: Cell, height: usize, width: usize) -> impl Iterator<Item = Cell> {
    (-1..=1isize)
        .cartesian_product(-1..=1isize)
        .filter_map(move |(dr, dc)| {
            if dr == 0 && dc == 0 {
                return None;
            }

            let nr = cell.row as isize + dr;
            let nc = cell.col as isize + dc;

            if nr >= 0 && nr < height as isize && nc >= 0 && nc < width as isize {
                Some(Cell::new(nr as usize, nc as usize))
            } else {
                None
            }
        })
}

/// Every cell of a `height` x `width` board in row-major order.
pub fn all_cells(height: usize, width: usize) -> impl Iterator<Item = Cell> {
    (0..height)
        .cartesian_product(0..width)
        .map(|(row, col)| Cell::new(row, col))
}
