use crate::cell::{Cell, all_cells, neighbors};
use rand::Rng;
use rand::prelude::IndexedRandom;
use std::collections::HashSet;

/// The hidden minesweeper board: where the mines are, and which of them the
/// player has flagged so far.
#[derive(Debug, Clone)]
pub struct Minesweeper {
    height: usize,
    width: usize,
    mines: HashSet<Cell>,
    /// Mines flagged by the player.
    mines_found: HashSet<Cell>,
}

impl Minesweeper {
    /// Places `mines` mines uniformly at random.
    pub fn new<R: Rng + ?Sized>(
        height: usize,
        width: usize,
        mines: usize,
        rng: &mut R,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(
            mines < height * width,
            "total mines must be less than the number of cells on the board"
        );
        let cells: Vec<Cell> = all_cells(height, width).collect();
        let mines = cells.choose_multiple(rng, mines).copied().collect();
        Ok(Minesweeper {
            height,
            width,
            mines,
            mines_found: HashSet::new(),
        })
    }

    /// A board with mines at exactly the given cells.
    pub fn with_mines(
        height: usize,
        width: usize,
        mines: impl IntoIterator<Item = Cell>,
    ) -> anyhow::Result<Self> {
        let mines: HashSet<Cell> = mines.into_iter().collect();
        if let Some(cell) = mines.iter().find(|c| !c.in_bounds(height, width)) {
            anyhow::bail!("mine at {cell} is outside a {height}x{width} board");
        }
        Ok(Minesweeper {
            height,
            width,
            mines,
            mines_found: HashSet::new(),
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn mine_count(&self) -> usize {
        self.mines.len()
    }

    pub fn is_mine(&self, cell: Cell) -> bool {
        self.mines.contains(&cell)
    }

    /// Number of mines within one row and column of `cell`, not counting the
    /// cell itself.
    pub fn nearby_mines(&self, cell: Cell) -> usize {
        neighbors(cell, self.height, self.width)
            .filter(|n| self.mines.contains(n))
            .count()
    }

    /// Flags `cell` as a mine.
    pub fn flag(&mut self, cell: Cell) {
        self.mines_found.insert(cell);
    }

    pub fn mines_found(&self) -> &HashSet<Cell> {
        &self.mines_found
    }

    /// The game is won once exactly the mines have been flagged.
    pub fn won(&self) -> bool {
        self.mines_found == self.mines
    }
}
