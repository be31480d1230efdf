use crate::ai::MinesweeperAi;
use crate::board::Minesweeper;
use crate::cell::Cell;
use rand::Rng;

/// Represents the current state of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

/// How the player settled on a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// The cell was proven safe.
    Safe,
    /// Nothing was proven safe, so the cell was guessed.
    Random,
}

/// A single probe made by the player and the game state it led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub cell: Cell,
    pub kind: MoveKind,
    pub state: GameState,
}

/// Plays a board with a knowledge base: safe moves first, guesses otherwise.
pub struct Autoplay {
    board: Minesweeper,
    ai: MinesweeperAi,
    state: GameState,
}

impl Autoplay {
    pub fn new(board: Minesweeper) -> Self {
        let ai = MinesweeperAi::new(board.height(), board.width());
        Autoplay {
            board,
            ai,
            state: GameState::Playing,
        }
    }

    pub fn board(&self) -> &Minesweeper {
        &self.board
    }

    pub fn ai(&self) -> &MinesweeperAi {
        &self.ai
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Makes one move.
    ///
    /// Returns `None` once the game is over or no move is left. Errors only
    /// when the knowledge base finds itself inconsistent.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> anyhow::Result<Option<Turn>> {
        if self.state != GameState::Playing {
            return Ok(None);
        }

        let (cell, kind) = match self.ai.make_safe_move() {
            Some(cell) => (cell, MoveKind::Safe),
            None => match self.ai.make_random_move(rng) {
                Some(cell) => (cell, MoveKind::Random),
                None => {
                    // Every cell is either probed or a known mine.
                    self.update_state();
                    return Ok(None);
                }
            },
        };

        if self.board.is_mine(cell) {
            self.state = GameState::Lost;
        } else {
            self.ai.add_knowledge(cell, self.board.nearby_mines(cell))?;
            self.update_state();
        }

        Ok(Some(Turn {
            cell,
            kind,
            state: self.state,
        }))
    }

    /// Steps until the game is over, returning the final state.
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> anyhow::Result<GameState> {
        while self.step(rng)?.is_some() {}
        Ok(self.state)
    }

    /// Flags every known mine, then checks for a win: either all mines are
    /// flagged, or every cell that is not a mine has been probed.
    fn update_state(&mut self) {
        for &mine in self.ai.mines() {
            self.board.flag(mine);
        }

        let cells = self.board.height() * self.board.width();
        let cleared = self.ai.moves_made().len() + self.board.mine_count() == cells;
        if self.board.won() || cleared {
            self.state = GameState::Won;
        }
    }
}
