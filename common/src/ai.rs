use crate::cell::{Cell, all_cells, neighbors};
use crate::error::KnowledgeError;
use crate::sentence::Sentence;
use itertools::Itertools;
use rand::Rng;
use rand::prelude::IndexedRandom;
use std::collections::HashSet;

/// The minesweeper player: a knowledge base of sentences about the board,
/// plus the cells already probed and the cells proven safe or mined.
///
/// Every cell that appears in a stored sentence has unknown status. Once a
/// cell is proven safe or a mine it is removed from every sentence.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MinesweeperAi {
    height: usize,
    width: usize,
    /// Cells that have been probed.
    moves_made: HashSet<Cell>,
    /// Cells proven to be mines.
    mines: HashSet<Cell>,
    /// Cells proven to be safe.
    safes: HashSet<Cell>,
    /// Sentences about the board known to be true.
    knowledge: Vec<Sentence>,
}

impl MinesweeperAi {
    pub fn new(height: usize, width: usize) -> Self {
        MinesweeperAi {
            height,
            width,
            moves_made: HashSet::new(),
            mines: HashSet::new(),
            safes: HashSet::new(),
            knowledge: Vec::new(),
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn moves_made(&self) -> &HashSet<Cell> {
        &self.moves_made
    }

    pub fn mines(&self) -> &HashSet<Cell> {
        &self.mines
    }

    pub fn safes(&self) -> &HashSet<Cell> {
        &self.safes
    }

    pub fn knowledge(&self) -> &[Sentence] {
        &self.knowledge
    }

    /// Deserializes a knowledge base from bytes.
    pub fn deserialize(bts: &[u8]) -> anyhow::Result<Self> {
        Ok(bcs::from_bytes(bts)?)
    }

    /// Serializes the knowledge base to bytes.
    pub fn serialize(&self) -> anyhow::Result<Vec<u8>> {
        Ok(bcs::to_bytes(self)?)
    }

    /// Records `cell` as a mine, removes it from every sentence and runs
    /// inference to a fixpoint. On error nothing is changed.
    pub fn mark_mine(&mut self, cell: Cell) -> Result<(), KnowledgeError> {
        self.transaction(|ai| {
            ai.record_mine(cell)?;
            ai.infer()
        })
    }

    /// Records `cell` as safe, removes it from every sentence and runs
    /// inference to a fixpoint. On error nothing is changed.
    pub fn mark_safe(&mut self, cell: Cell) -> Result<(), KnowledgeError> {
        self.transaction(|ai| {
            ai.record_safe(cell)?;
            ai.infer()
        })
    }

    /// Called when the board reports, for a newly probed safe cell, how many
    /// of its neighbors are mines.
    ///
    /// The cell is recorded as a move and as safe, a sentence over its
    /// still-unknown neighbors is added, and inference runs until nothing new
    /// can be concluded. If the observation is rejected for any reason no
    /// state is touched, so a corrected observation can be made afterwards.
    pub fn add_knowledge(&mut self, cell: Cell, count: usize) -> Result<(), KnowledgeError> {
        if !cell.in_bounds(self.height, self.width) {
            return Err(KnowledgeError::OutOfBounds(cell));
        }
        if self.moves_made.contains(&cell) {
            return Err(KnowledgeError::DuplicateObservation(cell));
        }

        self.transaction(|ai| {
            ai.record_safe(cell)?;
            ai.moves_made.insert(cell);

            // Known neighbors drop out; known mines also use up part of the count.
            let mut remaining = count;
            let mut unknown = Vec::new();
            for neighbor in neighbors(cell, ai.height, ai.width) {
                if ai.mines.contains(&neighbor) {
                    remaining = remaining.checked_sub(1).ok_or_else(|| {
                        KnowledgeError::Inconsistent(format!(
                            "{cell} reports {count} mines but has more known mine neighbors"
                        ))
                    })?;
                } else if !ai.safes.contains(&neighbor) {
                    unknown.push(neighbor);
                }
            }

            ai.insert_sentence(Sentence::new(unknown, remaining))?;
            ai.infer()
        })
    }

    /// Adds a sentence known to be true and runs inference to a fixpoint.
    /// On error nothing is changed.
    pub fn add_sentence(&mut self, sentence: Sentence) -> Result<(), KnowledgeError> {
        if let Some(&cell) = sentence
            .cells()
            .iter()
            .find(|c| !c.in_bounds(self.height, self.width))
        {
            return Err(KnowledgeError::OutOfBounds(cell));
        }

        self.transaction(|ai| {
            ai.insert_sentence(sentence)?;
            ai.infer()
        })
    }

    /// Returns a cell known to be safe that has not been probed yet.
    /// When several qualify, the smallest in row-major order is chosen.
    pub fn make_safe_move(&self) -> Option<Cell> {
        self.safes.difference(&self.moves_made).min().copied()
    }

    /// Returns a cell chosen uniformly among those that have not been probed
    /// and are not known to be mines.
    pub fn make_random_move<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Cell> {
        let candidates: Vec<Cell> = all_cells(self.height, self.width)
            .filter(|c| !self.moves_made.contains(c) && !self.mines.contains(c))
            .collect();
        candidates.choose(rng).copied()
    }

    /// Runs `op` on a copy of the knowledge base and keeps the result only if
    /// it succeeds.
    fn transaction(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<(), KnowledgeError>,
    ) -> Result<(), KnowledgeError> {
        let mut scratch = self.clone();
        op(&mut scratch)?;
        *self = scratch;
        Ok(())
    }

    fn record_mine(&mut self, cell: Cell) -> Result<(), KnowledgeError> {
        if self.safes.contains(&cell) {
            return Err(KnowledgeError::Contradiction(cell));
        }
        if !self.mines.insert(cell) {
            return Ok(());
        }
        for sentence in &mut self.knowledge {
            sentence.mark_mine(cell)?;
        }
        Ok(())
    }

    fn record_safe(&mut self, cell: Cell) -> Result<(), KnowledgeError> {
        if self.mines.contains(&cell) {
            return Err(KnowledgeError::Contradiction(cell));
        }
        if !self.safes.insert(cell) {
            return Ok(());
        }
        for sentence in &mut self.knowledge {
            sentence.mark_safe(cell);
        }
        Ok(())
    }

    /// Accounts for already known cells, then stores the sentence unless it is
    /// vacuous or already known.
    fn insert_sentence(&mut self, mut sentence: Sentence) -> Result<(), KnowledgeError> {
        for &mine in &self.mines {
            sentence.mark_mine(mine)?;
        }
        for &safe in &self.safes {
            sentence.mark_safe(safe);
        }
        sentence.check_consistent()?;

        if !sentence.is_empty() && !self.knowledge.contains(&sentence) {
            self.knowledge.push(sentence);
        }
        Ok(())
    }

    /// Alternates between applying known facts and one generation of subset
    /// resolution until neither produces anything new.
    fn infer(&mut self) -> Result<(), KnowledgeError> {
        loop {
            let learned_facts = self.check_knowledge()?;
            let learned_sentences = self.resolve_subsets()?;
            if !learned_facts && !learned_sentences {
                return Ok(());
            }
        }
    }

    /// Marks every cell some sentence proves to be a mine or safe, with full
    /// propagation, until no sentence proves anything more. Then discards
    /// vacuous and duplicate sentences.
    fn check_knowledge(&mut self) -> Result<bool, KnowledgeError> {
        let mut learned = false;
        loop {
            let mut mines = HashSet::new();
            let mut safes = HashSet::new();
            for sentence in &self.knowledge {
                sentence.check_consistent()?;
                mines.extend(sentence.known_mines());
                safes.extend(sentence.known_safes());
            }
            if mines.is_empty() && safes.is_empty() {
                break;
            }

            for cell in mines {
                self.record_mine(cell)?;
            }
            for cell in safes {
                self.record_safe(cell)?;
            }
            learned = true;
        }

        let mut seen = HashSet::new();
        self.knowledge.retain(|sentence| !sentence.is_empty() && seen.insert(sentence.clone()));
        Ok(learned)
    }

    /// For every ordered pair where one sentence's cells are a strict subset of
    /// the other's, infers a sentence over the difference. Returns whether any
    /// sentence not already known was added.
    fn resolve_subsets(&mut self) -> Result<bool, KnowledgeError> {
        let inferred = {
            let known: HashSet<&Sentence> = self.knowledge.iter().collect();
            let mut inferred = HashSet::new();
            for (subset, superset) in self.knowledge.iter().cartesian_product(&self.knowledge) {
                if subset.cells() == superset.cells() {
                    if subset.count() != superset.count() {
                        return Err(KnowledgeError::Inconsistent(format!(
                            "{subset} and {superset} disagree"
                        )));
                    }
                    continue;
                }
                if subset.is_subset(superset) {
                    let sentence = superset.subtract(subset)?;
                    if !known.contains(&sentence) {
                        inferred.insert(sentence);
                    }
                }
            }
            inferred
        };

        let learned = !inferred.is_empty();
        self.knowledge.extend(inferred);
        Ok(learned)
    }
}
