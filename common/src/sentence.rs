use crate::cell::Cell;
use crate::error::KnowledgeError;
use itertools::Itertools;
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// A logical statement about the board: exactly `count` of `cells` are mines.
///
/// Cells are kept sorted so that two sentences compare and hash by value,
/// which is what deduplication in the knowledge base relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Sentence {
    cells: BTreeSet<Cell>,
    count: usize,
}

impl Sentence {
    pub fn new(cells: impl IntoIterator<Item = Cell>, count: usize) -> Self {
        Sentence {
            cells: cells.into_iter().collect(),
            count,
        }
    }

    pub fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// A sentence over no cells says nothing.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Every remaining cell is a mine when the count covers all of them.
    pub fn known_mines(&self) -> HashSet<Cell> {
        if !self.cells.is_empty() && self.count == self.cells.len() {
            self.cells.iter().copied().collect()
        } else {
            HashSet::new()
        }
    }

    /// Every remaining cell is safe when no mines are left to place.
    pub fn known_safes(&self) -> HashSet<Cell> {
        if self.count == 0 {
            self.cells.iter().copied().collect()
        } else {
            HashSet::new()
        }
    }

    /// Removes a cell now known to be a mine, accounting for it in the count.
    /// Returns whether the sentence changed.
    pub fn mark_mine(&mut self, cell: Cell) -> Result<bool, KnowledgeError> {
        if !self.cells.contains(&cell) {
            return Ok(false);
        }
        if self.count == 0 {
            return Err(KnowledgeError::Inconsistent(format!(
                "{self} cannot contain the mine at {cell}"
            )));
        }
        self.cells.remove(&cell);
        self.count -= 1;
        Ok(true)
    }

    /// Removes a cell now known to be safe. The count is unchanged.
    /// Returns whether the sentence changed.
    pub fn mark_safe(&mut self, cell: Cell) -> bool {
        self.cells.remove(&cell)
    }

    pub fn is_subset(&self, other: &Sentence) -> bool {
        self.cells.is_subset(&other.cells)
    }

    /// Subset elimination: if `subset` lies inside `self`, the cells only in
    /// `self` hold exactly `self.count - subset.count` mines.
    pub fn subtract(&self, subset: &Sentence) -> Result<Sentence, KnowledgeError> {
        debug_assert!(subset.is_subset(self));
        let count = self.count.checked_sub(subset.count).ok_or_else(|| {
            KnowledgeError::Inconsistent(format!("{subset} holds more mines than {self}"))
        })?;
        Ok(Sentence {
            cells: self.cells.difference(&subset.cells).copied().collect(),
            count,
        })
    }

    pub fn check_consistent(&self) -> Result<(), KnowledgeError> {
        if self.count > self.cells.len() {
            return Err(KnowledgeError::Inconsistent(format!(
                "{self} needs more mines than it has cells"
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}} = {}", self.cells.iter().join(", "), self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(coords: &[(usize, usize)]) -> Vec<Cell> {
        coords.iter().map(|&c| Cell::from(c)).collect()
    }

    #[test]
    fn test_known_mines_when_count_covers_all_cells() {
        let sentence = Sentence::new(cells(&[(0, 0), (0, 1)]), 2);
        assert_eq!(sentence.known_mines().len(), 2);
        assert!(sentence.known_safes().is_empty());
    }

    #[test]
    fn test_known_safes_when_count_is_zero() {
        let sentence = Sentence::new(cells(&[(0, 0), (0, 1), (1, 1)]), 0);
        assert_eq!(sentence.known_safes().len(), 3);
        assert!(sentence.known_mines().is_empty());
    }

    #[test]
    fn test_undetermined_sentence_knows_nothing() {
        let sentence = Sentence::new(cells(&[(0, 0), (0, 1), (1, 1)]), 1);
        assert!(sentence.known_mines().is_empty());
        assert!(sentence.known_safes().is_empty());
    }

    #[test]
    fn test_empty_sentence_knows_nothing() {
        let sentence = Sentence::new(Vec::new(), 0);
        assert!(sentence.is_empty());
        assert!(sentence.known_mines().is_empty());
        assert!(sentence.known_safes().is_empty());
    }

    #[test]
    fn test_known_sets_are_exclusive_for_well_formed_sentences() {
        let pool = cells(&[(0, 0), (0, 1), (0, 2), (1, 0)]);
        for len in 1..=pool.len() {
            for count in 0..=len {
                let sentence = Sentence::new(pool[..len].to_vec(), count);
                assert!(
                    sentence.known_mines().is_empty() || sentence.known_safes().is_empty(),
                    "{sentence}"
                );
            }
        }
    }

    #[test]
    fn test_mark_mine_decrements_count() {
        let mut sentence = Sentence::new(cells(&[(0, 0), (0, 1)]), 1);
        assert!(sentence.mark_mine(Cell::new(0, 0)).unwrap());
        assert_eq!(sentence.count(), 0);
        assert_eq!(sentence.cells().len(), 1);
        assert_eq!(sentence.known_safes(), HashSet::from([Cell::new(0, 1)]));
    }

    #[test]
    fn test_mark_absent_cell_is_noop() {
        let mut sentence = Sentence::new(cells(&[(0, 0), (0, 1)]), 1);
        let before = sentence.clone();
        assert!(!sentence.mark_mine(Cell::new(5, 5)).unwrap());
        assert!(!sentence.mark_safe(Cell::new(5, 5)));
        assert_eq!(sentence, before);
    }

    #[test]
    fn test_mark_mine_then_safe_same_cell() {
        let mut sentence = Sentence::new(cells(&[(0, 0), (0, 1)]), 1);
        sentence.mark_mine(Cell::new(0, 0)).unwrap();
        let after_mine = sentence.clone();
        assert!(!sentence.mark_safe(Cell::new(0, 0)));
        assert_eq!(sentence, after_mine);
    }

    #[test]
    fn test_mark_safe_keeps_count() {
        let mut sentence = Sentence::new(cells(&[(0, 0), (0, 1), (0, 2)]), 2);
        assert!(sentence.mark_safe(Cell::new(0, 2)));
        assert_eq!(sentence.count(), 2);
        assert_eq!(sentence.known_mines().len(), 2);
    }

    #[test]
    fn test_mark_mine_on_zero_count_is_inconsistent() {
        let mut sentence = Sentence::new(cells(&[(0, 0), (0, 1)]), 0);
        let result = sentence.mark_mine(Cell::new(0, 0));
        assert!(matches!(result, Err(KnowledgeError::Inconsistent(_))));
        // The sentence is left untouched
        assert_eq!(sentence.cells().len(), 2);
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let a = Sentence::new(cells(&[(0, 0), (0, 1), (1, 1)]), 1);
        let b = Sentence::new(cells(&[(1, 1), (0, 0), (0, 1)]), 1);
        let c = Sentence::new(cells(&[(1, 1), (0, 0), (0, 1)]), 2);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(HashSet::from([a, b]).len(), 1);
    }

    #[test]
    fn test_subtract_subset() {
        let small = Sentence::new(cells(&[(0, 0), (0, 1)]), 1);
        let big = Sentence::new(cells(&[(0, 0), (0, 1), (0, 2)]), 2);
        assert!(small.is_subset(&big));
        assert!(!big.is_subset(&small));

        let inferred = big.subtract(&small).unwrap();
        assert_eq!(inferred, Sentence::new(cells(&[(0, 2)]), 1));
        assert_eq!(inferred.known_mines(), HashSet::from([Cell::new(0, 2)]));
    }

    #[test]
    fn test_subtract_underflow_is_inconsistent() {
        let small = Sentence::new(cells(&[(0, 0)]), 1);
        let big = Sentence::new(cells(&[(0, 0), (0, 1)]), 0);
        assert!(matches!(big.subtract(&small), Err(KnowledgeError::Inconsistent(_))));
    }

    #[test]
    fn test_check_consistent() {
        assert!(Sentence::new(cells(&[(0, 0)]), 1).check_consistent().is_ok());
        assert!(Sentence::new(cells(&[(0, 0)]), 2).check_consistent().is_err());
        assert!(Sentence::new(Vec::new(), 1).check_consistent().is_err());
    }

    #[test]
    fn test_display() {
        let sentence = Sentence::new(cells(&[(0, 1), (0, 0)]), 1);
        assert_eq!(sentence.to_string(), "{(0, 0), (0, 1)} = 1");
    }
}
