use crate::cell::Cell;
use std::fmt;

/// Failures raised by the knowledge base.
///
/// Running out of moves is not an error; the move queries return `None` for that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnowledgeError {
    /// An observation was made for a cell outside the board.
    OutOfBounds(Cell),
    /// `add_knowledge` was called twice for the same cell.
    DuplicateObservation(Cell),
    /// A cell would be both a known mine and a known safe cell.
    Contradiction(Cell),
    /// The recorded constraints can no longer all hold at once.
    Inconsistent(String),
}

impl fmt::Display for KnowledgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnowledgeError::OutOfBounds(cell) => write!(f, "cell {cell} is outside the board"),
            KnowledgeError::DuplicateObservation(cell) => {
                write!(f, "cell {cell} has already been observed")
            }
            KnowledgeError::Contradiction(cell) => {
                write!(f, "cell {cell} cannot be both safe and a mine")
            }
            KnowledgeError::Inconsistent(what) => write!(f, "inconsistent knowledge: {what}"),
        }
    }
}

impl std::error::Error for KnowledgeError {}
