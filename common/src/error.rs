use crate::Point;

/// Errors returned by the deduction engine.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// The caller referenced a cell the engine cannot accept. Nothing was mutated.
    #[error("invalid cell {cell}: {reason}")]
    InvalidCell { cell: Point, reason: CellRejection },

    /// The facts fed to the engine contradict each other. The knowledge base
    /// stays tainted for the rest of the session.
    #[error("knowledge base is inconsistent: {0}")]
    InternalInconsistency(Contradiction),

    #[error("cell {0} is not flagged")]
    NotFlagged(Point),

    #[error("{mines} mines do not fit on a board of {cells} cells")]
    TooManyMines { mines: usize, cells: usize },

    #[error("snapshot failed: {0}")]
    Snapshot(#[from] bcs::Error),
}

/// Why a cell was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CellRejection {
    #[error("outside the {height}x{width} board")]
    OutOfBounds { height: usize, width: usize },

    #[error("clue {reported} conflicts with previously recorded clue {recorded}")]
    ConflictingClue { recorded: usize, reported: usize },
}

/// A fact the engine derived or was given that cannot hold together with
/// what it already knows.
#[derive(
    Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, thiserror::Error,
)]
pub enum Contradiction {
    #[error("mine count of a sentence would drop below zero")]
    NegativeCount,

    #[error("sentence claims {count} mines among {cells} cells")]
    Overfull { count: usize, cells: usize },

    #[error("cell {0} is known to be both safe and a mine")]
    SafeAndMine(Point),

    #[error("two sentences over the same cells claim {0} and {1} mines")]
    ConflictingSentences(usize, usize),

    #[error("clue reported for known mine {0}")]
    ClueOnMine(Point),
}

impl From<Contradiction> for SolverError {
    fn from(contradiction: Contradiction) -> Self {
        SolverError::InternalInconsistency(contradiction)
    }
}

pub type Result<T, E = SolverError> = std::result::Result<T, E>;
