/// When the knowledge base runs its resolution fixed point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Resolution {
    /// Resolve after every recorded clue, so forced moves are known as soon
    /// as possible.
    #[default]
    Eager,
    /// Only resolve when a move is requested and no certain move is pending.
    /// Sentences may hold stale cells between clues.
    Lazy,
}

/// Settings fixed for the lifetime of a knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SolverConfig {
    pub resolution: Resolution,
    /// Total number of mines on the board, when the player is told.
    pub total_mines: Option<usize>,
    /// Start with a sentence covering the whole board with `total_mines`.
    /// Without it the total only bounds guesses outside every sentence.
    pub seed_board_sentence: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            resolution: Resolution::Eager,
            total_mines: None,
            seed_board_sentence: true,
        }
    }
}

impl SolverConfig {
    pub fn with_total_mines(mut self, total_mines: usize) -> Self {
        self.total_mines = Some(total_mines);
        self
    }

    pub fn without_board_sentence(mut self) -> Self {
        self.seed_board_sentence = false;
        self
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }
}
