use rand::Rng;

use crate::{Action, Board, Game, GameState, KnowledgeBase, Move, Point, SolverConfig, Tile};

/// One game played with the deduction engine watching.
///
/// Every clue the game reveals is fed to the knowledge base, and every flag
/// toggled on the game is mirrored there.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Session {
    pub game: Game,
    pub ai: KnowledgeBase,
}

impl Session {
    /// Creates a game with `total_mines` mines and reveals `start`, which is
    /// always safe.
    pub fn new<R: Rng + ?Sized>(
        board: Board,
        total_mines: usize,
        config: SolverConfig,
        start: Point,
        rng: &mut R,
    ) -> anyhow::Result<Self> {
        let game = Game::new(board, total_mines, Some(start), rng)?;
        let ai = KnowledgeBase::with_config(board, config)?;

        let mut session = Session { game, ai };
        session.reveal(start)?;
        Ok(session)
    }

    /// Starts watching an existing game.
    pub fn from_game(game: Game, config: SolverConfig) -> anyhow::Result<Self> {
        let ai = KnowledgeBase::with_config(game.board, config)?;
        let mut session = Session { game, ai };
        for point in session.game.board.cells() {
            match session.game.tile(point) {
                Tile::Revealed(clue) => session.ai.record_clue(point, clue as usize)?,
                Tile::Flagged => session.ai.flag_placed(point)?,
                Tile::Hidden => {}
            }
        }
        Ok(session)
    }

    /// Deserializes a session from bytes.
    pub fn deserialize(bts: &[u8]) -> anyhow::Result<Self> {
        Ok(bcs::from_bytes(bts)?)
    }

    /// Serializes the session to bytes.
    pub fn serialize(&self) -> anyhow::Result<Vec<u8>> {
        Ok(bcs::to_bytes(self)?)
    }

    /// Reveals a cell, lifting a flag on it first.
    /// Returns false if a mine was hit.
    pub fn reveal(&mut self, at: Point) -> anyhow::Result<bool> {
        if !self.game.board.contains(at) {
            anyhow::bail!("cell {at} is off the board");
        }
        if self.game.tile(at) == Tile::Flagged {
            self.toggle_flag(at)?;
        }

        for (point, clue) in self.game.reveal_cell(at)? {
            self.ai.record_clue(point, clue as usize)?;
        }
        Ok(self.game.game_state != GameState::Lost)
    }

    pub fn toggle_flag(&mut self, at: Point) -> anyhow::Result<()> {
        if self.game.toggle_flag(at)? {
            self.ai.flag_placed(at)?;
        } else {
            self.ai.flag_removed(at)?;
        }
        Ok(())
    }

    /// The move the engine would make next, without making it.
    pub fn hint<R: Rng + ?Sized>(&mut self, rng: &mut R) -> anyhow::Result<Option<Move>> {
        Ok(self.ai.next_move(rng)?)
    }

    /// Asks the engine for a move and plays it.
    /// Returns the move made, or `None` once the game is over or the engine
    /// has nothing left to do.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> anyhow::Result<Option<Move>> {
        if self.game.game_state != GameState::Playing {
            return Ok(None);
        }

        let Some(next) = self.ai.next_move(rng)? else {
            return Ok(None);
        };

        match next.action {
            Action::Flag => {
                if self.game.tile(next.cell) != Tile::Flagged {
                    self.toggle_flag(next.cell)?;
                }
            }
            Action::Reveal => {
                self.reveal(next.cell)?;
            }
        }
        Ok(Some(next))
    }
}
