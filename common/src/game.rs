use std::collections::{BTreeSet, HashSet, VecDeque};

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::{Board, Point};

/// What the player sees in a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Tile {
    Hidden,
    Flagged,
    Revealed(u8), // The u8 is the number of adjacent mines.
}

/// Represents the current state of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

/// The minefield: where the mines are and what the player has uncovered.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Game {
    pub board: Board,
    mines: BTreeSet<Point>,
    /// Visible state, indexed `[row][col]`.
    pub tiles: Vec<Vec<Tile>>,
    pub game_state: GameState,
}

impl Game {
    /// Places `total_mines` at random.
    ///
    /// `start` and, when the board has room, its neighbors are kept clear so
    /// the first reveal never loses.
    pub fn new<R: Rng + ?Sized>(
        board: Board,
        total_mines: usize,
        start: Option<Point>,
        rng: &mut R,
    ) -> anyhow::Result<Self> {
        if total_mines >= board.area() {
            anyhow::bail!("total mines must be less than the number of cells on the board");
        }

        let mut clear = HashSet::new();
        if let Some(start) = start {
            if !board.contains(start) {
                anyhow::bail!("start {start} is off the board");
            }
            clear.insert(start);
            let around: Vec<Point> = board.neighbors(start).collect();
            if board.area() - 1 - around.len() >= total_mines {
                clear.extend(around);
            }
        }

        let candidates: Vec<Point> = board.cells().filter(|cell| !clear.contains(cell)).collect();
        let mines = candidates.choose_multiple(rng, total_mines).copied();
        Self::with_mines(board, mines)
    }

    /// Builds a game over a fixed mine layout.
    pub fn with_mines(board: Board, mines: impl IntoIterator<Item = Point>) -> anyhow::Result<Self> {
        let mines: BTreeSet<Point> = mines.into_iter().collect();
        if let Some(outside) = mines.iter().find(|mine| !board.contains(**mine)) {
            anyhow::bail!("mine {outside} is off the board");
        }

        Ok(Game {
            board,
            mines,
            tiles: vec![vec![Tile::Hidden; board.width]; board.height],
            game_state: GameState::Playing,
        })
    }

    /// Deserializes a game from bytes.
    pub fn deserialize(bts: &[u8]) -> anyhow::Result<Self> {
        Ok(bcs::from_bytes(bts)?)
    }

    /// Serializes the game to bytes.
    pub fn serialize(&self) -> anyhow::Result<Vec<u8>> {
        Ok(bcs::to_bytes(self)?)
    }

    pub fn total_mines(&self) -> usize {
        self.mines.len()
    }

    pub fn is_mine(&self, point: Point) -> bool {
        self.mines.contains(&point)
    }

    /// Number of mines adjacent to `point`, not counting the point itself.
    pub fn clue_count(&self, point: Point) -> u8 {
        self.board
            .neighbors(point)
            .filter(|neighbor| self.mines.contains(neighbor))
            .count() as u8
    }

    pub fn tile(&self, point: Point) -> Tile {
        self.tiles[point.row][point.col]
    }

    /// Reveals a cell, cascading through zeros.
    ///
    /// Returns every newly revealed cell with its clue. Hitting a mine loses
    /// the game and reveals nothing; flagged or revealed cells are left alone.
    pub fn reveal_cell(&mut self, at: Point) -> anyhow::Result<Vec<(Point, u8)>> {
        self.ensure_playable(at)?;

        if self.tile(at) != Tile::Hidden {
            return Ok(Vec::new());
        }
        if self.is_mine(at) {
            self.game_state = GameState::Lost;
            return Ok(Vec::new());
        }

        let revealed = self.flood_fill_reveal(at);

        if self.check_win_condition() {
            self.game_state = GameState::Won;
        }
        Ok(revealed)
    }

    /// Flags a hidden cell or unflags a flagged one.
    /// Returns whether the cell is flagged afterwards.
    pub fn toggle_flag(&mut self, at: Point) -> anyhow::Result<bool> {
        self.ensure_playable(at)?;

        let flagged = match self.tile(at) {
            Tile::Hidden => {
                self.tiles[at.row][at.col] = Tile::Flagged;
                true
            }
            Tile::Flagged => {
                self.tiles[at.row][at.col] = Tile::Hidden;
                false
            }
            Tile::Revealed(_) => anyhow::bail!("cannot flag revealed cell {at}"),
        };

        if self.check_win_condition() {
            self.game_state = GameState::Won;
        }
        Ok(flagged)
    }

    /// Won once the flags sit exactly on the mines, or every safe cell is
    /// revealed.
    pub fn check_win_condition(&self) -> bool {
        let mut flagged = BTreeSet::new();
        let mut revealed = 0;
        for point in self.board.cells() {
            match self.tile(point) {
                Tile::Flagged => {
                    flagged.insert(point);
                }
                Tile::Revealed(_) => revealed += 1,
                Tile::Hidden => {}
            }
        }

        flagged == self.mines || revealed == self.board.area() - self.mines.len()
    }

    fn ensure_playable(&self, at: Point) -> anyhow::Result<()> {
        if self.game_state != GameState::Playing {
            anyhow::bail!("game_ended");
        }
        if !self.board.contains(at) {
            anyhow::bail!("cell {at} is off the board");
        }
        Ok(())
    }

    /// Performs flood fill reveal for cells with 0 adjacent mines.
    fn flood_fill_reveal(&mut self, start_point: Point) -> Vec<(Point, u8)> {
        let mut revealed_points = Vec::new();
        let mut queue = VecDeque::from([start_point]);
        let mut visited = HashSet::from([start_point]);

        while let Some(point) = queue.pop_front() {
            // Only process hidden cells
            if self.tile(point) != Tile::Hidden {
                continue;
            }

            let mine_count = self.clue_count(point);
            self.tiles[point.row][point.col] = Tile::Revealed(mine_count);
            revealed_points.push((point, mine_count));

            // If it's a 0, add its neighbors to the queue
            if mine_count == 0 {
                for neighbor in self.board.neighbors(point) {
                    if !visited.contains(&neighbor) && self.tile(neighbor) == Tile::Hidden {
                        queue.push_back(neighbor);
                        visited.insert(neighbor);
                    }
                }
            }
        }

        revealed_points
    }
}
