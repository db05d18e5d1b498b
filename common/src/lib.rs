mod config;
mod error;
mod game;
mod knowledge;
mod selector;
mod sentence;
mod session;

use std::fmt;

pub use config::{Resolution, SolverConfig};
pub use error::{CellRejection, Contradiction, Result, SolverError};
pub use game::{Game, GameState, Tile};
pub use knowledge::KnowledgeBase;
pub use selector::{Action, Move};
pub use sentence::Sentence;
pub use session::Session;

/// A coordinate on the minesweeper board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub const fn new(row: usize, col: usize) -> Self {
        Point { row, col }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Board geometry: dimensions and adjacency. Holds no mine information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Board {
    pub height: usize,
    pub width: usize,
}

impl Board {
    pub const fn new(height: usize, width: usize) -> Self {
        Board { height, width }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Number of cells on the board.
    pub fn area(&self) -> usize {
        self.height * self.width
    }

    pub fn contains(&self, point: Point) -> bool {
        point.row < self.height && point.col < self.width
    }

    /// Every cell of the board in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Point> + use<> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| Point { row, col }))
    }

    /// All in-bounds neighbors of `point`, excluding the point itself.
    /// Handles board edges and corners.
    pub fn neighbors(&self, point: Point) -> impl Iterator<Item = Point> + use<> {
        let width = self.width;
        let height = self.height;

        (-1..=1).flat_map(move |dr| {
            (-1..=1).filter_map(move |dc| {
                if dr == 0 && dc == 0 {
                    return None;
                }

                let row = point.row as isize + dr;
                let col = point.col as isize + dc;

                if row >= 0 && row < height as isize && col >= 0 && col < width as isize {
                    Some(Point {
                        row: row as usize,
                        col: col as usize,
                    })
                } else {
                    None
                }
            })
        })
    }
}
