use std::collections::BTreeSet;

use itertools::Itertools;
use rand::Rng;
use rand::seq::{IndexedRandom, IteratorRandom};

use crate::error::Result;
use crate::{KnowledgeBase, Point, Sentence};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Action {
    Flag,
    Reveal,
}

/// The engine's answer to "what next?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Move {
    pub cell: Point,
    pub action: Action,
    /// False for probabilistic guesses.
    pub certain: bool,
}

impl Move {
    fn flag(cell: Point) -> Self {
        Move {
            cell,
            action: Action::Flag,
            certain: true,
        }
    }

    fn reveal(cell: Point, certain: bool) -> Self {
        Move {
            cell,
            action: Action::Reveal,
            certain,
        }
    }

    pub fn is_flag(&self) -> bool {
        self.action == Action::Flag
    }
}

impl KnowledgeBase {
    /// Picks the next move: flag a known mine, reveal a known safe cell,
    /// resolve once more and retry those two, and finally guess the cell
    /// least likely to be a mine.
    ///
    /// Returns `None` once every cell is revealed, known to be a mine or
    /// flagged.
    pub fn next_move<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Option<Move>> {
        self.ensure_consistent()?;

        if let Some(certain) = self.certain_move() {
            return Ok(Some(certain));
        }

        // Exactly one deeper pass before falling back to a guess.
        self.resolve()?;
        if let Some(certain) = self.certain_move() {
            return Ok(Some(certain));
        }

        Ok(self.guess(rng))
    }

    fn certain_move(&self) -> Option<Move> {
        if let Some(&mine) = self.known_mines.difference(&self.flags_placed).next() {
            return Some(Move::flag(mine));
        }

        self.known_safes
            .iter()
            .find(|cell| !self.clues.contains_key(*cell))
            .map(|&cell| Move::reveal(cell, true))
    }

    /// Reveals a random cell of the sentence with the lowest mine
    /// probability. Cells outside every sentence compete only when the total
    /// mine count is known.
    fn guess<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Move> {
        let pool = self.guess_pool();
        if pool.is_empty() {
            return None;
        }

        let outside = self.outside_sentence(&pool);
        let candidates = self
            .sentences
            .iter()
            .filter(|sentence| !sentence.is_empty() && !sentence.cells().is_disjoint(&pool))
            .chain(outside.as_ref())
            .min_set_by(|a, b| a.mine_probability().total_cmp(&b.mine_probability()));

        // Flagged cells keep their sentence in the running but are never drawn.
        let cell = match candidates.choose(rng) {
            Some(sentence) if sentence.cells().is_subset(&pool) => sentence.random_cell(rng)?,
            Some(sentence) => sentence.cells().intersection(&pool).copied().choose(rng)?,
            None => pool.iter().copied().choose(rng)?,
        };
        Some(Move::reveal(cell, false))
    }

    /// Cells that may still be revealed. Flags are respected unless they
    /// cover every such cell.
    fn guess_pool(&self) -> BTreeSet<Point> {
        let open: BTreeSet<Point> = self
            .board
            .cells()
            .filter(|cell| !self.clues.contains_key(cell) && !self.known_mines.contains(cell))
            .collect();

        let unflagged: BTreeSet<Point> = open.difference(&self.flags_placed).copied().collect();
        if unflagged.is_empty() { open } else { unflagged }
    }

    /// A sentence over the pool cells no live sentence mentions, with the
    /// mines not accounted for elsewhere.
    ///
    /// Mines inside sentences are estimated from a greedy family of disjoint
    /// sentences, so the count is an upper bound.
    fn outside_sentence(&self, pool: &BTreeSet<Point>) -> Option<Sentence> {
        let total = self.config.total_mines?;

        let covered: BTreeSet<Point> = self
            .sentences
            .iter()
            .flat_map(|sentence| sentence.cells().iter().copied())
            .collect();
        let uncovered: BTreeSet<Point> = pool.difference(&covered).copied().collect();
        if uncovered.is_empty() {
            return None;
        }

        let mut claimed = BTreeSet::new();
        let mut inside = 0;
        for sentence in &self.sentences {
            if sentence.cells().is_disjoint(&claimed) {
                claimed.extend(sentence.cells());
                inside += sentence.count();
            }
        }

        let remaining = total
            .saturating_sub(self.known_mines.len() + inside)
            .min(uncovered.len());
        Sentence::new(uncovered, remaining).ok()
    }
}
