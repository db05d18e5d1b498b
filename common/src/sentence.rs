use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;
use rand::Rng;
use rand::seq::IteratorRandom;

use crate::{Contradiction, Point};

/// A constraint on the board: exactly `count` of `cells` are mines.
///
/// Equality and hashing cover both the cells and the count, so two sentences
/// over the same cells with different counts never collapse into one.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct Sentence {
    cells: BTreeSet<Point>,
    count: usize,
}

impl Sentence {
    /// Builds a sentence, rejecting counts that cannot fit in `cells`.
    pub fn new(
        cells: impl IntoIterator<Item = Point>,
        count: usize,
    ) -> Result<Self, Contradiction> {
        let sentence = Sentence {
            cells: cells.into_iter().collect(),
            count,
        };
        sentence.check()?;
        Ok(sentence)
    }

    pub fn cells(&self) -> &BTreeSet<Point> {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A sentence without cells carries no information and is dropped by the
    /// knowledge base.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: &Point) -> bool {
        self.cells.contains(cell)
    }

    /// All cells if every one of them must be a mine, otherwise nothing.
    pub fn implied_mines(&self) -> BTreeSet<Point> {
        if self.cells.len() == self.count {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// All cells if none of them can be a mine, otherwise nothing.
    pub fn implied_safes(&self) -> BTreeSet<Point> {
        if self.count == 0 {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// Drops every cell known to be a mine, lowering the count for each one.
    /// Returns whether anything changed.
    pub fn remove_known_mines(&mut self, mines: &BTreeSet<Point>) -> Result<bool, Contradiction> {
        let before = self.cells.len();
        self.cells.retain(|cell| !mines.contains(cell));
        let removed = before - self.cells.len();
        self.count = self
            .count
            .checked_sub(removed)
            .ok_or(Contradiction::NegativeCount)?;
        self.check()?;
        Ok(removed > 0)
    }

    /// Drops every cell known to be safe. The count is unchanged.
    /// Returns whether anything changed.
    pub fn remove_known_safes(&mut self, safes: &BTreeSet<Point>) -> Result<bool, Contradiction> {
        let before = self.cells.len();
        self.cells.retain(|cell| !safes.contains(cell));
        self.check()?;
        Ok(before != self.cells.len())
    }

    pub fn is_resolved(&self) -> bool {
        self.count == 0 || self.count == self.cells.len()
    }

    pub fn is_subset_of(&self, other: &Sentence) -> bool {
        self.cells.is_subset(&other.cells)
    }

    /// Removes `subset` from `self`: if 2 of {A,B,C} are mines and 1 of {A,B}
    /// is, then 1 of {C} is.
    ///
    /// `subset` must be a subset of `self`.
    pub fn subtract(&self, subset: &Sentence) -> Result<Sentence, Contradiction> {
        debug_assert!(subset.is_subset_of(self));

        let count = self
            .count
            .checked_sub(subset.count)
            .ok_or(Contradiction::NegativeCount)?;
        Sentence::new(self.cells.difference(&subset.cells).copied(), count)
    }

    /// Fraction of the cells that are mines. An empty sentence counts as
    /// certainly unsafe, though asking is a caller bug.
    pub fn mine_probability(&self) -> f64 {
        debug_assert!(!self.is_empty(), "mine probability of an empty sentence");
        if self.cells.is_empty() {
            return 1.0;
        }
        self.count as f64 / self.cells.len() as f64
    }

    /// A uniformly chosen cell, or `None` for an empty sentence.
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Point> {
        self.cells.iter().copied().choose(rng)
    }

    fn check(&self) -> Result<(), Contradiction> {
        if self.count > self.cells.len() {
            return Err(Contradiction::Overfull {
                count: self.count,
                cells: self.cells.len(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}} = {}", self.cells.iter().join(", "), self.count)
    }
}
