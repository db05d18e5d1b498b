use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::mem;

use itertools::Itertools;

use crate::error::{CellRejection, Contradiction, Result, SolverError};
use crate::{Board, Point, Resolution, Sentence, SolverConfig};

/// Which global set a group of cells is added to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fact {
    Safe,
    Mine,
}

/// Everything the player has learned about one game.
///
/// Holds the live sentences plus the cells known to be safe or mines. Known
/// cells only ever grow and are purged from every sentence once resolution
/// runs. A knowledge base is created per game and dropped on reset.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct KnowledgeBase {
    pub(crate) board: Board,
    pub(crate) config: SolverConfig,
    pub(crate) sentences: BTreeSet<Sentence>,
    pub(crate) known_safes: BTreeSet<Point>,
    pub(crate) known_mines: BTreeSet<Point>,
    /// Revealed cells and the clue recorded for each. The keys are the moves made.
    pub(crate) clues: BTreeMap<Point, usize>,
    pub(crate) flags_placed: BTreeSet<Point>,
    /// Set once the facts stop adding up. Every later query fails with it.
    contradiction: Option<Contradiction>,
}

impl KnowledgeBase {
    pub fn new(board: Board, total_mines: Option<usize>) -> Result<Self> {
        Self::with_config(
            board,
            SolverConfig {
                total_mines,
                ..SolverConfig::default()
            },
        )
    }

    pub fn with_config(board: Board, config: SolverConfig) -> Result<Self> {
        let mut knowledge = KnowledgeBase {
            board,
            config,
            sentences: BTreeSet::new(),
            known_safes: BTreeSet::new(),
            known_mines: BTreeSet::new(),
            clues: BTreeMap::new(),
            flags_placed: BTreeSet::new(),
            contradiction: None,
        };

        if let Some(mines) = config.total_mines {
            if mines > board.area() {
                return Err(SolverError::TooManyMines {
                    mines,
                    cells: board.area(),
                });
            }
            if config.seed_board_sentence {
                knowledge.admit(Sentence::new(board.cells(), mines)?)?;
                if config.resolution == Resolution::Eager {
                    knowledge.resolve()?;
                }
            }
        }

        Ok(knowledge)
    }

    /// Records that `cell` was revealed and `count` of its neighbors are mines.
    ///
    /// Re-reporting the same clue is a no-op; a different count for a cell
    /// already revealed is rejected before anything changes.
    pub fn record_clue(&mut self, cell: Point, count: usize) -> Result<()> {
        self.ensure_consistent()?;
        self.check_bounds(cell)?;

        if let Some(&recorded) = self.clues.get(&cell) {
            if recorded == count {
                return Ok(());
            }
            return Err(SolverError::InvalidCell {
                cell,
                reason: CellRejection::ConflictingClue {
                    recorded,
                    reported: count,
                },
            });
        }

        let outcome = self.fold_clue(cell, count);
        self.guard(outcome)?;

        if self.config.resolution == Resolution::Eager {
            self.resolve()?;
        }
        Ok(())
    }

    pub fn flag_placed(&mut self, cell: Point) -> Result<()> {
        self.check_bounds(cell)?;
        self.flags_placed.insert(cell);
        Ok(())
    }

    pub fn flag_removed(&mut self, cell: Point) -> Result<()> {
        self.check_bounds(cell)?;
        if !self.flags_placed.remove(&cell) {
            return Err(SolverError::NotFlagged(cell));
        }
        Ok(())
    }

    /// Runs unit propagation and subset reduction until neither changes
    /// anything.
    ///
    /// Either the fixed point is reached or the knowledge base is tainted
    /// with the contradiction that was found.
    pub fn resolve(&mut self) -> Result<()> {
        self.ensure_consistent()?;
        let outcome = self.settle(|_| {});
        self.guard(outcome)
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn config(&self) -> SolverConfig {
        self.config
    }

    pub fn sentences(&self) -> &BTreeSet<Sentence> {
        &self.sentences
    }

    pub fn known_safes(&self) -> &BTreeSet<Point> {
        &self.known_safes
    }

    pub fn known_mines(&self) -> &BTreeSet<Point> {
        &self.known_mines
    }

    pub fn flags_placed(&self) -> &BTreeSet<Point> {
        &self.flags_placed
    }

    pub fn moves_made(&self) -> impl Iterator<Item = Point> + '_ {
        self.clues.keys().copied()
    }

    pub fn is_move_made(&self, cell: Point) -> bool {
        self.clues.contains_key(&cell)
    }

    /// The clue recorded when `cell` was revealed.
    pub fn clue(&self, cell: Point) -> Option<usize> {
        self.clues.get(&cell).copied()
    }

    /// The first live sentence mentioning `cell`.
    pub fn sentence_containing(&self, cell: Point) -> Option<&Sentence> {
        self.sentences.iter().find(|sentence| sentence.contains(&cell))
    }

    pub fn is_tainted(&self) -> bool {
        self.contradiction.is_some()
    }

    /// One line describing the current state of knowledge.
    pub fn summary(&self) -> String {
        format!(
            "{} sentences, {} safe, {} mines, {} revealed, {} flagged",
            self.sentences.len(),
            self.known_safes.len(),
            self.known_mines.len(),
            self.clues.len(),
            self.flags_placed.len(),
        )
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bcs::to_bytes(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bcs::from_bytes(bytes)?)
    }

    pub(crate) fn ensure_consistent(&self) -> Result<()> {
        match &self.contradiction {
            Some(contradiction) => Err(SolverError::InternalInconsistency(contradiction.clone())),
            None => Ok(()),
        }
    }

    fn check_bounds(&self, cell: Point) -> Result<()> {
        if self.board.contains(cell) {
            return Ok(());
        }
        let (height, width) = self.board.dimensions();
        Err(SolverError::InvalidCell {
            cell,
            reason: CellRejection::OutOfBounds { height, width },
        })
    }

    /// Taints the knowledge base if `outcome` is a contradiction.
    fn guard<T>(&mut self, outcome: Result<T, Contradiction>) -> Result<T> {
        outcome.map_err(|contradiction| {
            self.contradiction = Some(contradiction.clone());
            SolverError::InternalInconsistency(contradiction)
        })
    }

    /// Builds the sentence for a new clue, then marks the cell as revealed.
    /// Nothing is mutated if the clue does not fit what is already known.
    fn fold_clue(&mut self, cell: Point, count: usize) -> Result<(), Contradiction> {
        if self.known_mines.contains(&cell) {
            return Err(Contradiction::ClueOnMine(cell));
        }

        let mut unknown = BTreeSet::new();
        let mut mines = 0;
        for neighbor in self.board.neighbors(cell) {
            if self.known_mines.contains(&neighbor) {
                mines += 1;
            } else if !self.known_safes.contains(&neighbor) {
                unknown.insert(neighbor);
            }
        }

        let remaining = count
            .checked_sub(mines)
            .ok_or(Contradiction::NegativeCount)?;
        let sentence = Sentence::new(unknown, remaining)?;

        self.clues.insert(cell, count);
        self.learn(&BTreeSet::from([cell]), Fact::Safe)?;
        self.admit(sentence)
    }

    /// Adds `cells` to the known safes or known mines.
    /// Returns whether the set grew.
    fn learn(&mut self, cells: &BTreeSet<Point>, fact: Fact) -> Result<bool, Contradiction> {
        let (known, opposite) = match fact {
            Fact::Safe => (&mut self.known_safes, &self.known_mines),
            Fact::Mine => (&mut self.known_mines, &self.known_safes),
        };

        let mut grew = false;
        for &cell in cells {
            if opposite.contains(&cell) {
                return Err(Contradiction::SafeAndMine(cell));
            }
            grew |= known.insert(cell);
        }
        Ok(grew)
    }

    /// Inserts a sentence, dropping empty sentences and duplicates.
    fn admit(&mut self, sentence: Sentence) -> Result<(), Contradiction> {
        if sentence.is_empty() {
            return Ok(());
        }

        if let Some(existing) = self
            .sentences
            .iter()
            .find(|existing| existing.cells() == sentence.cells())
        {
            if existing.count() != sentence.count() {
                return Err(Contradiction::ConflictingSentences(
                    existing.count(),
                    sentence.count(),
                ));
            }
            return Ok(());
        }

        self.sentences.insert(sentence);
        Ok(())
    }

    /// Alternates propagation and reduction until a full round changes
    /// nothing. `arrange` may reorder the sentences before each reduction.
    fn settle(&mut self, mut arrange: impl FnMut(&mut Vec<Sentence>)) -> Result<(), Contradiction> {
        loop {
            self.propagate()?;

            let mut sentences: Vec<Sentence> = mem::take(&mut self.sentences).into_iter().collect();
            arrange(&mut sentences);
            let reduced = reduce(&mut sentences);
            for sentence in sentences {
                self.admit(sentence)?;
            }

            if !reduced? {
                return Ok(());
            }
        }
    }

    /// Purges known cells from every sentence and absorbs resolved ones.
    ///
    /// Sentences already checked are queued again whenever the known sets
    /// grow, so none is left holding a cell whose status is known.
    fn propagate(&mut self) -> Result<(), Contradiction> {
        let mut pending: VecDeque<Sentence> = mem::take(&mut self.sentences).into_iter().collect();
        let mut checked = Vec::with_capacity(pending.len());

        while let Some(mut sentence) = pending.pop_front() {
            sentence.remove_known_safes(&self.known_safes)?;
            sentence.remove_known_mines(&self.known_mines)?;

            if !sentence.is_resolved() {
                checked.push(sentence);
                continue;
            }

            let safes = self.learn(&sentence.implied_safes(), Fact::Safe)?;
            let mines = self.learn(&sentence.implied_mines(), Fact::Mine)?;
            if safes || mines {
                pending.extend(checked.drain(..));
            }
        }

        for sentence in checked {
            self.admit(sentence)?;
        }
        Ok(())
    }
}

/// Shrinks every sentence that strictly contains another by subtracting the
/// smaller one, until no pair changes in a full pass.
/// Returns whether any sentence shrank.
fn reduce(sentences: &mut [Sentence]) -> Result<bool, Contradiction> {
    let mut reduced_any = false;

    loop {
        let mut reduced = false;

        for (i, j) in (0..sentences.len()).cartesian_product(0..sentences.len()) {
            if i == j || !sentences[i].is_subset_of(&sentences[j]) {
                continue;
            }
            if sentences[i].len() == sentences[j].len() {
                if sentences[i].count() != sentences[j].count() {
                    return Err(Contradiction::ConflictingSentences(
                        sentences[i].count(),
                        sentences[j].count(),
                    ));
                }
                continue;
            }

            let smaller = sentences[j].subtract(&sentences[i])?;
            sentences[j] = smaller;
            reduced = true;
        }

        if !reduced {
            return Ok(reduced_any);
        }
        reduced_any = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    fn p(row: usize, col: usize) -> Point {
        Point::new(row, col)
    }

    fn sentence(cells: &[(usize, usize)], count: usize) -> Sentence {
        Sentence::new(cells.iter().map(|&(r, c)| p(r, c)), count).unwrap()
    }

    fn clue(board: Board, mines: &BTreeSet<Point>, cell: Point) -> usize {
        board.neighbors(cell).filter(|n| mines.contains(n)).count()
    }

    #[test]
    fn test_single_clue_builds_sentence() {
        // One mine at (0,0) on a 3x3 board, clue 1 at the center
        let board = Board::new(3, 3);
        let mut kb = KnowledgeBase::new(board, None).unwrap();
        kb.record_clue(p(1, 1), 1).unwrap();

        let expected = Sentence::new(board.neighbors(p(1, 1)), 1).unwrap();
        assert_eq!(kb.sentences().iter().collect::<Vec<_>>(), vec![&expected]);
        assert_eq!(kb.known_safes(), &BTreeSet::from([p(1, 1)]));
        assert!(kb.known_mines().is_empty());
        assert!(kb.is_move_made(p(1, 1)));
    }

    #[test]
    fn test_zero_clue_cascades_to_neighbors() {
        let mut kb = KnowledgeBase::new(Board::new(3, 3), None).unwrap();
        kb.record_clue(p(0, 0), 0).unwrap();

        for cell in [p(0, 1), p(1, 0), p(1, 1)] {
            assert!(kb.known_safes().contains(&cell));
        }
        assert!(kb.sentences().is_empty());
    }

    #[test]
    fn test_known_cells_are_purged_from_new_clues() {
        // (0,1) is a mine on a 1x3 board; the clue at (0,2) only sees that mine
        let mut kb = KnowledgeBase::new(Board::new(1, 3), None).unwrap();
        kb.record_clue(p(0, 0), 1).unwrap();
        assert_eq!(kb.known_mines(), &BTreeSet::from([p(0, 1)]));

        kb.record_clue(p(0, 2), 1).unwrap();
        assert!(kb.sentences().is_empty());
        assert!(!kb.is_tainted());
    }

    #[test]
    fn test_subset_reduction_finds_mine() {
        // 2 of {A,B,C} and 1 of {A,B} leaves C a mine
        let mut kb = KnowledgeBase::new(Board::new(3, 3), None).unwrap();
        kb.admit(sentence(&[(0, 0), (0, 1), (0, 2)], 2)).unwrap();
        kb.admit(sentence(&[(0, 0), (0, 1)], 1)).unwrap();
        kb.resolve().unwrap();

        assert_eq!(kb.known_mines(), &BTreeSet::from([p(0, 2)]));
        assert_eq!(
            kb.sentences().iter().collect::<Vec<_>>(),
            vec![&sentence(&[(0, 0), (0, 1)], 1)]
        );
    }

    #[test]
    fn test_subset_reduction_finds_safe() {
        // 1 of {A,B} and 1 of {A,B,C} leaves C safe
        let mut kb = KnowledgeBase::new(Board::new(3, 3), None).unwrap();
        kb.admit(sentence(&[(1, 0), (1, 1)], 1)).unwrap();
        kb.admit(sentence(&[(1, 0), (1, 1), (1, 2)], 1)).unwrap();
        kb.resolve().unwrap();

        assert_eq!(kb.known_safes(), &BTreeSet::from([p(1, 2)]));
        assert!(kb.known_mines().is_empty());
    }

    #[test]
    fn test_reduction_chain_resolves_everything() {
        // Nested sentences collapse to singletons and every cell is decided
        let mut kb = KnowledgeBase::new(Board::new(1, 4), None).unwrap();
        kb.admit(sentence(&[(0, 0)], 1)).unwrap();
        kb.admit(sentence(&[(0, 0), (0, 1), (0, 2)], 1)).unwrap();
        kb.admit(sentence(&[(0, 0), (0, 1), (0, 2), (0, 3)], 2)).unwrap();
        kb.resolve().unwrap();

        assert_eq!(kb.known_mines(), &BTreeSet::from([p(0, 0), p(0, 3)]));
        assert_eq!(kb.known_safes(), &BTreeSet::from([p(0, 1), p(0, 2)]));
        assert!(kb.sentences().is_empty());
    }

    #[test]
    fn test_reduce_is_order_independent_for_nested_sentences() {
        let nested = vec![
            sentence(&[(0, 0), (0, 1)], 1),
            sentence(&[(0, 0), (0, 1), (0, 2), (0, 3)], 2),
            sentence(&[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (0, 5)], 3),
        ];

        let mut expected = nested.clone();
        reduce(&mut expected).unwrap();
        let expected: BTreeSet<_> = expected.into_iter().collect();

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let mut shuffled = nested.clone();
            shuffled.shuffle(&mut rng);
            reduce(&mut shuffled).unwrap();
            assert_eq!(shuffled.into_iter().collect::<BTreeSet<_>>(), expected);
        }
    }

    #[test]
    fn test_total_mines_completes_endgame() {
        // One mine on a 1x3 board: two safe cells pin it down
        let mut kb = KnowledgeBase::new(Board::new(1, 3), Some(1)).unwrap();
        kb.record_clue(p(0, 0), 0).unwrap();

        assert_eq!(kb.known_mines(), &BTreeSet::from([p(0, 2)]));
        assert!(kb.sentences().is_empty());
    }

    #[test]
    fn test_total_mines_seeds_board_sentence() {
        let board = Board::new(2, 3);
        let kb = KnowledgeBase::new(board, Some(2)).unwrap();
        assert_eq!(
            kb.sentences().iter().collect::<Vec<_>>(),
            vec![&Sentence::new(board.cells(), 2).unwrap()]
        );

        let empty = KnowledgeBase::new(board, Some(0)).unwrap();
        assert_eq!(empty.known_safes().len(), board.area());

        let full = KnowledgeBase::new(board, Some(6)).unwrap();
        assert_eq!(full.known_mines().len(), board.area());
    }

    #[test]
    fn test_too_many_mines() {
        let err = KnowledgeBase::new(Board::new(2, 2), Some(5)).unwrap_err();
        assert!(matches!(err, SolverError::TooManyMines { mines: 5, cells: 4 }));
    }

    #[test]
    fn test_out_of_bounds_clue_rejected() {
        let mut kb = KnowledgeBase::new(Board::new(3, 3), None).unwrap();
        let err = kb.record_clue(p(3, 0), 1).unwrap_err();
        assert!(matches!(
            err,
            SolverError::InvalidCell {
                reason: CellRejection::OutOfBounds { height: 3, width: 3 },
                ..
            }
        ));
        assert_eq!(kb.moves_made().count(), 0);
    }

    #[test]
    fn test_conflicting_clue_rejected_without_mutation() {
        let mut kb = KnowledgeBase::new(Board::new(3, 3), None).unwrap();
        kb.record_clue(p(1, 1), 2).unwrap();
        let before = kb.clone();

        // Same clue again is accepted and changes nothing
        kb.record_clue(p(1, 1), 2).unwrap();
        assert_eq!(kb, before);

        let err = kb.record_clue(p(1, 1), 3).unwrap_err();
        assert!(matches!(
            err,
            SolverError::InvalidCell {
                reason: CellRejection::ConflictingClue {
                    recorded: 2,
                    reported: 3
                },
                ..
            }
        ));
        assert_eq!(kb, before);
        assert!(!kb.is_tainted());
    }

    #[test]
    fn test_contradiction_taints_knowledge() {
        // (0,1) must be a mine, then a zero clue next to it cannot hold
        let mut kb = KnowledgeBase::new(Board::new(1, 3), None).unwrap();
        kb.record_clue(p(0, 0), 1).unwrap();

        let err = kb.record_clue(p(0, 2), 0).unwrap_err();
        assert!(matches!(
            err,
            SolverError::InternalInconsistency(Contradiction::NegativeCount)
        ));
        assert!(kb.is_tainted());

        // Every later call reports the same contradiction
        assert!(matches!(
            kb.resolve(),
            Err(SolverError::InternalInconsistency(Contradiction::NegativeCount))
        ));
        assert!(matches!(
            kb.record_clue(p(0, 1), 1),
            Err(SolverError::InternalInconsistency(_))
        ));
    }

    #[test]
    fn test_clue_on_known_mine() {
        let mut kb = KnowledgeBase::new(Board::new(1, 2), None).unwrap();
        kb.record_clue(p(0, 0), 1).unwrap();

        let err = kb.record_clue(p(0, 1), 1).unwrap_err();
        assert!(matches!(
            err,
            SolverError::InternalInconsistency(Contradiction::ClueOnMine(cell)) if cell == p(0, 1)
        ));
    }

    #[test]
    fn test_conflicting_sentences_surface() {
        let mut kb = KnowledgeBase::new(Board::new(3, 3), None).unwrap();
        kb.admit(sentence(&[(0, 0), (0, 1), (0, 2)], 1)).unwrap();
        assert_eq!(
            kb.admit(sentence(&[(0, 0), (0, 1), (0, 2)], 2)),
            Err(Contradiction::ConflictingSentences(1, 2))
        );

        // Identical sentences merge
        kb.admit(sentence(&[(0, 0), (0, 1), (0, 2)], 1)).unwrap();
        assert_eq!(kb.sentences().len(), 1);
    }

    #[test]
    fn test_flags() {
        let mut kb = KnowledgeBase::new(Board::new(2, 2), None).unwrap();
        kb.flag_placed(p(1, 1)).unwrap();
        assert!(kb.flags_placed().contains(&p(1, 1)));

        kb.flag_removed(p(1, 1)).unwrap();
        assert!(kb.flags_placed().is_empty());

        assert!(matches!(
            kb.flag_removed(p(1, 1)),
            Err(SolverError::NotFlagged(cell)) if cell == p(1, 1)
        ));
        assert!(matches!(
            kb.flag_placed(p(2, 0)),
            Err(SolverError::InvalidCell { .. })
        ));
    }

    #[test]
    fn test_lazy_resolution_defers_work() {
        let config = SolverConfig::default().with_resolution(Resolution::Lazy);
        let mut kb = KnowledgeBase::with_config(Board::new(3, 3), config).unwrap();
        kb.record_clue(p(0, 0), 0).unwrap();

        // The zero sentence waits until resolution is asked for
        assert_eq!(kb.known_safes(), &BTreeSet::from([p(0, 0)]));
        assert_eq!(kb.sentences().len(), 1);

        kb.resolve().unwrap();
        assert_eq!(kb.known_safes().len(), 4);
        assert!(kb.sentences().is_empty());
    }

    #[test]
    fn test_sentence_containing() {
        let mut kb = KnowledgeBase::new(Board::new(3, 3), None).unwrap();
        kb.record_clue(p(0, 0), 1).unwrap();
        assert!(kb.sentence_containing(p(1, 1)).is_some());
        assert!(kb.sentence_containing(p(2, 2)).is_none());
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut kb = KnowledgeBase::new(Board::new(4, 4), Some(3)).unwrap();
        kb.record_clue(p(0, 0), 1).unwrap();
        kb.flag_placed(p(3, 3)).unwrap();

        let restored = KnowledgeBase::from_bytes(&kb.to_bytes().unwrap()).unwrap();
        assert_eq!(restored, kb);
    }

    /// A random board, its mines and the order in which safe cells get revealed.
    fn scenario() -> impl Strategy<Value = (Board, BTreeSet<Point>, Vec<Point>, u64)> {
        (2usize..7, 2usize..7, 0u32..40, any::<u64>()).prop_map(|(height, width, density, seed)| {
            let board = Board::new(height, width);
            let mut rng = StdRng::seed_from_u64(seed);
            let mines: BTreeSet<Point> = board
                .cells()
                .filter(|_| rng.random_range(0..100) < density)
                .collect();
            let mut reveals: Vec<Point> = board.cells().filter(|c| !mines.contains(c)).collect();
            reveals.shuffle(&mut rng);
            (board, mines, reveals, seed)
        })
    }

    proptest! {
        #[test]
        fn prop_deductions_are_sound_in_any_order((board, mines, reveals, seed) in scenario()) {
            // Reduction order is shuffled before every pass
            let config = SolverConfig::default().with_resolution(Resolution::Lazy);
            let mut kb = KnowledgeBase::with_config(board, config).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);

            for cell in reveals {
                kb.record_clue(cell, clue(board, &mines, cell)).unwrap();
                kb.settle(|sentences| sentences.shuffle(&mut rng)).unwrap();

                prop_assert!(kb.known_mines().is_subset(&mines));
                prop_assert!(kb.known_safes().is_disjoint(&mines));
                for sentence in kb.sentences() {
                    prop_assert!(sentence.count() <= sentence.len());
                    let actual = sentence.cells().iter().filter(|c| mines.contains(*c)).count();
                    prop_assert_eq!(sentence.count(), actual);
                    prop_assert!(sentence.cells().is_disjoint(kb.known_safes()));
                    prop_assert!(sentence.cells().is_disjoint(kb.known_mines()));
                }
            }
        }

        #[test]
        fn prop_resolve_is_idempotent((board, mines, reveals, _seed) in scenario()) {
            let mut kb = KnowledgeBase::new(board, Some(mines.len())).unwrap();
            for cell in reveals.iter().take(reveals.len() / 2) {
                kb.record_clue(*cell, clue(board, &mines, *cell)).unwrap();
            }

            let once = kb.clone();
            kb.resolve().unwrap();
            prop_assert_eq!(kb, once);
        }
    }
}
