//! Short-term memory for tabu search: the tenure grid and the elite-move cache.

use crate::moves::TwoOptMove;

/// Remaining tabu tenure for every position pair of an `n`-city tour.
#[derive(Debug, Clone)]
pub struct TabuList {
    n: usize,
    tenure: Vec<usize>,
}

impl TabuList {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            tenure: vec![0; n * n],
        }
    }

    #[inline]
    fn slot(&self, mv: TwoOptMove) -> usize {
        mv.i * self.n + mv.j
    }

    /// Remaining tenure of `mv`.
    #[inline]
    pub fn get(&self, mv: TwoOptMove) -> usize {
        self.tenure[self.slot(mv)]
    }

    #[inline]
    pub fn is_tabu(&self, mv: TwoOptMove) -> bool {
        self.get(mv) > 0
    }

    /// Forbids `mv` for the next `tenure` decrements.
    pub fn set(&mut self, mv: TwoOptMove, tenure: usize) {
        let slot = self.slot(mv);
        self.tenure[slot] = tenure;
    }

    /// Decrements the tenure of `mv` if it is positive.
    #[inline]
    pub fn decrement(&mut self, mv: TwoOptMove) {
        let slot = self.slot(mv);
        self.tenure[slot] = self.tenure[slot].saturating_sub(1);
    }

    /// Decrements every positive tenure.
    pub fn decrement_all(&mut self) {
        for t in &mut self.tenure {
            *t = t.saturating_sub(1);
        }
    }
}

/// A move with its delta against the current tour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMove {
    pub mv: TwoOptMove,
    pub delta: f64,
}

/// Bounded list of the most improving moves, ascending by delta.
///
/// Ties keep the order in which moves were supplied.
#[derive(Debug, Clone)]
pub struct EliteMoveCache {
    capacity: usize,
    moves: Vec<ScoredMove>,
}

impl EliteMoveCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            moves: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoredMove> {
        self.moves.iter()
    }

    /// Smallest cached delta.
    pub fn best_delta(&self) -> Option<f64> {
        self.moves.first().map(|m| m.delta)
    }

    /// Replaces the contents with the `capacity` best of `candidates`.
    pub fn rebuild<I: IntoIterator<Item = ScoredMove>>(&mut self, candidates: I) {
        self.moves.clear();
        self.moves.extend(candidates);
        self.sort();
        self.moves.truncate(self.capacity);
    }

    /// Recomputes every cached delta with `score` and re-sorts.
    ///
    /// Returns the number of moves re-scored.
    pub fn rescore<F: FnMut(TwoOptMove) -> f64>(&mut self, mut score: F) -> usize {
        for entry in &mut self.moves {
            entry.delta = score(entry.mv);
        }
        self.sort();
        self.moves.len()
    }

    /// Removes and returns the entry at `index`, keeping the order of the rest.
    pub fn remove(&mut self, index: usize) -> ScoredMove {
        self.moves.remove(index)
    }

    fn sort(&mut self) {
        self.moves.sort_by(|a, b| a.delta.total_cmp(&b.delta));
    }
}
