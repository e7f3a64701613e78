//! Rolling level history backing the scrolling graph.

use crate::meter::scale::MIN_DB;
use std::collections::VecDeque;

/// Number of readings kept for the graph
pub const HISTORY_LENGTH: usize = 600;

/// Fixed-length FIFO of recent levels, oldest first.
///
/// The length never changes: every push drops the oldest value.
#[derive(Debug, Clone)]
pub struct History {
    levels: VecDeque<f64>,
}

impl History {
    /// Create a history filled with the scale minimum
    pub fn new() -> Self {
        Self {
            levels: std::iter::repeat_n(MIN_DB, HISTORY_LENGTH).collect(),
        }
    }

    /// Append a level at the tail and evict the head
    pub fn push(&mut self, db: f64) {
        self.levels.pop_front();
        self.levels.push_back(db);
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Most recently pushed level
    #[cfg(test)]
    pub fn latest(&self) -> Option<f64> {
        self.levels.back().copied()
    }

    /// Iterate levels oldest → newest
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.levels.iter().copied()
    }

    /// Get statistics (min, max, avg) over the whole window
    pub fn stats(&self) -> (f64, f64, f64) {
        let sum: f64 = self.levels.iter().sum();
        let avg = sum / self.levels.len() as f64;
        let min = self.levels.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.levels.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (min, max, avg)
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_flat_at_minimum() {
        let history = History::new();
        assert_eq!(history.len(), HISTORY_LENGTH);
        assert!(history.iter().all(|v| v == MIN_DB));
    }

    #[test]
    fn test_length_is_constant() {
        let mut history = History::new();
        for i in 0..(HISTORY_LENGTH * 2 + 7) {
            history.push(i as f64);
            assert_eq!(history.len(), HISTORY_LENGTH);
        }
    }

    #[test]
    fn test_fifo_order() {
        let mut history = History::new();
        let values: Vec<f64> = (1..=HISTORY_LENGTH + 1).map(|v| v as f64).collect();
        for v in &values {
            history.push(*v);
        }

        let kept: Vec<f64> = history.iter().collect();
        assert_eq!(kept, values[1..].to_vec());
        assert_eq!(history.latest(), Some((HISTORY_LENGTH + 1) as f64));
    }

    #[test]
    fn test_stats() {
        let mut history = History::new();
        history.push(60.0);
        let (min, max, avg) = history.stats();
        assert_eq!(min, 0.0);
        assert_eq!(max, 60.0);
        assert!((avg - 0.1).abs() < 1e-9);
    }
}
