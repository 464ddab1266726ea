//! Memo tables and work queues owned by the solver

use super::rank::Rank;
use crate::core::{KnowledgeState, Word};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use std::hash::Hash;

/// Player-turn values: best achievable rank from a state
pub type PlayerCache = FxHashMap<KnowledgeState, Rank>;

/// Server-turn values: worst-case rank after guessing a word from a state
pub type ServerCache = FxHashMap<(KnowledgeState, Word), Rank>;

/// Both memo tables; the durable state of a computation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tables {
    pub player: PlayerCache,
    pub server: ServerCache,
}

impl Tables {
    /// Total number of memoized positions
    #[must_use]
    pub fn len(&self) -> usize {
        self.player.len() + self.server.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.player.is_empty() && self.server.is_empty()
    }
}

/// FIFO queue that ignores keys already waiting in it
#[derive(Debug, Clone)]
pub struct WorkQueue<K> {
    order: VecDeque<K>,
    queued: FxHashSet<K>,
}

impl<K> Default for WorkQueue<K> {
    fn default() -> Self {
        Self {
            order: VecDeque::new(),
            queued: FxHashSet::default(),
        }
    }
}

impl<K: Copy + Eq + Hash> WorkQueue<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a key; returns false if it was already waiting
    pub fn push(&mut self, key: K) -> bool {
        let fresh = self.queued.insert(key);
        if fresh {
            self.order.push_back(key);
        }
        fresh
    }

    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.queued.contains(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Remove every waiting key, in arrival order
    pub fn take(&mut self) -> Vec<K> {
        self.queued.clear();
        self.order.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_ignores_duplicates() {
        let mut queue = WorkQueue::new();
        assert!(queue.push(3));
        assert!(queue.push(1));
        assert!(!queue.push(3));
        assert_eq!(queue.len(), 2);
        assert!(queue.contains(&1));
    }

    #[test]
    fn take_preserves_order_and_resets() {
        let mut queue = WorkQueue::new();
        for key in [5, 2, 9, 2] {
            queue.push(key);
        }
        assert_eq!(queue.take(), vec![5, 2, 9]);
        assert!(queue.is_empty());
        assert!(queue.push(5));
    }

    #[test]
    fn tables_len_counts_both() {
        let mut tables = Tables::default();
        assert!(tables.is_empty());
        tables.player.insert(KnowledgeState::new(), Rank::Guesses(1));
        tables
            .server
            .insert((KnowledgeState::new(), Word::UNKNOWN), Rank::NoSolution);
        assert_eq!(tables.len(), 2);
    }
}
