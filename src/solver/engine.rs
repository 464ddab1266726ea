//! Minimax solver engine
//!
//! The player value of a state is the minimum, over every word, of the server
//! value of guessing it; the server value is the maximum, over every
//! consistent feedback, of the successor's player value plus one. The two
//! valuations depend on each other across an enormous state graph, so they are
//! not evaluated by recursion. Instead each evaluation either finds all of its
//! dependencies memoized, or reports itself pending and names the missing
//! ones, which are queued for the other valuation. Rounds drain both queues
//! until nothing is left waiting.

use super::rank::{Decision, Rank};
use super::response::{Ranked, Step, rank_responses};
use super::tables::{PlayerCache, ServerCache, Tables, WorkQueue};
use crate::checkpoint::{self, CheckpointError};
use crate::core::{KnowledgeState, Word};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration for a solver run
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Where to persist the memo tables; `None` keeps them in memory only
    pub checkpoint: Option<PathBuf>,
    /// Save a checkpoint after every this many rounds
    pub checkpoint_every: usize,
    /// Stop a single run after this many rounds
    pub max_rounds: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            checkpoint: None,
            checkpoint_every: 1,
            max_rounds: None,
        }
    }
}

/// Progress counters reported after each round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundStats {
    pub round: usize,
    pub player_solved: usize,
    pub server_solved: usize,
    pub player_pending: usize,
    pub server_pending: usize,
    /// Positions memoized during this round
    pub committed: usize,
}

#[derive(Debug, Error)]
pub enum SolveError {
    #[error("word list is empty")]
    EmptyWordList,
    #[error("checkpoint failed: {0}")]
    Checkpoint(#[from] CheckpointError),
    #[error("no progress in round {round}: {pending} positions still waiting")]
    Stalled { round: usize, pending: usize },
}

/// Evaluate a player position against the server table
///
/// States with no consistent candidate have no solution; a state with exactly
/// one candidate is solved (the secret is determined). Otherwise every word
/// whose server value is missing is returned as a dependency.
fn player_decide(
    server: &ServerCache,
    words: &[Word],
    state: &KnowledgeState,
) -> (Decision, Vec<(KnowledgeState, Word)>) {
    let mut candidates = state.candidates(words);
    match (candidates.next(), candidates.next()) {
        (None, _) => return (Decision::Ready(Rank::NoSolution), Vec::new()),
        (Some(_), None) => return (Decision::Ready(Rank::Guesses(0)), Vec::new()),
        _ => {}
    }

    let mut missing = Vec::new();
    let mut best: Option<u32> = None;
    for &word in words {
        match server.get(&(*state, word)) {
            None => missing.push((*state, word)),
            Some(Rank::Guesses(n)) => best = Some(best.map_or(*n, |b| b.min(*n))),
            Some(Rank::NoSolution) => {}
        }
    }

    if !missing.is_empty() {
        return (Decision::Pending, missing);
    }
    let rank = best.map_or(Rank::NoSolution, Rank::Guesses);
    (Decision::Ready(rank), missing)
}

/// Evaluate a server position against the player table
///
/// A feedback that leaves the state unchanged makes the guess worthless, so the
/// whole position has no solution. Missing player values are requested for the
/// successor states themselves.
fn server_decide(
    player: &PlayerCache,
    state: &KnowledgeState,
    word: &Word,
) -> (Decision, Vec<KnowledgeState>) {
    if state.final_word() == Some(*word) {
        return (Decision::Ready(Rank::Guesses(0)), Vec::new());
    }

    let mut missing = Vec::new();
    let ranked = rank_responses(state, word, |_, next| {
        if next == state {
            return Step::Stalled;
        }
        match player.get(next) {
            None => {
                missing.push(*next);
                Step::Unknown
            }
            Some(Rank::Guesses(n)) => Step::Value(*n),
            Some(Rank::NoSolution) => Step::Dead,
        }
    });

    match ranked {
        Ranked::Best { rank, .. } => (Decision::Ready(Rank::Guesses(rank + 1)), Vec::new()),
        Ranked::Dead | Ranked::Stalled => (Decision::Ready(Rank::NoSolution), Vec::new()),
        Ranked::Pending => (Decision::Pending, missing),
    }
}

/// Memoized minimax solver over a fixed word list
pub struct Solver<'a> {
    words: &'a [Word],
    config: SolverConfig,
    tables: Tables,
    player_queue: WorkQueue<KnowledgeState>,
    server_queue: WorkQueue<(KnowledgeState, Word)>,
    rounds: usize,
}

impl<'a> Solver<'a> {
    /// Create a solver with empty tables
    ///
    /// # Errors
    /// Returns `SolveError::EmptyWordList` if `words` is empty.
    pub fn new(words: &'a [Word], config: SolverConfig) -> Result<Self, SolveError> {
        Self::with_tables(words, config, Tables::default())
    }

    /// Create a solver that continues from previously computed tables
    ///
    /// # Errors
    /// Returns `SolveError::EmptyWordList` if `words` is empty.
    pub fn with_tables(
        words: &'a [Word],
        config: SolverConfig,
        tables: Tables,
    ) -> Result<Self, SolveError> {
        if words.is_empty() {
            return Err(SolveError::EmptyWordList);
        }
        Ok(Self {
            words,
            config,
            tables,
            player_queue: WorkQueue::new(),
            server_queue: WorkQueue::new(),
            rounds: 0,
        })
    }

    /// Create a solver, loading the configured checkpoint if it exists
    ///
    /// # Errors
    /// Returns an error if the word list is empty or an existing checkpoint
    /// cannot be read.
    pub fn resume(words: &'a [Word], config: SolverConfig) -> Result<Self, SolveError> {
        let tables = match &config.checkpoint {
            Some(path) if path.exists() => {
                let tables = checkpoint::load(path)?;
                info!(
                    "Resumed from {}: {} player, {} server positions",
                    path.display(),
                    tables.player.len(),
                    tables.server.len()
                );
                tables
            }
            _ => Tables::default(),
        };
        Self::with_tables(words, config, tables)
    }

    /// The candidate word list
    #[must_use]
    pub const fn words(&self) -> &'a [Word] {
        self.words
    }

    /// The memo tables computed so far
    #[must_use]
    pub const fn tables(&self) -> &Tables {
        &self.tables
    }

    #[must_use]
    pub fn into_tables(self) -> Tables {
        self.tables
    }

    /// Memoized player value of a state, if computed
    #[must_use]
    pub fn player_value(&self, state: &KnowledgeState) -> Option<Rank> {
        self.tables.player.get(state).copied()
    }

    /// Memoized server value of guessing `word` from `state`, if computed
    #[must_use]
    pub fn server_value(&self, state: &KnowledgeState, word: &Word) -> Option<Rank> {
        self.tables.server.get(&(*state, *word)).copied()
    }

    /// The word achieving the best memoized value from `state`
    ///
    /// Ties go to the word that comes first in the list.
    #[must_use]
    pub fn best_guess(&self, state: &KnowledgeState) -> Option<(Word, u32)> {
        self.words
            .iter()
            .filter_map(|&word| {
                self.server_value(state, &word)
                    .and_then(Rank::guesses)
                    .map(|n| (word, n))
            })
            .min_by_key(|&(_, n)| n)
    }

    /// Solve from the empty state
    ///
    /// # Errors
    /// See [`Solver::solve_from`].
    pub fn run(&mut self) -> Result<Option<Rank>, SolveError> {
        self.solve_from(KnowledgeState::new(), |_| {})
    }

    /// Solve the player value of `root`, calling `on_round` after every round
    ///
    /// Returns `Ok(None)` if `max_rounds` was reached first; the tables are
    /// checkpointed so a later call continues where this one stopped.
    ///
    /// # Errors
    /// Returns an error if a checkpoint cannot be written or a round makes no
    /// progress.
    pub fn solve_from<F>(
        &mut self,
        root: KnowledgeState,
        mut on_round: F,
    ) -> Result<Option<Rank>, SolveError>
    where
        F: FnMut(&RoundStats),
    {
        if let Some(rank) = self.player_value(&root) {
            return Ok(Some(rank));
        }

        let (decision, missing) = player_decide(&self.tables.server, self.words, &root);
        if let Decision::Ready(rank) = decision {
            self.tables.player.insert(root, rank);
            self.save()?;
            return Ok(Some(rank));
        }
        info!("Root waiting on {} server positions", missing.len());
        self.player_queue.push(root);
        for key in missing {
            self.server_queue.push(key);
        }

        let every = self.config.checkpoint_every.max(1);
        let mut rounds_this_run = 0;
        while !self.player_queue.is_empty() || !self.server_queue.is_empty() {
            if self
                .config
                .max_rounds
                .is_some_and(|max| rounds_this_run >= max)
            {
                info!("Stopping after {rounds_this_run} rounds");
                self.save()?;
                return Ok(None);
            }

            let pending_before = self.pending();
            let stats = self.round();
            rounds_this_run += 1;
            on_round(&stats);

            if stats.committed == 0 && self.pending() == pending_before {
                warn!("Round {} made no progress", stats.round);
                self.save()?;
                return Err(SolveError::Stalled {
                    round: stats.round,
                    pending: pending_before,
                });
            }
            if stats.round % every == 0 {
                self.save()?;
            }
        }

        info!("Queues are empty after {} rounds", self.rounds);
        self.save()?;
        Ok(self.player_value(&root))
    }

    fn pending(&self) -> usize {
        self.player_queue.len() + self.server_queue.len()
    }

    /// One server pass followed by one player pass
    fn round(&mut self) -> RoundStats {
        self.rounds += 1;
        info!(
            "Round {}: {} server / {} player solved, {} server / {} player waiting",
            self.rounds,
            self.tables.server.len(),
            self.tables.player.len(),
            self.server_queue.len(),
            self.player_queue.len()
        );

        let committed = self.server_pass() + self.player_pass();
        RoundStats {
            round: self.rounds,
            player_solved: self.tables.player.len(),
            server_solved: self.tables.server.len(),
            player_pending: self.player_queue.len(),
            server_pending: self.server_queue.len(),
            committed,
        }
    }

    /// Attempt every waiting server position once
    ///
    /// Server evaluations only read the player table, so the batch is evaluated
    /// in parallel and committed afterwards in queue order.
    fn server_pass(&mut self) -> usize {
        let mut batch = self.server_queue.take();
        batch.retain(|key| !self.tables.server.contains_key(key));

        let player = &self.tables.player;
        let results: Vec<_> = batch
            .into_par_iter()
            .map(|key| (key, server_decide(player, &key.0, &key.1)))
            .collect();

        let mut committed = 0;
        for (key, (decision, missing)) in results {
            match decision {
                Decision::Ready(rank) => {
                    self.tables.server.insert(key, rank);
                    committed += 1;
                }
                Decision::Pending => {
                    self.server_queue.push(key);
                    for state in missing {
                        self.player_queue.push(state);
                    }
                }
            }
        }
        committed
    }

    /// Attempt every waiting player position once
    fn player_pass(&mut self) -> usize {
        let mut batch = self.player_queue.take();
        batch.retain(|state| !self.tables.player.contains_key(state));

        let server = &self.tables.server;
        let words = self.words;
        let results: Vec<_> = batch
            .into_par_iter()
            .map(|state| (state, player_decide(server, words, &state)))
            .collect();

        let mut committed = 0;
        for (state, (decision, missing)) in results {
            match decision {
                Decision::Ready(rank) => {
                    self.tables.player.insert(state, rank);
                    committed += 1;
                }
                Decision::Pending => {
                    self.player_queue.push(state);
                    for key in missing {
                        self.server_queue.push(key);
                    }
                }
            }
        }
        committed
    }

    fn save(&self) -> Result<(), CheckpointError> {
        if let Some(path) = &self.config.checkpoint {
            checkpoint::save(path, &self.tables)?;
            debug!(
                "Checkpointed {} positions to {}",
                self.tables.len(),
                path.display()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Feedback;
    use crate::wordlists::loader::words_from_slice;

    fn solve(words: &[&str]) -> Rank {
        let words = words_from_slice(words);
        let mut solver = Solver::new(&words, SolverConfig::default()).unwrap();
        solver.run().unwrap().unwrap()
    }

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    #[test]
    fn empty_word_list_is_rejected() {
        assert!(matches!(
            Solver::new(&[], SolverConfig::default()),
            Err(SolveError::EmptyWordList)
        ));
    }

    #[test]
    fn single_word_is_already_determined() {
        assert_eq!(solve(&["ABIDE"]), Rank::Guesses(0));
    }

    #[test]
    fn two_disjoint_words_need_one_guess() {
        assert_eq!(solve(&["AAAAA", "BBBBB"]), Rank::Guesses(1));
    }

    #[test]
    fn toy_list_needs_one_guess() {
        // ABIDE answers ABASE with GG__G and BEACH with YY__Y
        assert_eq!(solve(&["ABIDE", "ABASE", "BEACH"]), Rank::Guesses(1));
    }

    #[test]
    fn shared_suffix_words_are_eliminated_one_at_a_time() {
        // Every wrong guess is answered _GGGG and rules out only itself
        assert_eq!(solve(&["BATCH", "CATCH"]), Rank::Guesses(1));
        assert_eq!(solve(&["BATCH", "CATCH", "HATCH"]), Rank::Guesses(2));
        assert_eq!(solve(&["BATCH", "CATCH", "HATCH", "LATCH"]), Rank::Guesses(3));
    }

    #[test]
    fn result_is_deterministic_across_instances() {
        let list = ["CRANE", "CRATE", "GRATE", "IRATE", "SLATE"];
        assert_eq!(solve(&list), solve(&list));
    }

    #[test]
    fn independent_solvers_do_not_share_tables() {
        let first = words_from_slice(&["AAAAA", "BBBBB"]);
        let second = words_from_slice(&["ABIDE"]);
        let mut a = Solver::new(&first, SolverConfig::default()).unwrap();
        let mut b = Solver::new(&second, SolverConfig::default()).unwrap();
        assert_eq!(a.run().unwrap(), Some(Rank::Guesses(1)));
        assert_eq!(b.run().unwrap(), Some(Rank::Guesses(0)));
        assert!(b.tables().server.is_empty());
        assert!(!a.tables().server.is_empty());
    }

    #[test]
    fn best_guess_achieves_root_value() {
        let words = words_from_slice(&["ABIDE", "ABASE", "BEACH"]);
        let mut solver = Solver::new(&words, SolverConfig::default()).unwrap();
        let root = KnowledgeState::new();
        let value = solver.run().unwrap().unwrap();

        let (guess, n) = solver.best_guess(&root).unwrap();
        assert_eq!(Rank::Guesses(n), value);
        assert_eq!(solver.server_value(&root, &guess), Some(value));
    }

    #[test]
    fn resolved_word_is_a_free_leaf() {
        let state = KnowledgeState::new()
            .apply(&word("ABASE"), &Feedback::PERFECT)
            .unwrap();
        let (decision, missing) = server_decide(&PlayerCache::default(), &state, &word("ABASE"));
        assert_eq!(decision, Decision::Ready(Rank::Guesses(0)));
        assert!(missing.is_empty());
    }

    #[test]
    fn player_without_candidates_has_no_solution() {
        let words = words_from_slice(&["AAAAA", "BBBBB"]);
        let state = KnowledgeState::new()
            .apply(&word("ABCDE"), &"Y____".parse().unwrap())
            .unwrap();
        let (decision, missing) = player_decide(&ServerCache::default(), &words, &state);
        assert_eq!(decision, Decision::Ready(Rank::NoSolution));
        assert!(missing.is_empty());
    }

    #[test]
    fn server_requests_successor_states() {
        let root = KnowledgeState::new();
        let guess = word("AAAAA");
        let (decision, missing) = server_decide(&PlayerCache::default(), &root, &guess);
        assert_eq!(decision, Decision::Pending);
        assert!(!missing.is_empty());
        assert!(missing.iter().all(|s| *s != root));
        assert!(missing.contains(&root.apply(&guess, &Feedback::PERFECT).unwrap()));
    }

    #[test]
    fn uninformative_guess_has_no_solution() {
        // B is known absent, so guessing BBBBB again can only repeat that
        let state = KnowledgeState::new()
            .apply(&word("BBBBB"), &Feedback::ABSENT)
            .unwrap();
        let (decision, _) = server_decide(&PlayerCache::default(), &state, &word("BBBBB"));
        assert_eq!(decision, Decision::Ready(Rank::NoSolution));
    }

    #[test]
    fn round_limit_returns_none_then_resumes() {
        let list = ["BATCH", "CATCH", "HATCH", "LATCH"];
        let words = words_from_slice(&list);
        let config = SolverConfig {
            max_rounds: Some(1),
            ..SolverConfig::default()
        };
        let mut solver = Solver::new(&words, config).unwrap();
        assert_eq!(solver.run().unwrap(), None);

        let tables = solver.into_tables();
        let mut resumed = Solver::with_tables(&words, SolverConfig::default(), tables).unwrap();
        let rank = resumed.run().unwrap();
        assert_eq!(rank, Some(solve(&list)));
    }

    #[test]
    fn rounds_report_progress() {
        let words = words_from_slice(&["ABIDE", "ABASE", "BEACH"]);
        let mut solver = Solver::new(&words, SolverConfig::default()).unwrap();
        let mut rounds = Vec::new();
        solver
            .solve_from(KnowledgeState::new(), |stats| rounds.push(*stats))
            .unwrap();

        assert!(!rounds.is_empty());
        assert!(rounds.windows(2).all(|w| w[1].round == w[0].round + 1));
        let last = rounds.last().unwrap();
        assert_eq!(last.player_pending + last.server_pending, 0);
    }

    #[test]
    fn checkpoints_are_written_and_resumed() {
        let path = std::env::temp_dir().join(format!(
            "wordle_minimax_engine_{}.bin",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        let words = words_from_slice(&["ABIDE", "ABASE", "BEACH"]);
        let config = SolverConfig {
            checkpoint: Some(path.clone()),
            ..SolverConfig::default()
        };

        let mut solver = Solver::new(&words, config.clone()).unwrap();
        let rank = solver.run().unwrap();
        let tables = solver.into_tables();

        let resumed = Solver::resume(&words, config).unwrap();
        assert_eq!(resumed.tables(), &tables);
        assert_eq!(resumed.player_value(&KnowledgeState::new()), rank);

        std::fs::remove_file(&path).unwrap();
    }
}
