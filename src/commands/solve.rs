//! Solving command
//!
//! Runs the minimax fixpoint from the empty state, resuming from a checkpoint
//! when one is configured, and reports the value and best opening guess.

use crate::core::{KnowledgeState, Word};
use crate::output::formatters::round_message;
use crate::solver::{Rank, Solver, SolverConfig};
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Configuration for a solve run
#[derive(Debug, Clone, Default)]
pub struct SolveOptions {
    pub config: SolverConfig,
    /// Ignore any existing checkpoint and start from empty tables
    pub fresh: bool,
}

/// Result of a solve run
#[derive(Debug, Clone)]
pub struct SolveSummary {
    pub words: usize,
    /// Value of the empty state, or `None` if the round limit was hit first
    pub value: Option<Rank>,
    pub best_guess: Option<(Word, u32)>,
    pub rounds: usize,
    pub player_solved: usize,
    pub server_solved: usize,
    pub duration: Duration,
}

/// Solve the game over `words`
///
/// # Errors
///
/// Returns an error if the word list is empty, the checkpoint cannot be read or
/// written, or the computation stops making progress.
pub fn run_solve(words: &[Word], options: SolveOptions) -> Result<SolveSummary> {
    let start = Instant::now();
    let mut solver = if options.fresh {
        Solver::new(words, options.config)?
    } else {
        Solver::resume(words, options.config)?
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    spinner.enable_steady_tick(Duration::from_millis(120));

    let mut rounds = 0;
    let root = KnowledgeState::new();
    let value = solver.solve_from(root, |stats| {
        rounds = stats.round;
        spinner.set_message(round_message(stats));
    });
    spinner.finish_and_clear();
    let value = value?;

    let tables = solver.tables();
    Ok(SolveSummary {
        words: words.len(),
        value,
        best_guess: solver.best_guess(&root),
        rounds,
        player_solved: tables.player.len(),
        server_solved: tables.server.len(),
        duration: start.elapsed(),
    })
}
