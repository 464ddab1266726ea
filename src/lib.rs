//! Wordle Minimax
//!
//! Computes the exact worst-case number of guesses needed to determine a
//! Wordle secret against an adversary that may pick any feedback consistent
//! with everything revealed so far.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use wordle_minimax::core::{Feedback, KnowledgeState, Word};
//! use wordle_minimax::solver::{Solver, SolverConfig};
//! use wordle_minimax::wordlists::words_from_slice;
//!
//! // Score a guess
//! let guess = Word::new("abide").unwrap();
//! let secret = Word::new("abase").unwrap();
//! let feedback = Feedback::score(&secret, &guess);
//! let state = KnowledgeState::new().apply(&guess, &feedback).unwrap();
//! assert!(state.matches(&secret));
//!
//! // Solve a small game
//! let words = words_from_slice(&["abide", "abase", "beach"]);
//! let mut solver = Solver::new(&words, SolverConfig::default()).unwrap();
//! println!("{:?}", solver.run().unwrap());
//! ```

// Core domain types
pub mod core;

// Minimax engine and oracles
pub mod solver;

// Memo table persistence
pub mod checkpoint;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
