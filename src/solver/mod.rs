//! Minimax solving
//!
//! The engine computes exact values of the guessing game against an adversarial
//! oracle; the oracles answer guesses during play.

mod engine;
pub mod oracle;
mod rank;
pub mod response;
pub mod tables;

pub use engine::{RoundStats, SolveError, Solver, SolverConfig};
pub use oracle::{Absurd, Oracle, OracleError, OracleType, Standard};
pub use rank::{Decision, Rank};
pub use tables::{PlayerCache, ServerCache, Tables};
