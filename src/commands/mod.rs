//! Command implementations

pub mod play;
pub mod solve;

pub use play::{GameSummary, run_play};
pub use solve::{SolveOptions, SolveSummary, run_solve};
