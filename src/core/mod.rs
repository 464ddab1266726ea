//! Core domain types for Wordle
//!
//! This module contains the fundamental domain types: words, feedback marks and
//! the accumulated public knowledge of a game. Everything here is a pure value
//! type with no I/O.

mod feedback;
mod state;
mod word;

pub use feedback::{FEEDBACK_COUNT, Feedback, FeedbackError, Mark};
pub use state::{Contradiction, InvalidState, KnowledgeState, LetterFacts};
pub use word::{ALPHABET, UNKNOWN, WORD_LEN, Word, WordError};
