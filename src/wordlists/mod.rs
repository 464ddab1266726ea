//! Word lists for Wordle solving
//!
//! Word lists are loaded at runtime from record files; see [`loader`].

pub mod loader;

pub use loader::{LoadError, load_from_file, load_records, words_from_slice};
