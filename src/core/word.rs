//! Wordle word representation
//!
//! A Word stores five letter codes (`A` = 0 through `Z` = 25). A slot may also
//! hold the [`UNKNOWN`] sentinel, which is how partially resolved words are
//! represented inside a knowledge state.

use std::fmt;
use thiserror::Error;

/// Number of letters in a word
pub const WORD_LEN: usize = 5;

/// Number of distinct letters
pub const ALPHABET: usize = 26;

/// Sentinel for a slot whose letter is not known
pub const UNKNOWN: u8 = 0xff;

/// A 5-letter word, possibly with unknown slots
///
/// Words built from text are always complete. Incomplete words only appear as
/// the resolved letters of a [`KnowledgeState`](super::KnowledgeState).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word([u8; WORD_LEN]);

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("Word must be exactly 5 letters, got {0}")]
    InvalidLength(usize),
    #[error("Word contains invalid character {0:?}, expected A-Z")]
    InvalidLetter(char),
    #[error("Letter code {0} is out of range")]
    InvalidCode(u8),
}

impl Word {
    /// A word with every slot unknown
    pub const UNKNOWN: Self = Self([UNKNOWN; WORD_LEN]);

    /// Create a new Word from text
    ///
    /// Letters are accepted in either case and normalized to upper case.
    ///
    /// # Errors
    /// Returns `WordError` if:
    /// - Length is not exactly 5
    /// - Contains anything other than the letters A-Z
    ///
    /// # Examples
    /// ```
    /// use wordle_minimax::core::Word;
    ///
    /// let word = Word::new("abide").unwrap();
    /// assert_eq!(word.to_string(), "ABIDE");
    ///
    /// assert!(Word::new("too long").is_err());
    /// assert!(Word::new("sh0rt").is_err());
    /// ```
    pub fn new(text: &str) -> Result<Self, WordError> {
        let count = text.chars().count();
        if count != WORD_LEN {
            return Err(WordError::InvalidLength(count));
        }

        let mut codes = [UNKNOWN; WORD_LEN];
        for (slot, ch) in codes.iter_mut().zip(text.chars()) {
            let upper = ch.to_ascii_uppercase();
            if !upper.is_ascii_uppercase() {
                return Err(WordError::InvalidLetter(ch));
            }
            *slot = upper as u8 - b'A';
        }

        Ok(Self(codes))
    }

    /// Create a word from upper-case ASCII bytes, as stored in word list files
    ///
    /// Unlike [`Word::new`], lower case is rejected.
    ///
    /// # Errors
    /// Returns `WordError` if there are not exactly 5 bytes or any byte is
    /// outside `A`-`Z`.
    pub fn from_ascii(bytes: &[u8]) -> Result<Self, WordError> {
        if bytes.len() != WORD_LEN {
            return Err(WordError::InvalidLength(bytes.len()));
        }

        let mut codes = [UNKNOWN; WORD_LEN];
        for (slot, &b) in codes.iter_mut().zip(bytes) {
            if !b.is_ascii_uppercase() {
                return Err(WordError::InvalidLetter(char::from(b)));
            }
            *slot = b - b'A';
        }

        Ok(Self(codes))
    }

    /// Create a word from raw letter codes
    ///
    /// Each code must be 0-25 or [`UNKNOWN`].
    ///
    /// # Errors
    /// Returns `WordError::InvalidCode` for any other value.
    pub fn from_codes(codes: [u8; WORD_LEN]) -> Result<Self, WordError> {
        match codes.iter().find(|&&c| c != UNKNOWN && usize::from(c) >= ALPHABET) {
            Some(&bad) => Err(WordError::InvalidCode(bad)),
            None => Ok(Self(codes)),
        }
    }

    /// Get the raw letter codes
    #[inline]
    #[must_use]
    pub const fn codes(&self) -> &[u8; WORD_LEN] {
        &self.0
    }

    /// Get the letter at a specific position (0-4), or `None` if unknown
    ///
    /// # Panics
    /// Panics if position >= 5
    #[inline]
    #[must_use]
    pub const fn letter(&self, position: usize) -> Option<u8> {
        match self.0[position] {
            UNKNOWN => None,
            code => Some(code),
        }
    }

    /// Returns true if every slot holds a letter
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.0.iter().all(|&c| c != UNKNOWN)
    }

    /// Count how many times each letter occurs
    #[must_use]
    pub fn letter_counts(&self) -> [u8; ALPHABET] {
        let mut counts = [0u8; ALPHABET];
        for &c in self.0.iter().filter(|&&c| c != UNKNOWN) {
            counts[usize::from(c)] += 1;
        }
        counts
    }

    pub(crate) fn set(&mut self, position: usize, letter: u8) {
        self.0[position] = letter;
    }
}

impl Default for Word {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl std::str::FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &c in &self.0 {
            let ch = if c == UNKNOWN { '_' } else { char::from(b'A' + c) };
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}
