//! Word list loading utilities
//!
//! A word list file is a sequence of 6-byte records: five letters followed by
//! one separator byte (normally a newline). Letters must be upper case.
//! Reading stops at end of input or at a record too short to hold a word.

use crate::core::{WORD_LEN, Word, WordError};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Bytes per record: the word plus its separator
pub const RECORD_LEN: usize = WORD_LEN + 1;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read word list: {0}")]
    Io(#[from] io::Error),
    #[error("record {index} is not a word: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: WordError,
    },
}

/// Read every record from `reader`
///
/// A final record missing only its separator is still accepted.
///
/// # Errors
///
/// Returns `LoadError::InvalidRecord` for the first record whose letters are
/// not a word, or `LoadError::Io` if reading fails.
pub fn load_records<R: Read>(mut reader: R) -> Result<Vec<Word>, LoadError> {
    let mut words = Vec::new();
    let mut record = Vec::with_capacity(RECORD_LEN);

    loop {
        record.clear();
        reader
            .by_ref()
            .take(RECORD_LEN as u64)
            .read_to_end(&mut record)?;
        if record.len() < WORD_LEN {
            break;
        }

        let word =
            Word::from_ascii(&record[..WORD_LEN]).map_err(|source| LoadError::InvalidRecord {
                index: words.len(),
                source,
            })?;
        words.push(word);
    }

    Ok(words)
}

/// Load words from a file
///
/// # Errors
///
/// Returns an error if the file cannot be opened or holds an invalid record.
///
/// # Examples
/// ```no_run
/// use wordle_minimax::wordlists::loader::load_from_file;
///
/// let words = load_from_file("words.txt").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Word>, LoadError> {
    load_records(BufReader::new(File::open(path)?))
}

/// Convert a string slice to a Word vector, skipping anything that is not a word
///
/// # Examples
/// ```
/// use wordle_minimax::wordlists::loader::words_from_slice;
///
/// let words = words_from_slice(&["abide", "abase", "toolong"]);
/// assert_eq!(words.len(), 2);
/// ```
#[must_use]
pub fn words_from_slice(slice: &[&str]) -> Vec<Word> {
    slice.iter().filter_map(|&s| Word::new(s).ok()).collect()
}
