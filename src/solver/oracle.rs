//! Answering guesses
//!
//! Defines the Oracle trait and its two implementations: a fair game with a
//! fixed secret, and an adversary that keeps as many words alive as it can.

use super::response::{Ranked, Step, rank_responses};
use crate::core::{Feedback, KnowledgeState, Word};
use log::debug;
use std::cmp::Reverse;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("knowledge state no longer matches the secret {0}")]
    SecretInconsistent(Word),
    #[error("no word in the list matches the current knowledge")]
    NoCandidates,
    #[error("no feedback for {0} keeps any word consistent")]
    NoResponse(Word),
    #[error("word list is empty")]
    EmptyWordList,
    #[error("guess {0} has unknown letters")]
    IncompleteGuess(Word),
}

/// Something that answers guesses with feedback
pub trait Oracle {
    /// Answer `guess` given everything already known
    ///
    /// # Errors
    /// Returns `OracleError` if the state leaves the oracle nothing valid to say.
    fn respond(&mut self, state: &KnowledgeState, guess: &Word) -> Result<Feedback, OracleError>;

    /// The secret, for oracles that have one
    fn secret(&self) -> Option<Word> {
        None
    }
}

/// Enum wrapper for all oracle types
///
/// Allows runtime selection of the oracle while maintaining static dispatch.
pub enum OracleType<'a> {
    /// Fixed secret, ordinary scoring
    Standard(Standard),
    /// Adversarial feedback
    Absurd(Absurd<'a>),
}

impl Oracle for OracleType<'_> {
    fn respond(&mut self, state: &KnowledgeState, guess: &Word) -> Result<Feedback, OracleError> {
        match self {
            Self::Standard(o) => o.respond(state, guess),
            Self::Absurd(o) => o.respond(state, guess),
        }
    }

    fn secret(&self) -> Option<Word> {
        match self {
            Self::Standard(o) => o.secret(),
            Self::Absurd(o) => o.secret(),
        }
    }
}

impl<'a> OracleType<'a> {
    /// Create an oracle from its name
    ///
    /// Supported names: "standard", "absurd". Returns `None` for anything else.
    ///
    /// # Errors
    /// Returns `OracleError::EmptyWordList` if a standard oracle has no word to
    /// pick as its secret.
    pub fn from_name(name: &str, words: &'a [Word]) -> Result<Option<Self>, OracleError> {
        Ok(match name {
            "standard" => Some(Self::Standard(Standard::random(words)?)),
            "absurd" => Some(Self::Absurd(Absurd::new(words))),
            _ => None,
        })
    }
}

/// Plays fair with a secret fixed up front
pub struct Standard {
    secret: Word,
}

impl Standard {
    #[must_use]
    pub const fn new(secret: Word) -> Self {
        Self { secret }
    }

    /// Pick the secret uniformly from `words`
    ///
    /// # Errors
    /// Returns `OracleError::EmptyWordList` if `words` is empty.
    pub fn random(words: &[Word]) -> Result<Self, OracleError> {
        use rand::prelude::IndexedRandom;

        let secret = *words
            .choose(&mut rand::rng())
            .ok_or(OracleError::EmptyWordList)?;
        debug!("Secret: {secret}");
        Ok(Self::new(secret))
    }
}

impl Oracle for Standard {
    fn respond(&mut self, state: &KnowledgeState, guess: &Word) -> Result<Feedback, OracleError> {
        if !guess.is_complete() {
            return Err(OracleError::IncompleteGuess(*guess));
        }
        if !state.matches(&self.secret) {
            return Err(OracleError::SecretInconsistent(self.secret));
        }
        Ok(Feedback::score(&self.secret, guess))
    }

    fn secret(&self) -> Option<Word> {
        Some(self.secret)
    }
}

/// Answers with whatever feedback leaves the most words possible
///
/// Ties prefer fewer Exact marks, then fewer present marks.
pub struct Absurd<'a> {
    words: &'a [Word],
}

impl<'a> Absurd<'a> {
    #[must_use]
    pub const fn new(words: &'a [Word]) -> Self {
        Self { words }
    }
}

impl Oracle for Absurd<'_> {
    fn respond(&mut self, state: &KnowledgeState, guess: &Word) -> Result<Feedback, OracleError> {
        if !guess.is_complete() {
            return Err(OracleError::IncompleteGuess(*guess));
        }
        if state.candidates(self.words).next().is_none() {
            return Err(OracleError::NoCandidates);
        }

        let ranked = rank_responses(state, guess, |feedback, next| {
            match next.candidates(self.words).count() {
                0 => Step::Dead,
                remaining => Step::Value((
                    remaining,
                    Reverse(feedback.count_exact()),
                    Reverse(feedback.count_present()),
                )),
            }
        });

        match ranked {
            Ranked::Best { feedback, rank } => {
                debug!("{guess} -> {feedback} keeps {} words", rank.0);
                Ok(feedback)
            }
            Ranked::Dead | Ranked::Pending | Ranked::Stalled => Err(OracleError::NoResponse(*guess)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UNKNOWN;
    use crate::wordlists::loader::words_from_slice;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    #[test]
    fn standard_scores_against_secret() {
        let mut oracle = Standard::new(word("ABASE"));
        let feedback = oracle
            .respond(&KnowledgeState::new(), &word("ABIDE"))
            .unwrap();
        assert_eq!(feedback.to_string(), "GG__G");
        assert_eq!(oracle.secret(), Some(word("ABASE")));
    }

    #[test]
    fn standard_detects_inconsistent_state() {
        let mut oracle = Standard::new(word("ABASE"));
        let state = KnowledgeState::new()
            .apply(&word("ABASE"), &Feedback::ABSENT)
            .unwrap();
        assert_eq!(
            oracle.respond(&state, &word("BEACH")),
            Err(OracleError::SecretInconsistent(word("ABASE")))
        );
    }

    #[test]
    fn incomplete_guess_is_rejected_by_both_oracles() {
        let partial = Word::from_codes([0, UNKNOWN, 2, 3, 4]).unwrap();
        let state = KnowledgeState::new();

        let mut standard = Standard::new(word("ABASE"));
        assert_eq!(
            standard.respond(&state, &partial),
            Err(OracleError::IncompleteGuess(partial))
        );

        let words = words_from_slice(&["ABIDE", "ABASE"]);
        let mut absurd = Absurd::new(&words);
        assert_eq!(
            absurd.respond(&state, &partial),
            Err(OracleError::IncompleteGuess(partial))
        );
    }

    #[test]
    fn random_secret_comes_from_list() {
        let words = words_from_slice(&["ABIDE", "ABASE", "BEACH"]);
        let oracle = Standard::random(&words).unwrap();
        assert!(words.contains(&oracle.secret().unwrap()));
        assert!(matches!(
            Standard::random(&[]),
            Err(OracleError::EmptyWordList)
        ));
    }

    #[test]
    fn absurd_keeps_largest_group() {
        // Guessing BATCH: CATCH, HATCH and LATCH all answer _GGGG
        let words = words_from_slice(&["BATCH", "CATCH", "HATCH", "LATCH"]);
        let mut oracle = Absurd::new(&words);
        let feedback = oracle
            .respond(&KnowledgeState::new(), &word("BATCH"))
            .unwrap();
        assert_eq!(feedback.to_string(), "_GGGG");
    }

    #[test]
    fn absurd_never_answers_perfect_while_others_remain() {
        let words = words_from_slice(&["AAAAA", "BBBBB"]);
        let mut oracle = Absurd::new(&words);
        let feedback = oracle
            .respond(&KnowledgeState::new(), &word("AAAAA"))
            .unwrap();
        // Both answers leave one word; the tie goes to fewer Exact marks
        assert_eq!(feedback, Feedback::ABSENT);
    }

    #[test]
    fn absurd_answers_stay_consistent_with_some_word() {
        let words = words_from_slice(&["ABIDE", "ABASE", "BEACH", "THEME", "SPEED"]);
        let mut oracle = Absurd::new(&words);
        let mut state = KnowledgeState::new();
        for guess in ["SPEED", "ABIDE"] {
            let guess = word(guess);
            let feedback = oracle.respond(&state, &guess).unwrap();
            state = state.apply(&guess, &feedback).unwrap();
            assert!(state.candidates(&words).next().is_some());
        }
    }

    #[test]
    fn absurd_errors_without_candidates() {
        let words = words_from_slice(&["AAAAA"]);
        let mut oracle = Absurd::new(&words);
        let state = KnowledgeState::new()
            .apply(&word("AAAAA"), &Feedback::ABSENT)
            .unwrap();
        assert_eq!(
            oracle.respond(&state, &word("AAAAA")),
            Err(OracleError::NoCandidates)
        );
    }

    #[test]
    fn from_name_selects_oracle() {
        let words = words_from_slice(&["ABIDE"]);
        assert!(matches!(
            OracleType::from_name("standard", &words),
            Ok(Some(OracleType::Standard(_)))
        ));
        assert!(matches!(
            OracleType::from_name("absurd", &words),
            Ok(Some(OracleType::Absurd(_)))
        ));
        assert!(matches!(OracleType::from_name("fair", &words), Ok(None)));
    }
}
