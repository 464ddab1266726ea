//! Wordle feedback marks and their enumeration
//!
//! Feedback is five marks, one per guessed letter:
//! - Absent (gray): letter not in word, or not that many times
//! - Displaced (yellow): letter in word, wrong position
//! - Exact (green): letter in correct position
//!
//! Marks are ordered `Absent < Displaced < Exact`, so a feedback reads as a
//! base-3 number with position 0 as the most significant digit. Stepping that
//! number with [`Feedback::next`] visits all 243 combinations.

use super::word::{ALPHABET, UNKNOWN, WORD_LEN, Word};
use std::fmt;
use thiserror::Error;

/// Total number of distinct feedbacks (3^5)
pub const FEEDBACK_COUNT: usize = 243;

/// A single position's verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum Mark {
    #[default]
    Absent = 0,
    Displaced = 1,
    Exact = 2,
}

impl Mark {
    /// Returns true for Displaced or Exact
    #[inline]
    #[must_use]
    pub const fn is_present(self) -> bool {
        !matches!(self, Self::Absent)
    }
}

/// Feedback for a whole guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Feedback([Mark; WORD_LEN]);

/// Error returned when parsing feedback text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackError {
    #[error("Feedback must be exactly 5 marks, got {0}")]
    InvalidLength(usize),
    #[error("Invalid feedback mark {0:?}, use G, Y or -")]
    InvalidMark(char),
}

impl Feedback {
    /// All marks Absent, the first feedback in enumeration order
    pub const ABSENT: Self = Self([Mark::Absent; WORD_LEN]);

    /// All marks Exact (perfect match), the last feedback in enumeration order
    pub const PERFECT: Self = Self([Mark::Exact; WORD_LEN]);

    /// Create feedback from individual marks
    #[inline]
    #[must_use]
    pub const fn new(marks: [Mark; WORD_LEN]) -> Self {
        Self(marks)
    }

    /// Get the individual marks
    #[inline]
    #[must_use]
    pub const fn marks(&self) -> &[Mark; WORD_LEN] {
        &self.0
    }

    /// Check if this is a perfect match (all Exact)
    #[inline]
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        *self == Self::PERFECT
    }

    /// Position of this feedback in enumeration order (0-242)
    #[must_use]
    pub fn index(&self) -> u8 {
        self.0.iter().fold(0u8, |acc, &m| acc * 3 + m as u8)
    }

    /// The next feedback in enumeration order
    ///
    /// The rightmost mark changes fastest and carries propagate leftward.
    /// Returns `None` after the all-Exact feedback.
    ///
    /// # Examples
    /// ```
    /// use wordle_minimax::core::Feedback;
    ///
    /// let second = Feedback::ABSENT.next().unwrap();
    /// assert_eq!(second.to_string(), "____Y");
    /// assert!(Feedback::PERFECT.next().is_none());
    /// ```
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        let mut marks = self.0;
        for mark in marks.iter_mut().rev() {
            match mark {
                Mark::Absent => {
                    *mark = Mark::Displaced;
                    return Some(Self(marks));
                }
                Mark::Displaced => {
                    *mark = Mark::Exact;
                    return Some(Self(marks));
                }
                Mark::Exact => *mark = Mark::Absent,
            }
        }
        None
    }

    /// Iterate every feedback, starting from all-Absent
    #[must_use]
    pub fn all() -> impl Iterator<Item = Self> {
        std::iter::successors(Some(Self::ABSENT), Self::next)
    }

    /// Calculate the feedback when `guess` is played against `secret`
    ///
    /// Exact matches are assigned first and consume their letter, then the
    /// remaining letters are marked Displaced left to right while the secret
    /// still has unconsumed copies. Unknown slots on either side never match,
    /// so an incomplete guess gets Absent there.
    ///
    /// # Examples
    /// ```
    /// use wordle_minimax::core::{Feedback, Word};
    ///
    /// let guess = Word::new("ABIDE").unwrap();
    /// let secret = Word::new("ABASE").unwrap();
    /// assert_eq!(Feedback::score(&secret, &guess).to_string(), "GG__G");
    /// ```
    #[must_use]
    pub fn score(secret: &Word, guess: &Word) -> Self {
        let mut marks = [Mark::Absent; WORD_LEN];
        let mut available = [0u8; ALPHABET];

        for (i, (&s, &g)) in secret.codes().iter().zip(guess.codes()).enumerate() {
            if s == UNKNOWN {
                continue;
            }
            if s == g {
                marks[i] = Mark::Exact;
            } else {
                available[usize::from(s)] += 1;
            }
        }

        for (mark, &g) in marks.iter_mut().zip(guess.codes()) {
            if *mark != Mark::Absent {
                continue;
            }
            if let Some(left) = available.get_mut(usize::from(g)).filter(|left| **left > 0) {
                *left -= 1;
                *mark = Mark::Displaced;
            }
        }

        Self(marks)
    }

    /// Count the Exact marks
    #[must_use]
    pub fn count_exact(&self) -> usize {
        self.0.iter().filter(|&&m| m == Mark::Exact).count()
    }

    /// Count the Displaced and Exact marks
    #[must_use]
    pub fn count_present(&self) -> usize {
        self.0.iter().filter(|m| m.is_present()).count()
    }
}

impl std::str::FromStr for Feedback {
    type Err = FeedbackError;

    /// Parse feedback from a string like "GY-GY"
    ///
    /// Accepts:
    /// - 'G'/'g' for Exact
    /// - 'Y'/'y' for Displaced
    /// - '-'/'_'/'.' for Absent
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count = s.chars().count();
        if count != WORD_LEN {
            return Err(FeedbackError::InvalidLength(count));
        }

        let mut marks = [Mark::Absent; WORD_LEN];
        for (mark, ch) in marks.iter_mut().zip(s.chars()) {
            *mark = match ch {
                'G' | 'g' => Mark::Exact,
                'Y' | 'y' => Mark::Displaced,
                '-' | '_' | '.' => Mark::Absent,
                other => return Err(FeedbackError::InvalidMark(other)),
            };
        }
        Ok(Self(marks))
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mark in &self.0 {
            let ch = match mark {
                Mark::Absent => '_',
                Mark::Displaced => 'Y',
                Mark::Exact => 'G',
            };
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    #[test]
    fn enumeration_visits_every_feedback_once() {
        let all: Vec<Feedback> = Feedback::all().collect();
        assert_eq!(all.len(), FEEDBACK_COUNT);

        let distinct: HashSet<Feedback> = all.iter().copied().collect();
        assert_eq!(distinct.len(), FEEDBACK_COUNT);

        assert_eq!(all[0], Feedback::ABSENT);
        assert_eq!(all[FEEDBACK_COUNT - 1], Feedback::PERFECT);
    }

    #[test]
    fn enumeration_is_in_index_order() {
        for (i, feedback) in Feedback::all().enumerate() {
            assert_eq!(usize::from(feedback.index()), i);
        }
    }

    #[test]
    fn next_carries_leftward() {
        let before: Feedback = "_GGGG".parse().unwrap();
        let after: Feedback = "Y____".parse().unwrap();
        assert_eq!(before.next(), Some(after));
    }

    #[test]
    fn score_abide_against_abase() {
        let feedback = Feedback::score(&word("ABASE"), &word("ABIDE"));
        assert_eq!(
            feedback.marks(),
            &[
                Mark::Exact,
                Mark::Exact,
                Mark::Absent,
                Mark::Absent,
                Mark::Exact
            ]
        );
        assert_eq!(feedback.index(), 2 * 81 + 2 * 27 + 2);
    }

    #[test]
    fn score_is_deterministic() {
        let secret = word("BEACH");
        let guess = word("ABASE");
        assert_eq!(
            Feedback::score(&secret, &guess),
            Feedback::score(&secret, &guess)
        );
    }

    #[test]
    fn score_duplicate_letters_exact_takes_priority() {
        // ROBOT vs FLOOR: R(Y) O(Y) B(_) O(G) T(_)
        let feedback = Feedback::score(&word("FLOOR"), &word("ROBOT"));
        assert_eq!(feedback.to_string(), "YY_G_");
    }

    #[test]
    fn score_extra_copies_are_absent() {
        // SPEED vs ERASE: both E's displaced, P and D absent
        assert_eq!(
            Feedback::score(&word("ERASE"), &word("SPEED")).to_string(),
            "Y_YY_"
        );
        // EERIE vs THEME: only two E's are present
        assert_eq!(
            Feedback::score(&word("THEME"), &word("EERIE")).to_string(),
            "Y___G"
        );
    }

    #[test]
    fn score_self_is_perfect() {
        for text in ["CRANE", "AAAAA", "ZZZZZ"] {
            let w = word(text);
            assert!(Feedback::score(&w, &w).is_perfect());
        }
    }

    #[test]
    fn score_incomplete_words_marks_unknown_slots_absent() {
        let partial = Word::from_codes([0, UNKNOWN, 2, 3, 4]).unwrap();
        assert_eq!(
            Feedback::score(&word("ABASE"), &partial).to_string(),
            "G___G"
        );
        assert_eq!(
            Feedback::score(&partial, &word("ABCDE")).to_string(),
            "G_GGG"
        );
        assert_eq!(Feedback::score(&Word::UNKNOWN, &Word::UNKNOWN), Feedback::ABSENT);
    }

    #[test]
    fn counts() {
        let feedback: Feedback = "GYG-Y".parse().unwrap();
        assert_eq!(feedback.count_exact(), 2);
        assert_eq!(feedback.count_present(), 4);
    }

    #[test]
    fn parse_and_display() {
        let feedback: Feedback = "gy-_.".parse().unwrap();
        assert_eq!(feedback.to_string(), "GY___");
        assert_eq!(
            "GYG".parse::<Feedback>(),
            Err(FeedbackError::InvalidLength(3))
        );
        assert_eq!(
            "GXGGY".parse::<Feedback>(),
            Err(FeedbackError::InvalidMark('X'))
        );
    }

    #[test]
    fn every_feedback_survives_display_and_parse() {
        for feedback in Feedback::all() {
            assert_eq!(feedback.to_string().parse::<Feedback>(), Ok(feedback));
        }
    }
}
