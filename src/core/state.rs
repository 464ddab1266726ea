//! Accumulated public knowledge of a game
//!
//! A [`KnowledgeState`] records, for every letter, a minimum occurrence count,
//! whether that count is exact, and the positions the letter is excluded from.
//! It also records the positions whose letter is known outright.
//!
//! States are small `Copy` values. [`KnowledgeState::apply`] never touches the
//! receiver and returns a new state, so a rejected update leaves the caller's
//! state intact.

use super::feedback::{Feedback, Mark};
use super::word::{ALPHABET, WORD_LEN, Word};
use std::fmt;
use thiserror::Error;

/// Bit mask covering every position
const ALL_POSITIONS: u8 = (1 << WORD_LEN) - 1;

/// What is known about a single letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LetterFacts {
    /// Minimum number of occurrences (0-5)
    pub min_count: u8,
    /// Whether `min_count` is also the maximum
    pub exact: bool,
    /// Bit set of positions (bits 0-4) the letter cannot occupy
    pub excluded: u8,
}

impl LetterFacts {
    #[inline]
    const fn is_excluded(self, position: usize) -> bool {
        self.excluded & (1 << position) != 0
    }

    /// Positions still open to this letter
    #[inline]
    #[must_use]
    pub const fn allowed_count(self) -> u32 {
        WORD_LEN as u32 - self.excluded.count_ones()
    }
}

/// Why a (guess, feedback) pair cannot follow a state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Contradiction {
    #[error("position {position} is resolved to the guessed letter but was not marked exact")]
    ResolvedMismatch { position: usize },
    #[error("position {position} is already resolved to a different letter")]
    ConflictingResolution { position: usize },
    #[error("letter {letter} would get an exact count below its known minimum")]
    ShrunkBound { letter: char },
    #[error("guess has unknown letters")]
    IncompleteGuess,
}

/// Error building a state from raw parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidState {
    #[error("letter {letter} has minimum count {min_count}, above the word length")]
    CountOutOfRange { letter: char, min_count: u8 },
    #[error("letter {letter} has excluded mask {mask:#04x} outside positions 0-4")]
    MaskOutOfRange { letter: char, mask: u8 },
}

/// Public knowledge after zero or more guesses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KnowledgeState {
    facts: [LetterFacts; ALPHABET],
    resolved: Word,
}

impl Default for KnowledgeState {
    fn default() -> Self {
        Self::new()
    }
}

fn letter_char(letter: usize) -> char {
    char::from(b'A' + letter as u8)
}

impl KnowledgeState {
    /// The empty state: no constraints and nothing resolved
    #[must_use]
    pub const fn new() -> Self {
        Self {
            facts: [LetterFacts {
                min_count: 0,
                exact: false,
                excluded: 0,
            }; ALPHABET],
            resolved: Word::UNKNOWN,
        }
    }

    /// Rebuild a state from its raw parts, checking field ranges
    ///
    /// # Errors
    /// Returns `InvalidState` if a count exceeds 5 or a mask uses bits above 4.
    pub fn from_parts(facts: [LetterFacts; ALPHABET], resolved: Word) -> Result<Self, InvalidState> {
        for (letter, f) in facts.iter().enumerate() {
            if usize::from(f.min_count) > WORD_LEN {
                return Err(InvalidState::CountOutOfRange {
                    letter: letter_char(letter),
                    min_count: f.min_count,
                });
            }
            if f.excluded & !ALL_POSITIONS != 0 {
                return Err(InvalidState::MaskOutOfRange {
                    letter: letter_char(letter),
                    mask: f.excluded,
                });
            }
        }
        Ok(Self { facts, resolved })
    }

    /// Facts about one letter (0-25)
    #[inline]
    #[must_use]
    pub const fn facts(&self, letter: u8) -> LetterFacts {
        self.facts[letter as usize]
    }

    /// Facts about every letter, indexed by letter code
    #[inline]
    #[must_use]
    pub const fn all_facts(&self) -> &[LetterFacts; ALPHABET] {
        &self.facts
    }

    /// Positions whose letter is known
    #[inline]
    #[must_use]
    pub const fn resolved(&self) -> &Word {
        &self.resolved
    }

    /// Fold a guess and its feedback into a new state
    ///
    /// # Algorithm
    /// 1. Reject if a resolved position was guessed correctly but not marked exact
    /// 2. Per letter: more copies guessed than marked present gives an exact
    ///    count, otherwise the minimum count is raised
    /// 3. Per position: Displaced excludes the letter there, Exact resolves it
    ///    (and, once an exact count is fully resolved, excludes the letter from
    ///    every other position)
    /// 4. Any letter whose open positions equal its minimum count is resolved
    ///    into those positions
    ///
    /// # Errors
    /// Returns the `Contradiction` found if the pair cannot follow this state.
    ///
    /// # Examples
    /// ```
    /// use wordle_minimax::core::{Feedback, KnowledgeState, Word};
    ///
    /// let guess = Word::new("ABIDE").unwrap();
    /// let state = KnowledgeState::new()
    ///     .apply(&guess, &"GG__G".parse().unwrap())
    ///     .unwrap();
    /// assert!(state.matches(&Word::new("ABASE").unwrap()));
    /// assert!(!state.matches(&Word::new("BEACH").unwrap()));
    /// ```
    pub fn apply(&self, guess: &Word, feedback: &Feedback) -> Result<Self, Contradiction> {
        if !guess.is_complete() {
            return Err(Contradiction::IncompleteGuess);
        }

        let mut next = *self;
        let letters = guess.codes();
        let marks = feedback.marks();

        // Copies of each letter in the guess, and how many of them were marked present
        let mut w_occurs = [0u8; ALPHABET];
        let mut k_occurs = [0u8; ALPHABET];
        for (i, (&letter, &mark)) in letters.iter().zip(marks).enumerate() {
            w_occurs[usize::from(letter)] += 1;
            if mark.is_present() {
                k_occurs[usize::from(letter)] += 1;
            }
            if self.resolved.letter(i) == Some(letter) && mark != Mark::Exact {
                return Err(Contradiction::ResolvedMismatch { position: i });
            }
        }

        for (i, (&letter, &mark)) in letters.iter().zip(marks).enumerate() {
            let l = usize::from(letter);
            let facts = &mut next.facts[l];

            if w_occurs[l] > k_occurs[l] {
                // Surplus copies were marked absent, so the count is pinned
                if facts.min_count > k_occurs[l] {
                    return Err(Contradiction::ShrunkBound {
                        letter: letter_char(l),
                    });
                }
                facts.exact = true;
                facts.min_count = k_occurs[l];
                if k_occurs[l] == 0 {
                    facts.excluded = ALL_POSITIONS;
                }
            } else {
                facts.min_count = facts.min_count.max(k_occurs[l]);
            }

            match mark {
                Mark::Absent => {}
                Mark::Displaced => facts.excluded |= 1 << i,
                Mark::Exact => match next.resolved.letter(i) {
                    Some(known) if known == letter => {}
                    Some(_) => return Err(Contradiction::ConflictingResolution { position: i }),
                    None => {
                        next.resolved.set(i, letter);
                        next.propagate_resolution(letter);
                    }
                },
            }
        }

        next.deduce_positions()?;
        Ok(next)
    }

    /// Raise a letter's minimum to its resolved count, and if an exact count
    /// is now fully placed, exclude the letter everywhere else
    fn propagate_resolution(&mut self, letter: u8) {
        let placed = self.resolved.codes().iter().filter(|&&c| c == letter).count() as u8;
        let facts = &mut self.facts[usize::from(letter)];
        facts.min_count = facts.min_count.max(placed);

        if facts.exact && placed == facts.min_count {
            for (j, &c) in self.resolved.codes().iter().enumerate() {
                if c != letter {
                    facts.excluded |= 1 << j;
                }
            }
        }
    }

    /// Resolve every letter whose open positions are exactly as many as its
    /// minimum count
    fn deduce_positions(&mut self) -> Result<(), Contradiction> {
        for (letter, facts) in self.facts.iter().enumerate() {
            if facts.allowed_count() != u32::from(facts.min_count) {
                continue;
            }
            for j in (0..WORD_LEN).filter(|&j| !facts.is_excluded(j)) {
                match self.resolved.letter(j) {
                    Some(known) if usize::from(known) != letter => {
                        return Err(Contradiction::ConflictingResolution { position: j });
                    }
                    _ => self.resolved.set(j, letter as u8),
                }
            }
        }
        Ok(())
    }

    /// Determine if the given word is a possible secret
    ///
    /// Incomplete words never match.
    #[must_use]
    pub fn matches(&self, word: &Word) -> bool {
        if !word.is_complete() {
            return false;
        }

        let letters = word.codes();
        for (i, &letter) in letters.iter().enumerate() {
            if self.resolved.letter(i).is_some_and(|known| known != letter) {
                return false;
            }
            if self.facts[usize::from(letter)].is_excluded(i) {
                return false;
            }
        }

        let counts = word.letter_counts();
        self.facts.iter().zip(counts).all(|(facts, count)| {
            count >= facts.min_count && !(facts.exact && count > facts.min_count)
        })
    }

    /// Returns the resolved word, or `None` while any position is unknown
    #[must_use]
    pub fn final_word(&self) -> Option<Word> {
        self.resolved.is_complete().then_some(self.resolved)
    }

    /// Words from `words` consistent with this state
    #[must_use]
    pub fn candidates<'a>(&'a self, words: &'a [Word]) -> impl Iterator<Item = &'a Word> + 'a {
        words.iter().filter(move |w| self.matches(w))
    }
}

impl fmt::Display for KnowledgeState {
    /// One line per constrained letter (`E XX__X 2+`), then the resolved word
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (letter, facts) in self.facts.iter().enumerate() {
            if facts.excluded == 0 && facts.min_count == 0 {
                continue;
            }
            write!(f, "{} ", letter_char(letter))?;
            for j in 0..WORD_LEN {
                write!(f, "{}", if facts.is_excluded(j) { 'X' } else { '_' })?;
            }
            writeln!(
                f,
                " {}{}",
                facts.min_count,
                if facts.exact { "" } else { "+" }
            )?;
        }
        write!(f, "  {}", self.resolved)
    }
}
