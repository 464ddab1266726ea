//! Valuation results
//!
//! A [`Rank`] is what gets memoized: either the number of further guesses
//! needed under optimal play, or proof that no determinable outcome exists.
//! [`Decision`] adds the transient "waiting on a dependency" outcome, which is
//! never stored.

use std::fmt;

/// Memoized value of a player or server position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    /// Number of additional guesses needed
    Guesses(u32),
    /// No word (or no feedback) leads to a determinable outcome
    NoSolution,
}

impl Rank {
    /// Wire value: guesses as-is, `-1` for no solution
    #[must_use]
    pub const fn to_raw(self) -> i32 {
        match self {
            Self::Guesses(n) => n as i32,
            Self::NoSolution => -1,
        }
    }

    /// Inverse of [`Rank::to_raw`]; other negative values are invalid
    #[must_use]
    pub const fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            -1 => Some(Self::NoSolution),
            n if n >= 0 => Some(Self::Guesses(n as u32)),
            _ => None,
        }
    }

    /// Number of guesses, if finite
    #[must_use]
    pub const fn guesses(self) -> Option<u32> {
        match self {
            Self::Guesses(n) => Some(n),
            Self::NoSolution => None,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guesses(n) => write!(f, "{n}"),
            Self::NoSolution => write!(f, "no solution"),
        }
    }
}

/// Outcome of one attempt to evaluate a position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Every dependency was cached; the value is final
    Ready(Rank),
    /// Some dependency is not cached yet
    Pending,
}
