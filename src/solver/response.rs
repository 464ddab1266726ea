//! Choosing feedback for a guess
//!
//! Both the solver's server valuation and the adversarial oracle answer the
//! same question: of every feedback consistent with the current knowledge,
//! which one is worst for the guesser? They differ only in how a successor
//! state is scored, so they share [`rank_responses`].

use crate::core::{Feedback, KnowledgeState, Word};

/// How the caller scores one successor state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<R> {
    /// A finite score; higher is worse for the guesser
    Value(R),
    /// The successor is a dead end and does not count as a branch
    Dead,
    /// The score is not known yet
    Unknown,
    /// This branch makes the guess worthless; stop ranking
    Stalled,
}

/// Outcome of ranking every feedback for a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ranked<R> {
    /// The worst feedback for the guesser and its score
    Best { feedback: Feedback, rank: R },
    /// No feedback led anywhere
    Dead,
    /// At least one score was unknown
    Pending,
    /// Some branch was reported as stalled
    Stalled,
}

/// Every feedback that can follow `state` for `guess`, with the state it leads to
///
/// Feedback the updater rejects is skipped.
#[must_use]
pub fn successors<'a>(
    state: &'a KnowledgeState,
    guess: &'a Word,
) -> impl Iterator<Item = (Feedback, KnowledgeState)> + 'a {
    Feedback::all().filter_map(move |feedback| {
        state
            .apply(guess, &feedback)
            .ok()
            .map(|next| (feedback, next))
    })
}

/// Score every successor of `(state, guess)` and keep the maximum
///
/// Ties keep the feedback that comes first in enumeration order. Unknown
/// scores do not stop the scan, so the scorer sees every successor and can
/// record all of its missing dependencies in one pass.
pub fn rank_responses<R, F>(state: &KnowledgeState, guess: &Word, mut score: F) -> Ranked<R>
where
    R: Ord,
    F: FnMut(&Feedback, &KnowledgeState) -> Step<R>,
{
    let mut best: Option<(Feedback, R)> = None;
    let mut pending = false;

    for (feedback, next) in successors(state, guess) {
        match score(&feedback, &next) {
            Step::Value(rank) => {
                if best.as_ref().is_none_or(|(_, top)| rank > *top) {
                    best = Some((feedback, rank));
                }
            }
            Step::Dead => {}
            Step::Unknown => pending = true,
            Step::Stalled => return Ranked::Stalled,
        }
    }

    match best {
        _ if pending => Ranked::Pending,
        Some((feedback, rank)) => Ranked::Best { feedback, rank },
        None => Ranked::Dead,
    }
}
