//! Formatting utilities for terminal output

use crate::core::{Feedback, Mark, Word};
use crate::solver::RoundStats;
use colored::Colorize;

/// Format feedback as an emoji string
#[must_use]
pub fn feedback_to_emoji(feedback: &Feedback) -> String {
    feedback
        .marks()
        .iter()
        .map(|mark| match mark {
            Mark::Absent => '⬜',
            Mark::Displaced => '🟨',
            Mark::Exact => '🟩',
        })
        .collect()
}

/// Render each letter of a guess on the background color of its mark
#[must_use]
pub fn colored_guess(guess: &Word, feedback: &Feedback) -> String {
    guess
        .to_string()
        .chars()
        .zip(feedback.marks())
        .map(|(letter, mark)| {
            let tile = format!(" {letter} ");
            match mark {
                Mark::Absent => tile.white().on_bright_black().to_string(),
                Mark::Displaced => tile.black().on_yellow().to_string(),
                Mark::Exact => tile.black().on_green().to_string(),
            }
        })
        .collect()
}

/// One-line progress message for a solver round
#[must_use]
pub fn round_message(stats: &RoundStats) -> String {
    format!(
        "round {}: {} player / {} server solved, {} / {} waiting, +{}",
        stats.round,
        stats.player_solved,
        stats.server_solved,
        stats.player_pending,
        stats.server_pending,
        stats.committed
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_to_emoji_all_absent() {
        assert_eq!(feedback_to_emoji(&Feedback::ABSENT), "⬜⬜⬜⬜⬜");
    }

    #[test]
    fn feedback_to_emoji_all_exact() {
        assert_eq!(feedback_to_emoji(&Feedback::PERFECT), "🟩🟩🟩🟩🟩");
    }

    #[test]
    fn feedback_to_emoji_follows_positions() {
        let feedback: Feedback = "GY__G".parse().unwrap();
        assert_eq!(feedback_to_emoji(&feedback), "🟩🟨⬜⬜🟩");
    }

    #[test]
    fn colored_guess_keeps_letters_in_order() {
        let guess = Word::new("ABIDE").unwrap();
        let rendered = colored_guess(&guess, &"GG__G".parse().unwrap());
        let positions: Vec<_> = ["A", "B", "I", "D", "E"]
            .iter()
            .map(|letter| rendered.find(&format!(" {letter} ")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn round_message_lists_counters() {
        let stats = RoundStats {
            round: 3,
            player_solved: 10,
            server_solved: 40,
            player_pending: 2,
            server_pending: 7,
            committed: 12,
        };
        assert_eq!(
            round_message(&stats),
            "round 3: 10 player / 40 server solved, 2 / 7 waiting, +12"
        );
    }
}
