//! Display functions for command results

use super::formatters::{colored_guess, feedback_to_emoji};
use crate::commands::SolveSummary;
use crate::core::{Feedback, Word};
use crate::solver::Rank;
use colored::Colorize;
use std::io::{self, Write};

/// Write every guess so far, one colored row each
///
/// # Errors
///
/// Returns any error from the writer.
pub fn write_history<W: Write>(out: &mut W, history: &[(Word, Feedback)]) -> io::Result<()> {
    for (guess, feedback) in history {
        writeln!(out, "{}", colored_guess(guess, feedback))?;
    }
    Ok(())
}

/// Print a guess scored against a secret
pub fn print_score(guess: &Word, secret: &Word, feedback: &Feedback) {
    println!(
        "{}  {}  {}",
        colored_guess(guess, feedback),
        feedback_to_emoji(feedback),
        feedback
    );
    if feedback.is_perfect() {
        println!("{}", format!("{guess} matches {secret}").green());
    }
}

/// Print the result of a solve run
pub fn print_solve_summary(summary: &SolveSummary) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "MINIMAX SOLVE".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Search:".bright_cyan().bold());
    println!("   Words:            {}", summary.words);
    println!("   Rounds this run:  {}", summary.rounds);
    println!("   Player positions: {}", summary.player_solved);
    println!("   Server positions: {}", summary.server_solved);
    println!("   Time taken:       {:.2}s", summary.duration.as_secs_f64());

    println!();
    match summary.value {
        Some(Rank::Guesses(n)) => {
            println!(
                "{}",
                format!("✅ Worst case: {n} guesses after which the secret is known")
                    .green()
                    .bold()
            );
            if let Some((guess, _)) = summary.best_guess {
                println!("   Best opening guess: {}", guess.to_string().bright_yellow().bold());
            }
        }
        Some(Rank::NoSolution) => {
            println!("{}", "❌ No strategy determines the secret".red().bold());
        }
        None => {
            println!(
                "{}",
                "⏸  Round limit reached; run again to continue from the checkpoint".yellow()
            );
        }
    }
}
