//! Interactive game against an oracle
//!
//! Reads guesses line by line, asks the oracle for feedback and folds it into
//! the public knowledge until the guess is the only word left.

use crate::core::{Feedback, KnowledgeState, Word};
use crate::output::display::write_history;
use crate::solver::Oracle;
use anyhow::{Context, Result, bail};
use colored::Colorize;
use log::debug;
use std::io::{BufRead, Write};

/// How a game ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub history: Vec<(Word, Feedback)>,
    /// False if input ran out before the word was found
    pub solved: bool,
}

/// Read lines until one holds a guess from `words`; `None` at end of input
fn read_guess<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    words: &[Word],
) -> Result<Option<Word>> {
    let mut line = String::new();
    loop {
        write!(out, "Enter guess: ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        match Word::new(line.trim()) {
            Ok(guess) if words.contains(&guess) => return Ok(Some(guess)),
            Ok(_) => writeln!(out, "{}", "Word is not in the word list".red())?,
            Err(e) => writeln!(out, "{}", format!("Invalid guess: {e}").red())?,
        }
    }
}

/// Play one game against `oracle`
///
/// # Errors
///
/// Returns an error on I/O failure, if the oracle cannot answer, or if a
/// fixed-secret oracle's answers stop matching its own secret.
pub fn run_play<O, R, W>(oracle: &mut O, words: &[Word], mut input: R, out: &mut W) -> Result<GameSummary>
where
    O: Oracle,
    R: BufRead,
    W: Write,
{
    let mut state = KnowledgeState::new();
    let mut history = Vec::new();

    loop {
        write_history(out, &history)?;
        let Some(guess) = read_guess(&mut input, out, words)? else {
            return Ok(GameSummary {
                history,
                solved: false,
            });
        };

        let feedback = oracle.respond(&state, &guess)?;
        history.push((guess, feedback));
        state = state
            .apply(&guess, &feedback)
            .with_context(|| format!("feedback {feedback} for {guess} contradicts earlier answers"))?;
        debug!("Knowledge:\n{state}");

        if state.final_word() == Some(guess) {
            break;
        }

        if let Some(secret) = oracle.secret().filter(|s| !state.matches(s)) {
            bail!("knowledge no longer matches the secret {secret}");
        }

        match state.candidates(words).next() {
            Some(possible) => writeln!(out, "Possible: {possible}")?,
            None => writeln!(out, "{}", "No possible words!".red().bold())?,
        }
    }

    write_history(out, &history)?;
    writeln!(
        out,
        "{}",
        format!("Good job! Solved in {} guesses", history.len())
            .green()
            .bold()
    )?;
    Ok(GameSummary {
        history,
        solved: true,
    })
}
