//! Wordle Minimax - CLI
//!
//! Solve the adversarial game to a fixpoint, play against an oracle, or score
//! a single guess.

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{info, warn};
use std::io;
use std::path::{Path, PathBuf};
use wordle_minimax::{
    commands::{SolveOptions, run_play, run_solve},
    core::{Feedback, Word},
    output::{print_score, print_solve_summary},
    solver::{OracleType, SolverConfig, Standard},
    wordlists::load_from_file,
};

#[derive(Parser)]
#[command(
    name = "wordle_minimax",
    about = "Exact minimax Wordle solver with resumable checkpoints",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the worst-case number of guesses from the empty state
    Solve {
        /// Word list file (6-byte records)
        #[arg(short = 'w', long)]
        wordlist: PathBuf,

        /// Checkpoint file to resume from and save to
        #[arg(short, long)]
        checkpoint: Option<PathBuf>,

        /// Stop after this many rounds
        #[arg(long)]
        max_rounds: Option<usize>,

        /// Save the checkpoint every N rounds
        #[arg(long, default_value = "1")]
        checkpoint_every: usize,

        /// Ignore an existing checkpoint
        #[arg(long)]
        fresh: bool,
    },

    /// Play against an oracle: standard or absurd
    Play {
        /// Oracle: standard (fixed secret) or absurd (adversarial)
        oracle: String,

        /// Word list file (6-byte records)
        #[arg(short = 'w', long)]
        wordlist: PathBuf,

        /// Secret for the standard oracle (random if omitted)
        #[arg(short, long)]
        secret: Option<String>,
    },

    /// Print the feedback a guess receives against a secret
    Score { guess: String, secret: String },
}

fn load_words(path: &Path) -> Result<Vec<Word>> {
    let words =
        load_from_file(path).with_context(|| format!("loading word list {}", path.display()))?;
    if words.is_empty() {
        bail!("word list {} is empty", path.display());
    }
    info!("Loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            wordlist,
            checkpoint,
            max_rounds,
            checkpoint_every,
            fresh,
        } => {
            let words = load_words(&wordlist)?;
            let options = SolveOptions {
                config: SolverConfig {
                    checkpoint,
                    checkpoint_every,
                    max_rounds,
                },
                fresh,
            };
            let summary = run_solve(&words, options)?;
            print_solve_summary(&summary);
            Ok(())
        }
        Commands::Play {
            oracle,
            wordlist,
            secret,
        } => {
            let words = load_words(&wordlist)?;
            run_play_command(&oracle, &words, secret.as_deref())
        }
        Commands::Score { guess, secret } => {
            let guess = Word::new(&guess).context("invalid guess")?;
            let secret = Word::new(&secret).context("invalid secret")?;
            print_score(&guess, &secret, &Feedback::score(&secret, &guess));
            Ok(())
        }
    }
}

fn run_play_command(name: &str, words: &[Word], secret: Option<&str>) -> Result<()> {
    let mut oracle = match (name, secret) {
        ("standard", Some(text)) => {
            let secret = Word::new(text).context("invalid secret")?;
            if !words.contains(&secret) {
                warn!("Secret {secret} is not in the word list");
            }
            OracleType::Standard(Standard::new(secret))
        }
        (_, Some(_)) => bail!("--secret only applies to the standard oracle"),
        _ => OracleType::from_name(name, words)?
            .ok_or_else(|| anyhow!("unknown oracle {name:?}, expected standard or absurd"))?,
    };

    let summary = run_play(&mut oracle, words, io::stdin().lock(), &mut io::stdout())?;
    if !summary.solved {
        println!("\nGame abandoned after {} guesses", summary.history.len());
    }
    Ok(())
}
