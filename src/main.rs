use clap::{Parser, Subcommand};
use colored::*;
use ranked_tally::formats::read_ballot_file;
use ranked_tally::tally;
use std::path::{Path, PathBuf};

#[derive(Parser)]
struct Opts {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank candidates by first-choice votes.
    Plurality {
        /// JSON ballot file: {"rankings": [{"ranking": [...], "count": N}]}
        ballots_file: PathBuf,
        /// Only report the top N candidates.
        #[clap(long)]
        top: Option<usize>,
    },
    /// Eliminate trailing candidates until one holds a majority.
    InstantRunoff {
        /// JSON ballot file: {"rankings": [{"ranking": [...], "count": N}]}
        ballots_file: PathBuf,
        /// Print each round's eliminated candidate and standing tally.
        #[clap(long)]
        verbose: bool,
        /// Emit the full round-by-round report as JSON.
        #[clap(long)]
        json: bool,
    },
}

fn main() {
    let opts = Opts::parse();

    let result = match opts.command {
        Command::Plurality { ballots_file, top } => run_plurality(&ballots_file, top),
        Command::InstantRunoff {
            ballots_file,
            verbose,
            json,
        } => run_instant_runoff(&ballots_file, verbose, json),
    };

    if let Err(e) = result {
        eprintln!("❌ Tabulation failed: {}", e);
        std::process::exit(1);
    }
}

fn run_plurality(
    ballots_file: &Path,
    top: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let ballots = read_ballot_file(ballots_file)?;

    println!(
        "📊 Tallying {} ballots over {} candidates",
        ballots.num_ballots().to_string().bright_yellow(),
        ballots.num_candidates().to_string().bright_yellow()
    );

    for (candidate, votes) in tally::plurality(&ballots, top) {
        println!(
            "  {:>8}  {}",
            votes.to_string().bright_white().bold(),
            candidate.to_string().bright_cyan()
        );
    }

    Ok(())
}

fn run_instant_runoff(
    ballots_file: &Path,
    verbose: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let ballots = read_ballot_file(ballots_file)?;
    let report = tally::instant_runoff(&ballots)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if verbose {
        for round in &report.rounds {
            println!("{}", format!("Round {}", round.round).bright_cyan().bold());
            for (candidate, votes) in &round.tally {
                println!("  {:>8}  {}", votes, candidate);
            }
            if let Some(eliminated) = &round.eliminated {
                println!("  Eliminated: {}", eliminated.to_string().red());
            }
        }
    }

    println!(
        "🏆 Winner after {} round(s): {}",
        report.rounds.len().to_string().bright_yellow(),
        report.winner.to_string().bright_green().bold()
    );

    Ok(())
}
