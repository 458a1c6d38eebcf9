mod commands;
mod config;
mod formats;
mod model;
mod reports;

use crate::commands::{graph, info, simulate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
struct Opts {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate and dump info about a polling snapshot.
    Info {
        /// Polling snapshot JSON file
        polling: PathBuf,
    },
    /// Build the voter transition graph from historical results and dump it.
    Graph {
        /// Historical election CSVs, oldest first (repeat the flag; at least two)
        #[clap(long)]
        history: Vec<PathBuf>,
    },
    /// Run the seat simulation and report outcome probabilities.
    Simulate {
        /// Polling snapshot JSON file
        polling: PathBuf,
        /// Historical election CSVs, oldest first (repeat the flag)
        #[clap(long)]
        history: Vec<PathBuf>,
        /// Number of simulation trials
        #[clap(long, default_value_t = 1000)]
        trials: usize,
        /// Per-seat polling noise margin
        #[clap(long, default_value_t = 0.03)]
        margin: f64,
        /// Seed for reproducible runs
        #[clap(long)]
        seed: Option<u64>,
        /// Skip the transition-graph adjustment even if history is supplied
        #[clap(long)]
        baseline: bool,
        /// Write the full JSON report here
        #[clap(long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    let opts = Opts::parse();

    let result = match opts.command {
        Command::Info { polling } => info(&polling),
        Command::Graph { history } => graph(&history),
        Command::Simulate {
            polling,
            history,
            trials,
            margin,
            seed,
            baseline,
            out,
        } => simulate(
            &polling,
            &history,
            trials,
            margin,
            seed,
            baseline,
            out.as_deref(),
        ),
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}
