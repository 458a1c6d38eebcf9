use crate::formats::{historical, polling};
use crate::model::simulation::{run_simulation, Scenario};
use crate::model::transition::TransitionGraph;
use crate::reports;
use colored::Colorize;
use instant::Instant;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::path::{Path, PathBuf};

/// Run the full pipeline: load the polling snapshot, build the
/// transition graph from historical tables (unless running as the
/// no-adjustment baseline), simulate, and report.
pub fn simulate(
    polling_path: &Path,
    history: &[PathBuf],
    trials: usize,
    margin: f64,
    seed: Option<u64>,
    baseline: bool,
    out: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    if margin < 0.0 {
        return Err(format!("margin must be non-negative, got {}", margin).into());
    }

    println!(
        "🗳️  Loading polling snapshot: {}",
        polling_path.display().to_string().cyan()
    );
    let snapshot = polling::load_polling_snapshot(polling_path)?;
    let party_count = snapshot.values().flat_map(|shares| shares.keys()).unique().count();
    println!("   {} regions, {} parties", snapshot.len(), party_count);

    let graph = if baseline {
        println!("{}", "Baseline run: transition graph disabled".yellow());
        None
    } else if history.is_empty() {
        println!("{}", "No historical tables supplied; polling used as-is".yellow());
        None
    } else {
        let elections = historical::load_history(history)?;
        let graph = TransitionGraph::from_history(&elections);
        println!(
            "🔀 Transition graph: {} parties, {} flows",
            graph.node_count().to_string().bright_yellow(),
            graph.edge_count().to_string().bright_yellow()
        );
        Some(graph)
    };

    let scenario = Scenario {
        margin,
        ..Scenario::default()
    };
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    println!("🎲 Running {} trials...", trials.to_string().bright_yellow());
    let start = Instant::now();
    let outcome = run_simulation(&scenario, &snapshot, trials, graph.as_ref(), &mut rng)?;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    let rate = if elapsed_ms > 0 {
        outcome.trials as f64 * 1000.0 / elapsed_ms as f64
    } else {
        0.0
    };
    println!(
        "✅ Completed {} trials in {:.2} seconds ({:.0} trials/sec)",
        outcome.trials.to_string().bright_green(),
        elapsed_ms as f64 / 1000.0,
        rate
    );

    let report = reports::build_report(&outcome, margin, seed, graph.is_some());
    reports::print_summary(&report);

    if let Some(out) = out {
        reports::write_report(&report, out)?;
        println!(
            "\n✅ Report written: {}",
            out.display().to_string().bright_green()
        );
    }

    Ok(())
}
