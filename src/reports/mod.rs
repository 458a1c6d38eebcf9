//! Report output: a JSON document for downstream presentation and a
//! colored console summary.

use crate::config;
use crate::model::simulation::SimulationOutcome;
use chrono::{DateTime, Utc};
use colored::Colorize;
use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ReportResult<T> = std::result::Result<T, ReportError>;

/// Full simulation report matching the JSON format consumed by the
/// presentation layer.
#[derive(Debug, Serialize, Deserialize)]
pub struct SimulationReport {
    pub info: RunInfo,
    pub parties: Vec<PartyOutcome>,
    #[serde(rename = "seatDistribution")]
    pub seat_distribution: BTreeMap<String, Vec<u32>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RunInfo {
    pub trials: usize,
    pub margin: f64,
    pub seed: Option<u64>,
    #[serde(rename = "graphApplied")]
    pub graph_applied: bool,
    #[serde(rename = "totalSeats")]
    pub total_seats: u32,
    #[serde(rename = "generatedAt")]
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PartyOutcome {
    pub party: String,
    #[serde(rename = "meanSeats")]
    pub mean_seats: f64,
    #[serde(rename = "minSeats")]
    pub min_seats: u32,
    #[serde(rename = "maxSeats")]
    pub max_seats: u32,
    pub majority: f64,
    pub minority: f64,
    #[serde(rename = "noWin")]
    pub no_win: f64,
}

/// Build the report document from an aggregated outcome, strongest
/// party first.
pub fn build_report(
    outcome: &SimulationOutcome,
    margin: f64,
    seed: Option<u64>,
    graph_applied: bool,
) -> SimulationReport {
    let mut parties: Vec<PartyOutcome> = outcome
        .seat_distribution
        .iter()
        .map(|(party, sequence)| {
            let mean_seats =
                sequence.iter().map(|&c| c as f64).sum::<f64>() / sequence.len() as f64;
            let (min_seats, max_seats) = match sequence.iter().copied().minmax() {
                MinMaxResult::NoElements => (0, 0),
                MinMaxResult::OneElement(only) => (only, only),
                MinMaxResult::MinMax(min, max) => (min, max),
            };
            let stats = &outcome.win_stats[party];
            PartyOutcome {
                party: party.clone(),
                mean_seats,
                min_seats,
                max_seats,
                majority: stats.majority,
                minority: stats.minority,
                no_win: stats.no_win,
            }
        })
        .collect();
    parties.sort_by(|a, b| {
        b.mean_seats
            .partial_cmp(&a.mean_seats)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.party.cmp(&b.party))
    });

    SimulationReport {
        info: RunInfo {
            trials: outcome.trials,
            margin,
            seed,
            graph_applied,
            total_seats: outcome.total_seats,
            generated_at: Utc::now(),
        },
        parties,
        seat_distribution: outcome.seat_distribution.clone(),
    }
}

/// Write the report as pretty-printed JSON.
pub fn write_report(report: &SimulationReport, path: &Path) -> ReportResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}

/// Print a colored per-party summary table.
pub fn print_summary(report: &SimulationReport) {
    println!("\n{}", "📊 Simulation Summary".bright_cyan().bold());
    println!("{}", "=".repeat(62).bright_cyan());
    println!(
        "{:<6} {:>10} {:>9} {:>11} {:>11} {:>9}",
        "Party", "Mean", "Range", "Majority", "Minority", "No win"
    );

    for outcome in &report.parties {
        let color = config::PARTY_COLORS
            .get(outcome.party.as_str())
            .copied()
            .unwrap_or("white");
        println!(
            "{:<6} {:>10.1} {:>9} {:>10.1}% {:>10.1}% {:>8.1}%",
            outcome.party.color(color).bold(),
            outcome.mean_seats,
            format!("{}-{}", outcome.min_seats, outcome.max_seats),
            100.0 * outcome.majority,
            100.0 * outcome.minority,
            100.0 * outcome.no_win,
        );
    }

    println!("{}", "-".repeat(62).bright_cyan());
    println!(
        "{}: {} seats, majority at {}, {} trials",
        "Race".bright_white().bold(),
        report.info.total_seats.to_string().bright_green(),
        config::MAJORITY_THRESHOLD,
        report.info.trials.to_string().bright_green(),
    );
}
