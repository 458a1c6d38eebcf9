use crate::config;
use crate::formats::polling;
use colored::Colorize;
use itertools::Itertools;
use std::cmp::Ordering;
use std::error::Error;
use std::path::Path;

/// Validate and dump a polling snapshot against the configured regions.
pub fn info(polling_path: &Path) -> Result<(), Box<dyn Error>> {
    let snapshot = polling::load_polling_snapshot(polling_path)?;
    println!(
        "🗳️  Polling snapshot: {}",
        polling_path.display().to_string().cyan()
    );

    for (region, shares) in &snapshot {
        let total: f64 = shares.values().sum();
        match config::SEATS_BY_REGION.get(region.as_str()) {
            Some(seats) => println!(
                "\n{} ({} seats, shares sum {:.3})",
                region.bright_white().bold(),
                seats,
                total
            ),
            None => println!(
                "\n{} ({}, shares sum {:.3})",
                region.bright_white().bold(),
                "not in the seat table".yellow(),
                total
            ),
        }

        let ranked = shares
            .iter()
            .sorted_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(Ordering::Equal));
        for (party, share) in ranked {
            let color = config::PARTY_COLORS
                .get(party.as_str())
                .copied()
                .unwrap_or("white");
            println!("  {:<4} {:>5.1}%", party.color(color), 100.0 * share);
        }
    }

    let missing: Vec<&str> = config::SEATS_BY_REGION
        .keys()
        .filter(|region| !snapshot.contains_key(**region))
        .copied()
        .collect();
    if missing.is_empty() {
        println!("\n✅ Every configured region is covered");
    } else {
        println!(
            "\n⚠️  Missing regions (their seats cannot be simulated): {}",
            missing.join(", ").yellow()
        );
    }

    Ok(())
}
