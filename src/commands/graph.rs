use crate::config;
use crate::formats::historical;
use crate::model::transition::TransitionGraph;
use colored::Colorize;
use itertools::Itertools;
use std::cmp::Ordering;
use std::error::Error;
use std::path::PathBuf;

/// Build the transition graph from historical tables and dump its
/// edges, heaviest flow first.
pub fn graph(history: &[PathBuf]) -> Result<(), Box<dyn Error>> {
    let elections = historical::load_history(history)?;
    let graph = TransitionGraph::from_history(&elections);

    println!(
        "🔀 Transition graph from {} elections: {} parties, {} flows",
        elections.len().to_string().bright_yellow(),
        graph.node_count().to_string().bright_yellow(),
        graph.edge_count().to_string().bright_yellow()
    );

    let edges = graph
        .edges()
        .sorted_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(Ordering::Equal));
    for (from, to, weight) in edges {
        let from_color = config::PARTY_COLORS.get(from).copied().unwrap_or("white");
        let to_color = config::PARTY_COLORS.get(to).copied().unwrap_or("white");
        println!(
            "  {} -> {}: {:.3}",
            from.color(from_color),
            to.color(to_color),
            weight
        );
    }

    Ok(())
}
