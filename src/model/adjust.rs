//! Polling adjustment: bias a raw snapshot toward historically observed
//! voter movement before a seat is sampled.

use crate::config;
use crate::model::transition::TransitionGraph;
use crate::model::{PartyShares, Result, SimulationError};

/// Adjust seat-level polling using the voter transition graph.
///
/// Without a graph the input is returned unchanged. With one, every
/// party present in both the polling and the graph (the catch-all
/// bucket excluded) gains `influence_factor` times the support flowing
/// in from its predecessors, and the result is renormalized to sum
/// to 1.
///
/// Errors with [`SimulationError::ZeroShareTotal`] if the adjusted
/// shares sum to zero; that indicates malformed input polling.
pub fn adjust_polling(
    polling: &PartyShares,
    graph: Option<&TransitionGraph>,
    influence_factor: f64,
) -> Result<PartyShares> {
    let graph = match graph {
        Some(graph) => graph,
        None => return Ok(polling.clone()),
    };

    let mut adjusted = polling.clone();
    for party in polling.keys() {
        if party.as_str() == config::OTHER_PARTY || !graph.contains(party) {
            continue;
        }
        let mut incoming = 0.0;
        for (source, weight) in graph.inflows(party) {
            if weight <= 0.0 {
                continue;
            }
            if let Some(share) = polling.get(source) {
                incoming += share * weight;
            }
        }
        if let Some(share) = adjusted.get_mut(party) {
            *share += influence_factor * incoming;
        }
    }

    let total: f64 = adjusted.values().sum();
    if total <= 0.0 {
        return Err(SimulationError::ZeroShareTotal);
    }
    for share in adjusted.values_mut() {
        *share /= total;
    }
    Ok(adjusted)
}
