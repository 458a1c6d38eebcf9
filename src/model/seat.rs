//! Single-seat simulation: perturb adjusted polling and draw one winner.

use crate::config;
use crate::model::adjust::adjust_polling;
use crate::model::transition::TransitionGraph;
use crate::model::{PartyShares, Result, SeatCounts, SimulationError};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Simulate one seat.
///
/// The seat's polling is adjusted through the transition graph, each
/// party's share is perturbed by a uniform draw from `[-margin, margin]`
/// and clamped to `[0, 1]`, the clamped shares are renormalized, and a
/// single weighted draw picks the winner. The result maps the winning
/// party to a seat count of 1.
///
/// If clamping pushes every share to zero the winner falls back to a
/// uniform draw over the parties present, so the one-winner-per-seat
/// invariant holds for any non-empty input. The RNG is injected so
/// seeded runs are reproducible.
pub fn simulate_seat<R: Rng>(
    polling: &PartyShares,
    graph: Option<&TransitionGraph>,
    margin: f64,
    rng: &mut R,
) -> Result<SeatCounts> {
    if polling.is_empty() {
        return Err(SimulationError::EmptyPolling);
    }

    let adjusted = adjust_polling(polling, graph, config::INFLUENCE_FACTOR)?;

    let mut parties: Vec<&String> = Vec::with_capacity(adjusted.len());
    let mut weights: Vec<f64> = Vec::with_capacity(adjusted.len());
    for (party, share) in &adjusted {
        let sampled = (share + rng.gen_range(-margin..=margin)).clamp(0.0, 1.0);
        parties.push(party);
        weights.push(sampled);
    }

    let total: f64 = weights.iter().sum();
    let winner = if total > 0.0 {
        for weight in weights.iter_mut() {
            *weight /= total;
        }
        let dist = WeightedIndex::new(&weights)
            .map_err(|e| SimulationError::InvalidWeights(e.to_string()))?;
        parties[dist.sample(rng)]
    } else {
        parties[rng.gen_range(0..parties.len())]
    };

    let mut result = SeatCounts::new();
    result.insert(winner.clone(), 1);
    Ok(result)
}
