pub mod adjust;
pub mod seat;
pub mod simulation;
pub mod transition;
pub mod tree;

use std::collections::BTreeMap;

/// Party code mapped to fractional vote share.
///
/// Ordered so a seeded simulation consumes random draws in a stable
/// order regardless of how the map was built.
pub type PartyShares = BTreeMap<String, f64>;

/// Region name mapped to that region's party shares.
pub type RegionPolling = BTreeMap<String, PartyShares>;

/// Party code mapped to a seat count.
pub type SeatCounts = BTreeMap<String, u32>;

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("no parties in polling data")]
    EmptyPolling,
    #[error("seat {0} has no polling data to sample from")]
    StarvedSeat(String),
    #[error("adjusted polling shares sum to zero")]
    ZeroShareTotal,
    #[error("invalid selection weights: {0}")]
    InvalidWeights(String),
    #[error("simulation requires at least one trial")]
    NoTrials,
}

pub type Result<T> = std::result::Result<T, SimulationError>;
