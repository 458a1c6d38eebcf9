//! Trial runner and aggregator: many independent trials over one tree,
//! accumulated into seat distributions and win frequencies.

use crate::config;
use crate::model::transition::TransitionGraph;
use crate::model::tree::{build_tree, CountryNode};
use crate::model::{RegionPolling, Result, SeatCounts, SimulationError};
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};

/// Everything fixed about the race being simulated: the seat table,
/// the majority threshold, and the per-seat polling noise.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub seats_by_region: BTreeMap<String, u32>,
    pub majority_threshold: u32,
    pub margin: f64,
}

impl Default for Scenario {
    /// The configured national race: six regions, 340 seats,
    /// majority at 172.
    fn default() -> Self {
        Scenario {
            seats_by_region: config::SEATS_BY_REGION
                .iter()
                .map(|(region, seats)| (region.to_string(), *seats))
                .collect(),
            majority_threshold: config::MAJORITY_THRESHOLD,
            margin: config::DEFAULT_MARGIN,
        }
    }
}

/// Win-classification frequencies for one party. The three fields sum
/// to 1 across all trials.
#[derive(Debug, Clone, PartialEq)]
pub struct WinStats {
    pub majority: f64,
    pub minority: f64,
    pub no_win: f64,
}

/// Aggregate statistics across all trials.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    pub trials: usize,
    /// Per party, one national seat count per trial (0 when the party
    /// won nothing that trial), in trial order.
    pub seat_distribution: BTreeMap<String, Vec<u32>>,
    pub win_stats: BTreeMap<String, WinStats>,
    pub total_seats: u32,
}

/// One full simulation pass: reset the tree, then simulate from the
/// root. The single entry point used by the aggregator, so a trial can
/// never start from stale results.
pub fn run_trial<R: Rng>(
    tree: &mut CountryNode,
    polling: &RegionPolling,
    graph: Option<&TransitionGraph>,
    margin: f64,
    rng: &mut R,
) -> Result<SeatCounts> {
    tree.reset_results();
    tree.simulate(polling, graph, margin, rng)
}

/// Run `trials` independent trials and aggregate the results.
///
/// The tree is built once and reset between trials. The party universe
/// is the union of every party appearing anywhere in the snapshot; each
/// universe party records a seat count every trial. A trial's unique
/// top party is classified as majority or minority against the
/// scenario threshold; an exact tie classifies nobody, leaving the
/// trial to count toward every party's `no_win`. The RNG is injected
/// so seeded runs are reproducible.
pub fn run_simulation<R: Rng>(
    scenario: &Scenario,
    polling: &RegionPolling,
    trials: usize,
    graph: Option<&TransitionGraph>,
    rng: &mut R,
) -> Result<SimulationOutcome> {
    if trials == 0 {
        return Err(SimulationError::NoTrials);
    }

    let mut tree = build_tree(config::COUNTRY_NAME, &scenario.seats_by_region);

    let parties: BTreeSet<String> = polling
        .values()
        .flat_map(|shares| shares.keys().cloned())
        .collect();
    if parties.is_empty() {
        return Err(SimulationError::EmptyPolling);
    }

    let mut seat_distribution: BTreeMap<String, Vec<u32>> = parties
        .iter()
        .map(|party| (party.clone(), Vec::with_capacity(trials)))
        .collect();
    let mut majority_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut minority_counts: BTreeMap<String, usize> = BTreeMap::new();

    for _ in 0..trials {
        let results = run_trial(&mut tree, polling, graph, scenario.margin, rng)?;

        for party in &parties {
            let count = results.get(party).copied().unwrap_or(0);
            if let Some(sequence) = seat_distribution.get_mut(party) {
                sequence.push(count);
            }
        }

        if let Some(top_seats) = results.values().copied().max() {
            let mut leaders = results
                .iter()
                .filter(|(_, count)| **count == top_seats)
                .map(|(party, _)| party);
            let first = leaders.next();
            if let (Some(winner), None) = (first, leaders.next()) {
                if top_seats >= scenario.majority_threshold {
                    *majority_counts.entry(winner.clone()).or_insert(0) += 1;
                } else {
                    *minority_counts.entry(winner.clone()).or_insert(0) += 1;
                }
            }
        }
    }

    let win_stats = parties
        .iter()
        .map(|party| {
            let majority = majority_counts.get(party).copied().unwrap_or(0);
            let minority = minority_counts.get(party).copied().unwrap_or(0);
            let no_win = trials - majority - minority;
            let stats = WinStats {
                majority: majority as f64 / trials as f64,
                minority: minority as f64 / trials as f64,
                no_win: no_win as f64 / trials as f64,
            };
            (party.clone(), stats)
        })
        .collect();

    Ok(SimulationOutcome {
        trials,
        seat_distribution,
        win_stats,
        total_seats: tree.total_seats(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PartyShares;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn shares(pairs: &[(&str, f64)]) -> PartyShares {
        pairs.iter().map(|(p, v)| (p.to_string(), *v)).collect()
    }

    fn national_polling() -> RegionPolling {
        let mut polling = RegionPolling::new();
        for region in config::SEATS_BY_REGION.keys() {
            polling.insert(
                region.to_string(),
                shares(&[
                    ("LIB", 0.38),
                    ("CON", 0.36),
                    ("NDP", 0.15),
                    ("GRN", 0.04),
                    ("OTH", 0.07),
                ]),
            );
        }
        polling
    }

    #[test]
    fn frequencies_sum_to_one_per_party() {
        let scenario = Scenario::default();
        let polling = national_polling();
        let mut rng = StdRng::seed_from_u64(41);

        let outcome =
            run_simulation(&scenario, &polling, 200, None, &mut rng).unwrap();
        for (party, stats) in &outcome.win_stats {
            let sum = stats.majority + stats.minority + stats.no_win;
            assert!((sum - 1.0).abs() < 1e-9, "{} sums to {}", party, sum);
        }
    }

    #[test]
    fn every_party_records_one_count_per_trial() {
        let scenario = Scenario::default();
        let polling = national_polling();
        let mut rng = StdRng::seed_from_u64(43);

        let trials = 120;
        let outcome =
            run_simulation(&scenario, &polling, trials, None, &mut rng).unwrap();
        assert_eq!(outcome.seat_distribution.len(), 5);
        for (party, sequence) in &outcome.seat_distribution {
            assert_eq!(sequence.len(), trials, "wrong length for {}", party);
        }
    }

    #[test]
    fn each_trial_fills_the_legislature() {
        let scenario = Scenario::default();
        let polling = national_polling();
        let mut rng = StdRng::seed_from_u64(47);

        let trials = 60;
        let outcome =
            run_simulation(&scenario, &polling, trials, None, &mut rng).unwrap();
        for trial in 0..trials {
            let total: u32 = outcome
                .seat_distribution
                .values()
                .map(|sequence| sequence[trial])
                .sum();
            assert_eq!(total, 340);
        }
    }

    #[test]
    fn fringe_party_never_wins() {
        // Margin 0 keeps the noise from ever lifting a 0% party.
        let scenario = Scenario {
            margin: 0.0,
            ..Scenario::default()
        };
        let mut polling = national_polling();
        for shares in polling.values_mut() {
            shares.insert("PPC".to_string(), 0.0);
        }
        let mut rng = StdRng::seed_from_u64(53);

        let outcome =
            run_simulation(&scenario, &polling, 300, None, &mut rng).unwrap();
        let stats = &outcome.win_stats["PPC"];
        assert_eq!(stats.majority, 0.0);
        assert_eq!(stats.minority, 0.0);
        assert_eq!(stats.no_win, 1.0);
        assert!(outcome.seat_distribution["PPC"].iter().all(|&count| count == 0));
    }

    #[test]
    fn seeded_runs_are_identical() {
        let scenario = Scenario::default();
        let polling = national_polling();

        let mut first_rng = StdRng::seed_from_u64(59);
        let mut second_rng = StdRng::seed_from_u64(59);
        let first =
            run_simulation(&scenario, &polling, 80, None, &mut first_rng).unwrap();
        let second =
            run_simulation(&scenario, &polling, 80, None, &mut second_rng).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn forced_tie_classifies_nobody() {
        // Two one-seat provinces, each locked for a different party:
        // every trial ends 1-1.
        let mut seats = BTreeMap::new();
        seats.insert("East".to_string(), 1);
        seats.insert("West".to_string(), 1);
        let scenario = Scenario {
            seats_by_region: seats,
            majority_threshold: 2,
            margin: 0.0,
        };

        let mut polling = RegionPolling::new();
        polling.insert("East".to_string(), shares(&[("LIB", 1.0), ("CON", 0.0)]));
        polling.insert("West".to_string(), shares(&[("LIB", 0.0), ("CON", 1.0)]));

        let mut rng = StdRng::seed_from_u64(61);
        let outcome =
            run_simulation(&scenario, &polling, 50, None, &mut rng).unwrap();

        for party in &["LIB", "CON"] {
            let stats = &outcome.win_stats[*party];
            assert_eq!(stats.majority, 0.0);
            assert_eq!(stats.minority, 0.0);
            assert_eq!(stats.no_win, 1.0);
            assert!(outcome.seat_distribution[*party].iter().all(|&count| count == 1));
        }
    }

    #[test]
    fn zero_trials_is_an_error() {
        let scenario = Scenario::default();
        let polling = national_polling();
        let mut rng = StdRng::seed_from_u64(67);
        let err = run_simulation(&scenario, &polling, 0, None, &mut rng).unwrap_err();
        assert!(matches!(err, SimulationError::NoTrials));
    }
}
