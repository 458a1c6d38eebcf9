//! The election tree: country, province, and seat nodes.
//!
//! Polling is supplied per province, never per seat, so the seat level
//! takes an already-scoped [`PartyShares`] while the levels above take
//! the full [`RegionPolling`] snapshot and slice it on the way down.
//! Results are stored on every node after a pass and must be cleared
//! with `reset_results` before the next trial.

use crate::model::seat::simulate_seat;
use crate::model::transition::TransitionGraph;
use crate::model::{PartyShares, RegionPolling, Result, SeatCounts, SimulationError};
use rand::Rng;
use std::collections::BTreeMap;

/// Leaf node: a single seat, won by exactly one party per trial.
#[derive(Debug, Clone)]
pub struct SeatNode {
    pub name: String,
    pub results: SeatCounts,
}

impl SeatNode {
    fn new(name: String) -> Self {
        SeatNode {
            name,
            results: SeatCounts::new(),
        }
    }

    pub fn simulate<R: Rng>(
        &mut self,
        polling: &PartyShares,
        graph: Option<&TransitionGraph>,
        margin: f64,
        rng: &mut R,
    ) -> Result<SeatCounts> {
        if polling.is_empty() {
            return Err(SimulationError::StarvedSeat(self.name.clone()));
        }
        self.results = simulate_seat(polling, graph, margin, rng)?;
        Ok(self.results.clone())
    }

    pub fn reset_results(&mut self) {
        self.results.clear();
    }
}

/// A province holding a fixed number of seats.
#[derive(Debug, Clone)]
pub struct ProvinceNode {
    pub name: String,
    pub num_seats: u32,
    pub seats: Vec<SeatNode>,
    pub results: SeatCounts,
}

impl ProvinceNode {
    fn new(name: String, num_seats: u32) -> Self {
        let seats = (1..=num_seats)
            .map(|i| SeatNode::new(format!("{}_Seat_{}", name, i)))
            .collect();
        ProvinceNode {
            name,
            num_seats,
            seats,
            results: SeatCounts::new(),
        }
    }

    /// Simulate every seat in this province against the province's own
    /// slice of the snapshot. A region missing from the snapshot
    /// defaults to an empty slice, which starves its seats and surfaces
    /// as [`SimulationError::StarvedSeat`].
    pub fn simulate<R: Rng>(
        &mut self,
        polling: &RegionPolling,
        graph: Option<&TransitionGraph>,
        margin: f64,
        rng: &mut R,
    ) -> Result<SeatCounts> {
        self.results.clear();
        let local = polling.get(&self.name).cloned().unwrap_or_default();
        for seat in &mut self.seats {
            let seat_result = seat.simulate(&local, graph, margin, rng)?;
            for (party, count) in seat_result {
                *self.results.entry(party).or_insert(0) += count;
            }
        }
        Ok(self.results.clone())
    }

    pub fn reset_results(&mut self) {
        self.results.clear();
        for seat in &mut self.seats {
            seat.reset_results();
        }
    }
}

/// Root of the election tree.
#[derive(Debug, Clone)]
pub struct CountryNode {
    pub name: String,
    pub provinces: Vec<ProvinceNode>,
    pub results: SeatCounts,
}

impl CountryNode {
    pub fn simulate<R: Rng>(
        &mut self,
        polling: &RegionPolling,
        graph: Option<&TransitionGraph>,
        margin: f64,
        rng: &mut R,
    ) -> Result<SeatCounts> {
        self.results.clear();
        for province in &mut self.provinces {
            let province_result = province.simulate(polling, graph, margin, rng)?;
            for (party, count) in province_result {
                *self.results.entry(party).or_insert(0) += count;
            }
        }
        Ok(self.results.clone())
    }

    pub fn reset_results(&mut self) {
        self.results.clear();
        for province in &mut self.provinces {
            province.reset_results();
        }
    }

    /// Number of leaf seats under the root.
    pub fn total_seats(&self) -> u32 {
        self.provinces.iter().map(|p| p.num_seats).sum()
    }
}

/// Build the country → province → seat tree from a region seat table.
/// Seat leaves are named deterministically, `{region}_Seat_{i}`,
/// 1-based.
pub fn build_tree(name: &str, seats_by_region: &BTreeMap<String, u32>) -> CountryNode {
    let provinces = seats_by_region
        .iter()
        .map(|(region, num_seats)| ProvinceNode::new(region.clone(), *num_seats))
        .collect();
    CountryNode {
        name: name.to_string(),
        provinces,
        results: SeatCounts::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn national_seat_table() -> BTreeMap<String, u32> {
        config::SEATS_BY_REGION
            .iter()
            .map(|(region, seats)| (region.to_string(), *seats))
            .collect()
    }

    fn uniform_polling(regions: &BTreeMap<String, u32>) -> RegionPolling {
        let mut polling = RegionPolling::new();
        for region in regions.keys() {
            let mut shares = PartyShares::new();
            shares.insert("LIB".to_string(), 0.4);
            shares.insert("CON".to_string(), 0.4);
            shares.insert("NDP".to_string(), 0.2);
            polling.insert(region.clone(), shares);
        }
        polling
    }

    #[test]
    fn tree_shape_matches_seat_table() {
        let table = national_seat_table();
        let tree = build_tree(config::COUNTRY_NAME, &table);

        assert_eq!(tree.provinces.len(), 6);
        assert_eq!(tree.total_seats(), 340);
        for province in &tree.provinces {
            assert_eq!(province.seats.len(), province.num_seats as usize);
            assert_eq!(table[&province.name], province.num_seats);
        }
    }

    #[test]
    fn seat_names_are_one_based_and_deterministic() {
        let mut table = BTreeMap::new();
        table.insert("Ontario".to_string(), 3);
        let tree = build_tree("Canada", &table);

        let names: Vec<&str> = tree.provinces[0]
            .seats
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Ontario_Seat_1", "Ontario_Seat_2", "Ontario_Seat_3"]);
    }

    #[test]
    fn national_result_sums_to_total_seats() {
        let table = national_seat_table();
        let polling = uniform_polling(&table);
        let mut tree = build_tree(config::COUNTRY_NAME, &table);
        let mut rng = StdRng::seed_from_u64(23);

        let results = tree.simulate(&polling, None, 0.03, &mut rng).unwrap();
        let total: u32 = results.values().sum();
        assert_eq!(total, 340);
    }

    #[test]
    fn province_result_sums_to_its_seat_count() {
        let table = national_seat_table();
        let polling = uniform_polling(&table);
        let mut tree = build_tree(config::COUNTRY_NAME, &table);
        let mut rng = StdRng::seed_from_u64(29);

        tree.simulate(&polling, None, 0.03, &mut rng).unwrap();
        for province in &tree.provinces {
            let total: u32 = province.results.values().sum();
            assert_eq!(total, province.num_seats);
        }
    }

    #[test]
    fn reset_clears_every_node() {
        let table = national_seat_table();
        let polling = uniform_polling(&table);
        let mut tree = build_tree(config::COUNTRY_NAME, &table);
        let mut rng = StdRng::seed_from_u64(31);

        tree.simulate(&polling, None, 0.03, &mut rng).unwrap();
        tree.reset_results();

        assert!(tree.results.is_empty());
        for province in &tree.provinces {
            assert!(province.results.is_empty());
            for seat in &province.seats {
                assert!(seat.results.is_empty());
            }
        }
    }

    #[test]
    fn missing_region_starves_its_seats() {
        let table = national_seat_table();
        let mut polling = uniform_polling(&table);
        polling.remove("Quebec");

        let mut tree = build_tree(config::COUNTRY_NAME, &table);
        let mut rng = StdRng::seed_from_u64(37);

        let err = tree.simulate(&polling, None, 0.03, &mut rng).unwrap_err();
        match err {
            SimulationError::StarvedSeat(name) => assert!(name.starts_with("Quebec")),
            other => panic!("unexpected error: {}", other),
        }
    }
}
