//! Fixed national configuration: seat counts, thresholds, and the party
//! universe used when cleaning raw data.

use lazy_static::lazy_static;
use std::collections::BTreeMap;

/// Name of the root node of the election tree.
pub const COUNTRY_NAME: &str = "Canada";

/// Seats needed for a parliamentary majority.
pub const MAJORITY_THRESHOLD: u32 = 172;

/// Catch-all party bucket. Never adjusted by the transition graph.
pub const OTHER_PARTY: &str = "OTH";

/// Parties tracked individually; everything else folds into `OTH`.
pub const VALID_PARTIES: &[&str] = &["LIB", "CON", "NDP", "GRN", "BQ", "PPC"];

/// How strongly transition-graph inflow shifts a party's polling.
pub const INFLUENCE_FACTOR: f64 = 0.2;

/// Default per-party polling noise applied to each simulated seat.
pub const DEFAULT_MARGIN: f64 = 0.03;

/// Scale applied to `min(prev, curr)` when estimating voter flow
/// between two parties from a pair of historical elections.
pub const TRANSITION_FLOW_FACTOR: f64 = 0.5;

lazy_static! {
    /// Seat distribution by region. Sums to the 340-seat legislature.
    pub static ref SEATS_BY_REGION: BTreeMap<&'static str, u32> = {
        let mut m = BTreeMap::new();
        m.insert("British Columbia", 43);
        m.insert("Alberta", 37);
        m.insert("Sask. & Man.", 28);
        m.insert("Ontario", 122);
        m.insert("Quebec", 78);
        m.insert("Atlantic Canada", 32);
        m
    };

    /// Maps each configured region to the province names that appear in
    /// raw historical result columns. Used when folding constituency
    /// columns into regions.
    pub static ref REGION_GROUPS: BTreeMap<&'static str, Vec<&'static str>> = {
        let mut m = BTreeMap::new();
        m.insert("British Columbia", vec!["British Columbia"]);
        m.insert("Alberta", vec!["Alberta"]);
        m.insert("Sask. & Man.", vec!["Saskatchewan", "Manitoba"]);
        m.insert("Ontario", vec!["Ontario"]);
        m.insert("Quebec", vec!["Quebec"]);
        m.insert(
            "Atlantic Canada",
            vec![
                "Newfoundland and Labrador",
                "Prince Edward Island",
                "Nova Scotia",
                "New Brunswick",
            ],
        );
        m
    };

    /// Terminal colors for the console summary.
    pub static ref PARTY_COLORS: BTreeMap<&'static str, &'static str> = {
        let mut m = BTreeMap::new();
        m.insert("LIB", "red");
        m.insert("CON", "blue");
        m.insert("NDP", "yellow");
        m.insert("GRN", "green");
        m.insert("BQ", "cyan");
        m.insert("PPC", "magenta");
        m.insert("OTH", "white");
        m
    };
}

/// Total number of seats in the legislature.
pub fn total_seats() -> u32 {
    SEATS_BY_REGION.values().sum()
}
