//! Voter transition graph: a weighted directed graph over party codes
//! estimating how support flowed between parties across past elections.

use crate::config;
use crate::model::RegionPolling;
use std::collections::{BTreeMap, BTreeSet};

/// Directed graph of estimated voter flow between parties.
///
/// Edges are stored as an inflow adjacency map (target party to its
/// weighted sources) so the polling adjuster can walk a party's
/// predecessors directly. Self-loops are never stored, and neither are
/// zero or negative flows.
#[derive(Debug, Clone, Default)]
pub struct TransitionGraph {
    inflows: BTreeMap<String, BTreeMap<String, f64>>,
    nodes: BTreeSet<String>,
}

impl TransitionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate flow on the edge `from -> to`. Self-loops and
    /// non-positive flows are ignored.
    pub fn add_flow(&mut self, from: &str, to: &str, weight: f64) {
        if from == to || weight <= 0.0 {
            return;
        }
        self.nodes.insert(from.to_string());
        self.nodes.insert(to.to_string());
        *self
            .inflows
            .entry(to.to_string())
            .or_insert_with(BTreeMap::new)
            .entry(from.to_string())
            .or_insert(0.0) += weight;
    }

    /// Whether the party appears anywhere in the graph. A party absent
    /// from the graph has no modeled inflow.
    pub fn contains(&self, party: &str) -> bool {
        self.nodes.contains(party)
    }

    /// Iterate the weighted sources feeding into `party`.
    pub fn inflows<'a>(&'a self, party: &str) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        self.inflows
            .get(party)
            .into_iter()
            .flat_map(|sources| sources.iter().map(|(from, w)| (from.as_str(), *w)))
    }

    /// Iterate every edge as `(from, to, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.inflows.iter().flat_map(|(to, sources)| {
            sources
                .iter()
                .map(move |(from, w)| (from.as_str(), to.as_str(), *w))
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.inflows.values().map(|sources| sources.len()).sum()
    }

    /// Estimate flow between two chronologically ordered elections.
    ///
    /// For every region present in both tables, flow from each party in
    /// the earlier election to each distinct party in the later one is
    /// `min(prev share, curr share)` scaled by the configured flow
    /// factor, accumulated across regions.
    pub fn from_election_pair(prev: &RegionPolling, curr: &RegionPolling) -> Self {
        let mut graph = Self::new();
        for (region, prev_shares) in prev {
            let curr_shares = match curr.get(region) {
                Some(shares) => shares,
                None => continue,
            };
            for (from_party, prev_share) in prev_shares {
                for (to_party, curr_share) in curr_shares {
                    if from_party == to_party {
                        continue;
                    }
                    let flow = prev_share.min(*curr_share) * config::TRANSITION_FLOW_FACTOR;
                    graph.add_flow(from_party, to_party, flow);
                }
            }
        }
        graph
    }

    /// Additively merge another graph's edges into this one.
    pub fn merge(&mut self, other: &TransitionGraph) {
        for (from, to, weight) in other.edges() {
            self.add_flow(from, to, weight);
        }
    }

    /// Build one combined graph from a chronological run of election
    /// tables, pairing each election with the next and merging the
    /// per-pair graphs. Fewer than two tables yields an empty graph.
    pub fn from_history(elections: &[RegionPolling]) -> Self {
        let mut combined = Self::new();
        for pair in elections.windows(2) {
            let graph = Self::from_election_pair(&pair[0], &pair[1]);
            combined.merge(&graph);
        }
        combined
    }
}
