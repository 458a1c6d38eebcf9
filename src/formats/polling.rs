//! Polling snapshots: JSON documents mapping region name to party
//! shares, produced by an external polling source.

use crate::config;
use crate::formats::{DataError, Result};
use crate::model::RegionPolling;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Load and validate a polling snapshot from disk.
pub fn load_polling_snapshot(path: &Path) -> Result<RegionPolling> {
    let file = File::open(path)?;
    parse_polling_snapshot(file, &path.display().to_string())
}

/// Parse a polling snapshot.
///
/// An empty document is the polling source's "no data" signal and is
/// surfaced as [`DataError::NoData`] so callers skip simulation rather
/// than run against nothing. Negative shares are rejected. Every
/// tracked party plus the catch-all defaults to 0.0 in every region, so
/// downstream code can rely on a complete party universe.
pub fn parse_polling_snapshot<R: Read>(reader: R, source: &str) -> Result<RegionPolling> {
    let mut snapshot: RegionPolling = serde_json::from_reader(reader)?;
    if snapshot.is_empty() {
        return Err(DataError::NoData(source.to_string()));
    }

    for (region, shares) in snapshot.iter_mut() {
        for (party, share) in shares.iter() {
            if *share < 0.0 {
                return Err(DataError::NegativeShare {
                    region: region.clone(),
                    party: party.clone(),
                });
            }
        }
        for party in config::VALID_PARTIES {
            shares.entry(party.to_string()).or_insert(0.0);
        }
        shares.entry(config::OTHER_PARTY.to_string()).or_insert(0.0);
    }
    Ok(snapshot)
}
