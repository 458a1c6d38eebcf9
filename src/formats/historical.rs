//! Historical election tables: CSV files with one row per party and one
//! column per province, folded into the configured regions and
//! normalized to fractional shares.

use crate::config;
use crate::formats::{DataError, Result};
use crate::model::RegionPolling;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

lazy_static! {
    // Party labels folded into the catch-all even though they look like
    // distinct parties in the raw tables.
    static ref FOLDED_PARTY_RX: Regex =
        Regex::new(r"LIBERTARIAN|PARTI LIBERTARIEN").unwrap();
}

/// Normalize a raw party label from a results table. Labels outside the
/// tracked party set fold into the catch-all bucket.
fn normalize_party(raw: &str) -> String {
    let norm = raw.trim().to_uppercase();
    if FOLDED_PARTY_RX.is_match(&norm) || !config::VALID_PARTIES.contains(&norm.as_str()) {
        config::OTHER_PARTY.to_string()
    } else {
        norm
    }
}

/// Match a results column to a configured region, if any of the
/// region's province names appears in the column header.
fn resolve_region(column: &str) -> Option<&'static str> {
    for (region, names) in config::REGION_GROUPS.iter() {
        if names.iter().any(|name| column.contains(*name)) {
            return Some(*region);
        }
    }
    None
}

/// Parse one election table: fold columns into regions, fold party
/// labels, sum votes, and normalize each region to fractions of its
/// total.
pub fn parse_region_shares<R: Read>(reader: R) -> Result<RegionPolling> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();
    let column_regions: Vec<Option<&'static str>> =
        headers.iter().skip(1).map(resolve_region).collect();

    let mut cleaned = RegionPolling::new();
    for record in rdr.records() {
        let record = record?;
        let party = match record.get(0) {
            Some(label) => normalize_party(label),
            None => continue,
        };
        for (i, region) in column_regions.iter().enumerate() {
            let region = match region {
                Some(region) => region,
                None => continue,
            };
            let raw = record.get(i + 1).unwrap_or("").trim();
            if raw.is_empty() {
                continue;
            }
            let value: f64 = raw.parse().map_err(|_| DataError::InvalidValue {
                column: headers.get(i + 1).unwrap_or("").to_string(),
                value: raw.to_string(),
            })?;
            *cleaned
                .entry(region.to_string())
                .or_default()
                .entry(party.clone())
                .or_insert(0.0) += value;
        }
    }

    for (region, shares) in cleaned.iter_mut() {
        let total: f64 = shares.values().sum();
        if total <= 0.0 {
            return Err(DataError::EmptyRegion(region.clone()));
        }
        for share in shares.values_mut() {
            *share /= total;
        }
    }
    Ok(cleaned)
}

/// Load one election table from disk.
pub fn load_region_shares(path: &Path) -> Result<RegionPolling> {
    let file = File::open(path)?;
    parse_region_shares(file)
}

/// Load a chronologically ordered run of election tables. At least two
/// are needed to estimate any voter flow.
pub fn load_history(paths: &[PathBuf]) -> Result<Vec<RegionPolling>> {
    if paths.len() < 2 {
        return Err(DataError::NotEnoughHistory {
            required: 2,
            found: paths.len(),
        });
    }
    paths.iter().map(|path| load_region_shares(path)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_fold_into_regions_and_shares_normalize() {
        let table = "\
Party,Ontario,Saskatchewan,Manitoba
LIB,600,100,100
CON,400,300,500
";
        let shares = parse_region_shares(table.as_bytes()).unwrap();

        let ontario = &shares["Ontario"];
        assert!((ontario["LIB"] - 0.6).abs() < 1e-9);
        assert!((ontario["CON"] - 0.4).abs() < 1e-9);

        // Saskatchewan and Manitoba merge into one region.
        let prairies = &shares["Sask. & Man."];
        assert!((prairies["LIB"] - 0.2).abs() < 1e-9);
        assert!((prairies["CON"] - 0.8).abs() < 1e-9);
    }

    #[test]
    fn unknown_parties_fold_into_catch_all() {
        let table = "\
Party,Quebec
lib,500
Rhinoceros,80
Parti Libertarien,20
";
        let shares = parse_region_shares(table.as_bytes()).unwrap();
        let quebec = &shares["Quebec"];
        assert!((quebec["LIB"] - 500.0 / 600.0).abs() < 1e-9);
        assert!((quebec[config::OTHER_PARTY] - 100.0 / 600.0).abs() < 1e-9);
    }

    #[test]
    fn unmatched_columns_are_skipped() {
        let table = "\
Party,Ontario,Yukon
LIB,600,50
CON,400,50
";
        let shares = parse_region_shares(table.as_bytes()).unwrap();
        assert_eq!(shares.len(), 1);
        assert!(shares.contains_key("Ontario"));
    }

    #[test]
    fn region_with_no_votes_is_an_error() {
        let table = "\
Party,Ontario
LIB,0
CON,0
";
        let err = parse_region_shares(table.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::EmptyRegion(region) if region == "Ontario"));
    }

    #[test]
    fn malformed_vote_value_is_an_error() {
        let table = "\
Party,Ontario
LIB,abc
";
        let err = parse_region_shares(table.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::InvalidValue { .. }));
    }

    #[test]
    fn history_needs_two_tables() {
        let err = load_history(&[PathBuf::from("2021.csv")]).unwrap_err();
        assert!(matches!(
            err,
            DataError::NotEnoughHistory { required: 2, found: 1 }
        ));
    }
}
