pub mod historical;
pub mod polling;

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no polling data in {0}")]
    NoData(String),
    #[error("negative share for {party} in {region}")]
    NegativeShare { region: String, party: String },
    #[error("region {0} has no recorded votes")]
    EmptyRegion(String),
    #[error("invalid vote value {value:?} in column {column:?}")]
    InvalidValue { column: String, value: String },
    #[error("need at least {required} historical elections, got {found}")]
    NotEnoughHistory { required: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, DataError>;
