// Error taxonomy for loading and selection
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("required column `{0}` is missing")]
    MissingColumn(&'static str),

    #[error("row {row}: unparsable INCIDENT_DATE `{value}`")]
    InvalidTimestamp { row: usize, value: String },

    #[error("loader task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("unknown day of week `{0}`")]
    UnknownDay(String),
}
