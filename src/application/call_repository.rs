// Repository trait for call record ingestion
use crate::domain::call_record::Dataset;
use crate::domain::error::LoadError;
use async_trait::async_trait;

/// Counts from a completed load, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_dropped: usize,
}

#[async_trait]
pub trait CallRepository: Send + Sync {
    /// Load the full dataset once, at startup
    async fn load_dataset(&self) -> Result<(Dataset, LoadReport), LoadError>;
}
