// Feed trait for state-vector data access

use crate::domain::aircraft::Observation;
use crate::domain::geo::Bbox;
use async_trait::async_trait;
use thiserror::Error;

/// Whole-request feed failures. Malformed individual records are dropped at
/// the decode boundary and never reach this taxonomy.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network error, timeout, or non-2xx status. Retried up to the bound.
    #[error("upstream request failed: {0}")]
    Transient(#[from] reqwest::Error),

    /// Response decoded but did not have the expected shape.
    #[error("unexpected upstream schema: {0}")]
    UnexpectedSchema(String),

    /// Every attempt of one fetch cycle failed.
    #[error("all {attempts} fetch attempts failed")]
    Exhausted { attempts: u32 },
}

#[async_trait]
pub trait StateVectorFeed: Send + Sync {
    /// Fetch all state vectors inside `bbox`, making up to `retries`
    /// sequential attempts before giving up with `FeedError::Exhausted`.
    async fn fetch(&self, bbox: Bbox, retries: u32) -> Result<Vec<Observation>, FeedError>;
}
