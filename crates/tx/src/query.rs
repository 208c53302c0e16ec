use anchor_core::TxInfo;
use async_trait::async_trait;
use thiserror::Error;

/// Chain query errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Unexpected status {0}: {1}")]
    Status(u16, String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Looks up confirmed transactions by hash
#[async_trait]
pub trait TxInfoSource: Send + Sync {
    /// `Ok(None)` while the transaction is not yet included in a block.
    async fn tx_info(&self, tx_hash: &str) -> Result<Option<TxInfo>, QueryError>;
}
