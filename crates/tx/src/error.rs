use crate::query::QueryError;
use crate::signer::SignerError;
use thiserror::Error;

/// Errors that end a transaction stream without a rendering
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TxError {
    /// Raised by the wallet/signer, passed through unchanged
    #[error(transparent)]
    Signer(#[from] SignerError),

    /// Raised by the tx-info collaborator, passed through unchanged
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Transaction {hash} was not found after {attempts} attempts")]
    PollExhausted { hash: String, attempts: u32 },

    #[error("Signer did not report a transaction hash")]
    MissingTxHash,

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
}

/// Result type for transaction operations
pub type TxResult<T> = Result<T, TxError>;
