//! Wallet signer seam
//!
//! The pipeline never signs anything itself. An operation builds
//! [`CreateTxOptions`] and hands them to a [`TxSigner`], which reports the
//! broadcast hash through a [`TxHashSender`] as soon as it is known.

use anchor_config::TxFeeConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::oneshot;

/// Amount of a native denom, both in chain notation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// CosmWasm `MsgExecuteContract`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsgExecuteContract {
    pub sender: String,
    pub contract: String,
    pub execute_msg: serde_json::Value,
    #[serde(default)]
    pub coins: Vec<Coin>,
}

/// Gas limit and fee amount of a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    pub gas: u64,
    pub amount: Vec<Coin>,
}

impl From<&TxFeeConfig> for Fee {
    fn from(config: &TxFeeConfig) -> Self {
        Self {
            gas: config.gas_limit,
            amount: vec![Coin::new("uusd", config.fixed_gas_uusd.to_string())],
        }
    }
}

/// Everything the signer needs to build, sign and broadcast a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTxOptions {
    pub msgs: Vec<MsgExecuteContract>,
    pub fee: Fee,
    pub gas_adjustment: f64,
}

impl CreateTxOptions {
    pub fn new(msgs: Vec<MsgExecuteContract>, fee: &TxFeeConfig) -> Self {
        Self {
            msgs,
            fee: Fee::from(fee),
            gas_adjustment: fee.gas_adjustment,
        }
    }
}

/// Outcome of a successful broadcast
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostResult {
    pub tx_hash: String,
    #[serde(default)]
    pub raw_log: String,
}

/// One-shot channel the signer uses to report the hash before the broadcast
/// call returns.
#[derive(Debug)]
pub struct TxHashSender(oneshot::Sender<String>);

impl TxHashSender {
    pub fn channel() -> (Self, oneshot::Receiver<String>) {
        let (tx, rx) = oneshot::channel();
        (Self(tx), rx)
    }

    /// Consumes the sender; a closed receiver is not an error.
    pub fn send(self, tx_hash: impl Into<String>) {
        let _ = self.0.send(tx_hash.into());
    }
}

/// Wallet errors, surfaced to the caller unchanged
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignerError {
    #[error("User denied the transaction")]
    UserDenied,

    #[error("Failed to create transaction: {0}")]
    CreateTxFailed(String),

    #[error("Transaction failed: {0}")]
    TxFailed(String),

    #[error("Wallet timed out")]
    Timeout,

    #[error("Signer error: {0}")]
    Other(String),
}

/// Signs and broadcasts transactions on behalf of the connected wallet
#[async_trait]
pub trait TxSigner: Send + Sync {
    /// Broadcasts the transaction. Implementations should call
    /// `on_tx_hash.send` as soon as the hash is known.
    async fn post(
        &self,
        options: CreateTxOptions,
        on_tx_hash: TxHashSender,
    ) -> Result<PostResult, SignerError>;
}
