//! Rendered transaction phases
//!
//! A submission moves through `Broadcasting -> InProgress -> {Succeed, Fail}`.
//! Every transition produces a fresh [`TxResultRendering`]; renderings are
//! never mutated once built.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Phase of a transaction stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TxStreamPhase {
    Broadcasting,
    InProgress,
    Succeed,
    Fail,
}

impl TxStreamPhase {
    /// `Succeed` and `Fail` end the stream
    pub fn is_terminal(&self) -> bool {
        matches!(self, TxStreamPhase::Succeed | TxStreamPhase::Fail)
    }
}

impl fmt::Display for TxStreamPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TxStreamPhase::Broadcasting => "BROADCASTING",
            TxStreamPhase::InProgress => "IN_PROGRESS",
            TxStreamPhase::Succeed => "SUCCEED",
            TxStreamPhase::Fail => "FAIL",
        };
        f.write_str(name)
    }
}

/// One `name: value` line of a receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxReceipt {
    pub name: String,
    pub value: String,
}

impl TxReceipt {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for TxReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// Why a confirmed transaction could not be rendered as a success
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RenderFailure {
    #[error("failed to find raw log")]
    MissingRawLog,

    #[error("failed to find events: {0}")]
    MissingEvent(String),

    #[error("failed to parse tx result")]
    ParseFailure,

    #[error("transaction failed on chain (code {code}): {raw_log}")]
    OnChain { code: u32, raw_log: String },
}

/// Renderable snapshot of a transaction stream
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TxResultRendering {
    pub phase: TxStreamPhase,
    pub receipts: Vec<TxReceipt>,
    /// Operation-specific payload
    pub value: Option<serde_json::Value>,
    pub failure: Option<RenderFailure>,
}

impl TxResultRendering {
    pub fn broadcasting(receipts: Vec<TxReceipt>) -> Self {
        Self::with_phase(TxStreamPhase::Broadcasting, receipts)
    }

    pub fn in_progress(receipts: Vec<TxReceipt>) -> Self {
        Self::with_phase(TxStreamPhase::InProgress, receipts)
    }

    pub fn succeed(receipts: Vec<TxReceipt>, value: Option<serde_json::Value>) -> Self {
        Self {
            value,
            ..Self::with_phase(TxStreamPhase::Succeed, receipts)
        }
    }

    pub fn fail(failure: RenderFailure, receipts: Vec<TxReceipt>) -> Self {
        Self {
            failure: Some(failure),
            ..Self::with_phase(TxStreamPhase::Fail, receipts)
        }
    }

    fn with_phase(phase: TxStreamPhase, receipts: Vec<TxReceipt>) -> Self {
        Self {
            phase,
            receipts,
            value: None,
            failure: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Human-readable diagnostic of a failed rendering
    pub fn message(&self) -> Option<String> {
        self.failure.as_ref().map(ToString::to_string)
    }

    pub fn receipt(&self, name: &str) -> Option<&str> {
        self.receipts
            .iter()
            .find(|receipt| receipt.name == name)
            .map(|receipt| receipt.value.as_str())
    }
}
