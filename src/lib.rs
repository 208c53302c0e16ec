//! # Anchor-RS: transaction pipeline for the Anchor money market
//!
//! This library drives the borrow/mint/deposit flows of the Anchor lending
//! protocol on Terra, from message construction to a rendered receipt:
//!
//! - Micro-denominated notation and arbitrary-precision decimals
//! - Raw log / event / attribute pickers for confirmed transactions
//! - A phase-tracking transaction stream (broadcasting, in progress,
//!   succeed, fail)
//! - Per-operation transactions (UST deposit, bAsset mint)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use anchor_rs::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn run(signer: Arc<dyn TxSigner>) -> Result<(), Box<dyn std::error::Error>> {
//! let config = AnchorConfig::default();
//! let lcd = LcdClient::from_config(&config)?;
//! let refetch = Arc::new(BroadcastRefetcher::new(16));
//!
//! let deposit = DepositUstTx::new(signer, refetch, &config, "terra1...");
//! let stream = TxStream::new(deposit, lcd, &config);
//!
//! let params = DepositUstTxParams { deposit_amount: "100".parse()? };
//! let rendering = stream.run(params, None).await?;
//! println!("{:?}", rendering.phase);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`anchor_core`] - notation, decimals, tx info model and log pickers
//! - [`anchor_config`] - network, fee, polling and contract configuration
//! - [`anchor_tx`] - tx helper, tx stream and per-operation transactions

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub use anchor_config as config;
pub use anchor_core as core;
pub use anchor_tx as tx;

/// Common imports for Anchor transaction flows
pub mod prelude {
    pub use crate::config::{AnchorConfig, NetworkType};
    pub use crate::core::{Decimal, TxInfo};
    pub use crate::tx::{
        BroadcastRefetcher, DepositUstTx, DepositUstTxParams, LcdClient, MintBAssetTx,
        MintBAssetTxParams, TxResultRendering, TxSigner, TxStream, TxStreamPhase,
    };
}
