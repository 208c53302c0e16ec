//! # Anchor Tx
//!
//! Transaction pipeline for Anchor money market operations.
//!
//! An operation ([`TxOperation`]) builds contract messages and renders the
//! confirmed result; a [`TxStream`] drives it through the phases
//! `Broadcasting -> InProgress -> {Succeed, Fail}` against injected
//! collaborators:
//!
//! - [`TxSigner`] - wallet that signs and broadcasts
//! - [`TxInfoSource`] - chain lookup of confirmed transactions ([`LcdClient`])
//! - [`RefetchQueries`] - refetch notifications ([`BroadcastRefetcher`])
//! - [`TxErrorReporter`] - optional sink for stream errors

pub mod error;
pub mod helper;
pub mod lcd_client;
pub mod ops;
pub mod phase;
pub mod queries;
pub mod query;
pub mod refetch;
pub mod reporter;
pub mod signer;
pub mod stream;

pub use error::{TxError, TxResult};
pub use helper::TxHelper;
pub use lcd_client::LcdClient;
pub use ops::{
    render_deposit_ust, render_mint_basset, DepositUstTx, DepositUstTxParams, MintBAssetTx,
    MintBAssetTxParams,
};
pub use phase::{RenderFailure, TxReceipt, TxResultRendering, TxStreamPhase};
pub use query::{QueryError, TxInfoSource};
pub use refetch::{BroadcastRefetcher, RefetchQueries, TxRefetchKey};
pub use reporter::{TracingErrorReporter, TxErrorReporter};
pub use signer::{
    Coin, CreateTxOptions, Fee, MsgExecuteContract, PostResult, SignerError, TxHashSender,
    TxSigner,
};
pub use stream::{render_confirmed, PhaseSender, TxOperation, TxStream};
