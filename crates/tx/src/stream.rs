//! Transaction stream
//!
//! Drives one submission through `Broadcasting -> InProgress -> {Succeed,
//! Fail}`:
//!
//! 1. `Broadcasting` is emitted when the signer call is issued.
//! 2. `InProgress` follows as soon as the signer reports the hash, or at the
//!    latest when the signer call resolves.
//! 3. The chain is polled for the tx info, which the operation renders
//!    into the terminal phase.
//!
//! Signer and query errors end the stream with `Err` and no terminal
//! rendering. There are no retries and no cancellation after broadcast.

use crate::error::{TxError, TxResult};
use crate::helper::TxHelper;
use crate::phase::{TxResultRendering, TxStreamPhase};
use crate::query::TxInfoSource;
use crate::reporter::TxErrorReporter;
use crate::signer::{PostResult, TxHashSender};
use anchor_config::{AnchorConfig, TxPollConfig};
use anchor_core::TxInfo;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Channel the stream publishes its renderings on
pub type PhaseSender = mpsc::UnboundedSender<TxResultRendering>;

/// A transaction kind: how to submit it and how to read its result
#[async_trait]
pub trait TxOperation: Send + Sync {
    type Params: Send + Sync;

    /// Name used in logs and error reports
    fn name(&self) -> &'static str;

    /// Builds the messages and hands them to the signer. The signer's hash
    /// event must be forwarded through `on_tx_hash`.
    async fn send_tx(
        &self,
        params: &Self::Params,
        on_tx_hash: TxHashSender,
    ) -> TxResult<PostResult>;

    /// Terminal rendering of a transaction the chain accepted
    fn render_results(&self, tx_info: &TxInfo, helper: &TxHelper) -> TxResultRendering;
}

/// Publishes renderings and drops anything after a terminal phase
struct PhaseEmitter {
    sender: Option<PhaseSender>,
    last: Option<TxStreamPhase>,
}

/// Terminal rendering of a confirmed transaction. A non-zero result code
/// fails the transaction before `render` reads its logs.
pub fn render_confirmed<F>(tx_info: &TxInfo, helper: &TxHelper, render: F) -> TxResultRendering
where
    F: FnOnce(&TxInfo, &TxHelper) -> TxResultRendering,
{
    match tx_info.code {
        Some(code) if tx_info.is_failed() => helper.failed_on_chain(code, &tx_info.raw_log),
        _ => render(tx_info, helper),
    }
}

impl PhaseEmitter {
    fn new(sender: Option<PhaseSender>) -> Self {
        Self { sender, last: None }
    }

    fn emit(&mut self, rendering: TxResultRendering) {
        if let Some(last) = self.last {
            if last.is_terminal() {
                warn!(phase = %rendering.phase, "rendering after terminal phase dropped");
                return;
            }
        }
        debug!(phase = %rendering.phase, "tx phase");
        self.last = Some(rendering.phase);
        if let Some(sender) = &self.sender {
            // receiver gone means nobody is watching any more
            let _ = sender.send(rendering);
        }
    }

    fn reached(&self, phase: TxStreamPhase) -> bool {
        self.last == Some(phase)
    }
}

/// Runs an operation against a signer and a chain query source
pub struct TxStream<O> {
    operation: O,
    source: Arc<dyn TxInfoSource>,
    poll: TxPollConfig,
    tx_fee_uusd: u64,
    error_reporter: Option<Arc<dyn TxErrorReporter>>,
}

impl<O: TxOperation> TxStream<O> {
    pub fn new<S>(operation: O, source: S, config: &AnchorConfig) -> Self
    where
        S: TxInfoSource + 'static,
    {
        Self::with_source(operation, Arc::new(source), config)
    }

    pub fn with_source(operation: O, source: Arc<dyn TxInfoSource>, config: &AnchorConfig) -> Self {
        Self {
            operation,
            source,
            poll: config.poll.clone(),
            tx_fee_uusd: config.fee.fixed_gas_uusd,
            error_reporter: None,
        }
    }

    pub fn with_error_reporter(mut self, reporter: Arc<dyn TxErrorReporter>) -> Self {
        self.error_reporter = Some(reporter);
        self
    }

    pub fn operation(&self) -> &O {
        &self.operation
    }

    /// Submits `params` and waits for the terminal rendering. Every
    /// rendering, terminal included, is also sent on `phases`.
    pub async fn run(
        &self,
        params: O::Params,
        phases: Option<PhaseSender>,
    ) -> TxResult<TxResultRendering> {
        let operation = self.operation.name();
        let helper = TxHelper::new(self.tx_fee_uusd);
        let mut emitter = PhaseEmitter::new(phases);

        info!(operation, "broadcasting transaction");
        emitter.emit(TxResultRendering::broadcasting(helper.receipts()));

        let (hash_sender, mut hash_receiver) = TxHashSender::channel();
        let send = self.operation.send_tx(&params, hash_sender);
        tokio::pin!(send);

        let mut hash_seen = false;
        let posted = loop {
            tokio::select! {
                hash = &mut hash_receiver, if !hash_seen => {
                    hash_seen = true;
                    if let Ok(hash) = hash {
                        helper.set_tx_hash(hash);
                        emitter.emit(TxResultRendering::in_progress(helper.receipts()));
                    }
                }
                result = &mut send => break result,
            }
        };

        if !hash_seen {
            if let Ok(hash) = hash_receiver.try_recv() {
                helper.set_tx_hash(hash);
            }
        }

        let posted = posted.map_err(|e| self.report(e))?;
        if !posted.tx_hash.is_empty() {
            helper.set_tx_hash(posted.tx_hash.as_str());
        }
        let tx_hash = match helper.tx_hash() {
            Some(tx_hash) => tx_hash.to_string(),
            None => return Err(self.report(TxError::MissingTxHash)),
        };

        if !emitter.reached(TxStreamPhase::InProgress) {
            emitter.emit(TxResultRendering::in_progress(helper.receipts()));
        }
        info!(operation, tx_hash = %tx_hash, "transaction broadcast");

        let tx_info = self
            .wait_for_tx_info(&tx_hash)
            .await
            .map_err(|e| self.report(e))?;

        let rendering = render_confirmed(&tx_info, &helper, |tx_info, helper| {
            self.operation.render_results(tx_info, helper)
        });
        info!(
            operation,
            tx_hash = %tx_hash,
            height = %tx_info.height,
            phase = %rendering.phase,
            "transaction confirmed"
        );

        emitter.emit(rendering.clone());
        Ok(rendering)
    }

    async fn wait_for_tx_info(&self, tx_hash: &str) -> TxResult<TxInfo> {
        let interval = Duration::from_millis(self.poll.interval_ms);
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            if let Some(tx_info) = self.source.tx_info(tx_hash).await? {
                return Ok(tx_info);
            }

            if let Some(max_attempts) = self.poll.max_attempts {
                if attempts >= max_attempts {
                    return Err(TxError::PollExhausted {
                        hash: tx_hash.to_string(),
                        attempts,
                    });
                }
            }

            debug!(tx_hash, attempts, "tx not found yet");
            tokio::time::sleep(interval).await;
        }
    }

    fn report(&self, error: TxError) -> TxError {
        warn!(operation = self.operation.name(), %error, "transaction stream error");
        if let Some(reporter) = &self.error_reporter {
            reporter.report(self.operation.name(), &error);
        }
        error
    }
}

impl<O> TxStream<O>
where
    O: TxOperation + 'static,
    O::Params: 'static,
{
    /// Runs the stream on its own task
    pub fn spawn(
        self,
        params: O::Params,
    ) -> (
        mpsc::UnboundedReceiver<TxResultRendering>,
        JoinHandle<TxResult<TxResultRendering>>,
    ) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = tokio::spawn(async move { self.run(params, Some(sender)).await });
        (receiver, handle)
    }
}
