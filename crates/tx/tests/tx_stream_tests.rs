//! Transaction stream integration tests
//!
//! Drives the deposit and mint operations through `TxStream` with in-memory
//! signers and chain sources.

use anchor_config::AnchorConfig;
use anchor_core::{EventAttribute, RawLog, TxEvent, TxInfo};
use anchor_tx::{
    BroadcastRefetcher, CreateTxOptions, DepositUstTx, DepositUstTxParams, MintBAssetTx,
    MintBAssetTxParams, PostResult, QueryError, SignerError, TxError, TxErrorReporter,
    TxHashSender, TxInfoSource, TxRefetchKey, TxResultRendering, TxSigner, TxStream,
    TxStreamPhase,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, Notify};
use tokio_test::{assert_err, assert_ok};

const TX_HASH: &str = "C0FFEE";

/// Signer that reports the hash early, optionally waits for a go signal and
/// then resolves with a fixed outcome.
struct MockSigner {
    early_hash: bool,
    release: Option<Arc<Notify>>,
    outcome: Result<PostResult, SignerError>,
    posted: Mutex<Vec<CreateTxOptions>>,
}

impl MockSigner {
    fn ok() -> Self {
        Self {
            early_hash: true,
            release: None,
            outcome: Ok(PostResult {
                tx_hash: TX_HASH.into(),
                raw_log: String::new(),
            }),
            posted: Mutex::new(Vec::new()),
        }
    }

    fn failing(error: SignerError) -> Self {
        Self {
            early_hash: false,
            outcome: Err(error),
            ..Self::ok()
        }
    }
}

#[async_trait]
impl TxSigner for MockSigner {
    async fn post(
        &self,
        options: CreateTxOptions,
        on_tx_hash: TxHashSender,
    ) -> Result<PostResult, SignerError> {
        self.posted.lock().unwrap().push(options);
        if self.early_hash {
            on_tx_hash.send(TX_HASH);
        }
        if let Some(release) = &self.release {
            release.notified().await;
        }
        self.outcome.clone()
    }
}

/// Chain source that reports the tx as pending a fixed number of times
struct MockSource {
    pending_polls: u32,
    result: Result<TxInfo, QueryError>,
    calls: AtomicU32,
}

impl MockSource {
    fn found_after(pending_polls: u32, info: TxInfo) -> Self {
        Self {
            pending_polls,
            result: Ok(info),
            calls: AtomicU32::new(0),
        }
    }

    fn never_found() -> Self {
        Self::found_after(u32::MAX, TxInfo::default())
    }
}

#[async_trait]
impl TxInfoSource for MockSource {
    async fn tx_info(&self, _tx_hash: &str) -> Result<Option<TxInfo>, QueryError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.pending_polls {
            return Ok(None);
        }
        self.result.clone().map(Some)
    }
}

#[derive(Default)]
struct RecordingReporter {
    reports: Mutex<Vec<String>>,
}

impl TxErrorReporter for RecordingReporter {
    fn report(&self, operation: &str, error: &TxError) {
        self.reports
            .lock()
            .unwrap()
            .push(format!("{operation}: {error}"));
    }
}

fn config(max_attempts: Option<u32>) -> AnchorConfig {
    let mut config = AnchorConfig::default();
    config.poll.interval_ms = 1;
    config.poll.max_attempts = max_attempts;
    config
}

fn confirmed(events: Vec<TxEvent>) -> TxInfo {
    TxInfo {
        height: "42".into(),
        txhash: TX_HASH.into(),
        logs: vec![RawLog {
            msg_index: 0,
            log: String::new(),
            events,
        }],
        ..TxInfo::default()
    }
}

fn from_contract(values: &[&str]) -> TxEvent {
    TxEvent {
        event_type: "from_contract".into(),
        attributes: values
            .iter()
            .enumerate()
            .map(|(i, value)| EventAttribute::new(format!("a{i}"), *value))
            .collect(),
    }
}

fn deposit_params(amount: &str) -> DepositUstTxParams {
    DepositUstTxParams {
        deposit_amount: amount.parse().unwrap(),
    }
}

fn deposit_stream(
    signer: Arc<MockSigner>,
    source: MockSource,
    refetch: Arc<BroadcastRefetcher>,
    config: &AnchorConfig,
) -> TxStream<DepositUstTx> {
    let deposit = DepositUstTx::new(signer, refetch, config, "terra1user");
    TxStream::new(deposit, source, config)
}

fn drain(mut receiver: mpsc::UnboundedReceiver<TxResultRendering>) -> Vec<TxResultRendering> {
    let mut renderings = Vec::new();
    while let Ok(rendering) = receiver.try_recv() {
        renderings.push(rendering);
    }
    renderings
}

fn phases(renderings: &[TxResultRendering]) -> Vec<TxStreamPhase> {
    renderings.iter().map(|r| r.phase).collect()
}

#[tokio::test]
async fn test_deposit_stream_succeeds() {
    let config = config(None);
    let signer = Arc::new(MockSigner::ok());
    let refetch = Arc::new(BroadcastRefetcher::new(4));
    let mut refetched = refetch.subscribe();
    let source = Arc::new(MockSource::found_after(
        2,
        confirmed(vec![from_contract(&["a", "b", "c", "99000000", "100000000"])]),
    ));

    let deposit = DepositUstTx::new(signer.clone(), refetch, &config, "terra1user");
    let stream = TxStream::with_source(deposit, source.clone(), &config);
    let (sender, receiver) = mpsc::unbounded_channel();
    let result = assert_ok!(stream.run(deposit_params("100"), Some(sender)).await);

    let renderings = drain(receiver);
    assert_eq!(
        phases(&renderings),
        vec![
            TxStreamPhase::Broadcasting,
            TxStreamPhase::InProgress,
            TxStreamPhase::Succeed
        ]
    );
    assert!(renderings[0].receipt("Tx Hash").is_none());
    assert_eq!(renderings[1].receipt("Tx Hash"), Some(TX_HASH));
    assert_eq!(renderings[2], result);

    assert_eq!(result.receipt("Deposit Amount"), Some("100.000000 UST"));
    assert_eq!(result.receipt("Received Amount"), Some("99.000000 aUST"));
    assert_eq!(result.receipt("Exchange Rate"), Some("1.010101"));
    assert_eq!(result.receipt("Tx Fee"), Some("3.500000 UST"));

    assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    assert_eq!(refetched.recv().await.unwrap(), TxRefetchKey::EarnDeposit);

    let posted = signer.posted.lock().unwrap();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].msgs[0].coins[0].to_string(), "100000000uusd");
}

#[tokio::test]
async fn test_in_progress_is_emitted_before_signer_resolves() {
    let config = config(None);
    let release = Arc::new(Notify::new());
    let signer = Arc::new(MockSigner {
        release: Some(release.clone()),
        ..MockSigner::ok()
    });
    let source = MockSource::found_after(
        0,
        confirmed(vec![from_contract(&["a", "b", "c", "1", "1"])]),
    );
    let stream = deposit_stream(signer, source, Arc::new(BroadcastRefetcher::default()), &config);

    let (mut receiver, handle) = stream.spawn(deposit_params("1"));
    assert_eq!(receiver.recv().await.unwrap().phase, TxStreamPhase::Broadcasting);
    let in_progress = receiver.recv().await.unwrap();
    assert_eq!(in_progress.phase, TxStreamPhase::InProgress);
    assert_eq!(in_progress.receipt("Tx Hash"), Some(TX_HASH));

    release.notify_one();
    let result = assert_ok!(handle.await.unwrap());
    assert_eq!(result.phase, TxStreamPhase::Succeed);
    assert_eq!(receiver.recv().await.unwrap().phase, TxStreamPhase::Succeed);
    assert!(receiver.recv().await.is_none());
}

#[tokio::test]
async fn test_hash_from_post_result_still_reaches_in_progress() {
    let config = config(None);
    let signer = Arc::new(MockSigner {
        early_hash: false,
        ..MockSigner::ok()
    });
    let source = MockSource::found_after(
        0,
        confirmed(vec![from_contract(&["a", "b", "c", "1", "1"])]),
    );
    let stream = deposit_stream(signer, source, Arc::new(BroadcastRefetcher::default()), &config);

    let (sender, receiver) = mpsc::unbounded_channel();
    assert_ok!(stream.run(deposit_params("1"), Some(sender)).await);

    let renderings = drain(receiver);
    assert_eq!(renderings.len(), 3);
    assert_eq!(renderings[1].phase, TxStreamPhase::InProgress);
    assert_eq!(renderings[1].receipt("Tx Hash"), Some(TX_HASH));
}

#[tokio::test]
async fn test_signer_error_is_returned_and_reported() {
    let config = config(None);
    let signer = Arc::new(MockSigner::failing(SignerError::UserDenied));
    let refetch = Arc::new(BroadcastRefetcher::new(4));
    let mut refetched = refetch.subscribe();
    let reporter = Arc::new(RecordingReporter::default());
    let stream = deposit_stream(signer, MockSource::never_found(), refetch, &config)
        .with_error_reporter(reporter.clone());

    let (sender, receiver) = mpsc::unbounded_channel();
    let error = assert_err!(stream.run(deposit_params("10"), Some(sender)).await);

    assert_eq!(error, TxError::Signer(SignerError::UserDenied));
    assert_eq!(phases(&drain(receiver)), vec![TxStreamPhase::Broadcasting]);
    assert_eq!(
        reporter.reports.lock().unwrap().as_slice(),
        ["deposit_ust: User denied the transaction".to_string()]
    );
    assert!(refetched.try_recv().is_err());
}

#[tokio::test]
async fn test_query_error_is_returned() {
    let config = config(None);
    let source = MockSource {
        pending_polls: 0,
        result: Err(QueryError::Status(500, "boom".into())),
        calls: AtomicU32::new(0),
    };
    let stream = deposit_stream(
        Arc::new(MockSigner::ok()),
        source,
        Arc::new(BroadcastRefetcher::default()),
        &config,
    );

    let (sender, receiver) = mpsc::unbounded_channel();
    let error = assert_err!(stream.run(deposit_params("10"), Some(sender)).await);
    assert_eq!(error, TxError::Query(QueryError::Status(500, "boom".into())));
    assert_eq!(
        phases(&drain(receiver)),
        vec![TxStreamPhase::Broadcasting, TxStreamPhase::InProgress]
    );
}

#[tokio::test]
async fn test_polling_stops_at_attempt_cap() {
    let config = config(Some(3));
    let source = Arc::new(MockSource::never_found());
    let deposit = DepositUstTx::new(
        Arc::new(MockSigner::ok()),
        Arc::new(BroadcastRefetcher::default()),
        &config,
        "terra1user",
    );
    let stream = TxStream::with_source(deposit, source.clone(), &config);

    let error = assert_err!(stream.run(deposit_params("10"), None).await);
    assert_eq!(
        error,
        TxError::PollExhausted {
            hash: TX_HASH.into(),
            attempts: 3
        }
    );
    assert_eq!(source.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_zero_logs_fails_with_missing_raw_log() {
    let config = config(None);
    let info = TxInfo {
        txhash: TX_HASH.into(),
        ..TxInfo::default()
    };
    let source = MockSource::found_after(0, info);
    let stream = deposit_stream(
        Arc::new(MockSigner::ok()),
        source,
        Arc::new(BroadcastRefetcher::default()),
        &config,
    );

    let result = assert_ok!(stream.run(deposit_params("10"), None).await);
    assert_eq!(result.phase, TxStreamPhase::Fail);
    assert_eq!(result.message().as_deref(), Some("failed to find raw log"));
    assert_eq!(result.receipt("Tx Hash"), Some(TX_HASH));
}

#[tokio::test]
async fn test_missing_from_contract_fails() {
    let config = config(None);
    let transfer = TxEvent {
        event_type: "transfer".into(),
        attributes: vec![],
    };
    let source = MockSource::found_after(0, confirmed(vec![transfer]));
    let stream = deposit_stream(
        Arc::new(MockSigner::ok()),
        source,
        Arc::new(BroadcastRefetcher::default()),
        &config,
    );

    let result = assert_ok!(stream.run(deposit_params("10"), None).await);
    assert_eq!(result.phase, TxStreamPhase::Fail);
    assert_eq!(
        result.message().as_deref(),
        Some("failed to find events: from_contract")
    );
}

#[tokio::test]
async fn test_on_chain_failure_code_fails() {
    let config = config(None);
    let mut info = confirmed(vec![]);
    info.code = Some(11);
    info.raw_log = "out of gas".into();
    let stream = deposit_stream(
        Arc::new(MockSigner::ok()),
        MockSource::found_after(0, info),
        Arc::new(BroadcastRefetcher::default()),
        &config,
    );

    let result = assert_ok!(stream.run(deposit_params("10"), None).await);
    assert_eq!(result.phase, TxStreamPhase::Fail);
    assert_eq!(
        result.message().as_deref(),
        Some("transaction failed on chain (code 11): out of gas")
    );
}

#[tokio::test]
async fn test_invalid_params_end_stream() {
    let config = config(None);
    let signer = Arc::new(MockSigner::ok());
    let stream = deposit_stream(
        signer.clone(),
        MockSource::never_found(),
        Arc::new(BroadcastRefetcher::default()),
        &config,
    );

    let error = assert_err!(stream.run(deposit_params("0"), None).await);
    assert!(matches!(error, TxError::InvalidParams(_)));
    assert!(signer.posted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_mint_stream_succeeds() {
    let config = config(None);
    let refetch = Arc::new(BroadcastRefetcher::new(4));
    let mut refetched = refetch.subscribe();
    let mint = MintBAssetTx::new(Arc::new(MockSigner::ok()), refetch, &config, "terra1user");
    let source = MockSource::found_after(
        1,
        confirmed(vec![from_contract(&["hub", "mint", "terra1user", "2000000", "1000000"])]),
    );
    let stream = TxStream::new(mint, source, &config);

    let params = MintBAssetTxParams {
        asset_amount: "2".parse().unwrap(),
        validator: "terravaloper1abc".into(),
    };
    let result = assert_ok!(stream.run(params, None).await);

    assert_eq!(result.phase, TxStreamPhase::Succeed);
    assert_eq!(result.receipt("Bonded Amount"), Some("2.000000 Luna"));
    assert_eq!(result.receipt("Minted Amount"), Some("1.000000 bLuna"));
    assert_eq!(result.receipt("Exchange Rate"), Some("2"));
    assert_eq!(refetched.recv().await.unwrap(), TxRefetchKey::BondMint);
}

