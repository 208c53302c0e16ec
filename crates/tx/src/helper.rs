//! Per-submission receipt accumulator

use crate::phase::{RenderFailure, TxReceipt, TxResultRendering};
use anchor_core::notation::{demicrofy, format_ust};
use anchor_core::Decimal;
use std::sync::OnceLock;
use tracing::warn;

/// Collects the tx hash and fee of one submission and builds the receipt
/// lines shared by every operation.
#[derive(Debug)]
pub struct TxHelper {
    tx_hash: OnceLock<String>,
    tx_fee_uusd: u64,
}

impl TxHelper {
    pub fn new(tx_fee_uusd: u64) -> Self {
        Self {
            tx_hash: OnceLock::new(),
            tx_fee_uusd,
        }
    }

    /// Records the hash. The first value sticks; a later, different value
    /// is dropped with a warning.
    pub fn set_tx_hash(&self, tx_hash: impl Into<String>) {
        let tx_hash = tx_hash.into();
        if let Err(rejected) = self.tx_hash.set(tx_hash) {
            if let Some(current) = self.tx_hash.get() {
                if *current != rejected {
                    warn!(current = %current, rejected = %rejected, "tx hash already set");
                }
            }
        }
    }

    pub fn tx_hash(&self) -> Option<&str> {
        self.tx_hash.get().map(String::as_str)
    }

    pub fn tx_fee_uusd(&self) -> u64 {
        self.tx_fee_uusd
    }

    pub fn tx_hash_receipt(&self) -> Option<TxReceipt> {
        self.tx_hash()
            .map(|tx_hash| TxReceipt::new("Tx Hash", tx_hash))
    }

    pub fn tx_fee_receipt(&self) -> TxReceipt {
        let fee = demicrofy(&Decimal::from(self.tx_fee_uusd));
        TxReceipt::new("Tx Fee", format!("{} UST", format_ust(&fee)))
    }

    /// Hash (when known) followed by fee
    pub fn receipts(&self) -> Vec<TxReceipt> {
        self.tx_hash_receipt()
            .into_iter()
            .chain(std::iter::once(self.tx_fee_receipt()))
            .collect()
    }

    pub fn failed_to_find_raw_log(&self) -> TxResultRendering {
        self.fail(RenderFailure::MissingRawLog)
    }

    pub fn failed_to_find_events(&self, event_type: &str) -> TxResultRendering {
        self.fail(RenderFailure::MissingEvent(event_type.to_string()))
    }

    pub fn failed_to_parse_tx_result(&self) -> TxResultRendering {
        self.fail(RenderFailure::ParseFailure)
    }

    pub fn failed_on_chain(&self, code: u32, raw_log: &str) -> TxResultRendering {
        self.fail(RenderFailure::OnChain {
            code,
            raw_log: raw_log.to_string(),
        })
    }

    fn fail(&self, failure: RenderFailure) -> TxResultRendering {
        warn!(tx_hash = ?self.tx_hash(), %failure, "tx rendering failed");
        TxResultRendering::fail(failure, self.receipts())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::TxStreamPhase;

    #[test]
    fn test_set_tx_hash_is_single_assignment() {
        let helper = TxHelper::new(3_500_000);
        assert!(helper.tx_hash().is_none());
        assert!(helper.tx_hash_receipt().is_none());

        helper.set_tx_hash("ABC");
        helper.set_tx_hash("ABC");
        helper.set_tx_hash("DEF");
        assert_eq!(helper.tx_hash(), Some("ABC"));
    }

    #[test]
    fn test_fee_receipt() {
        let helper = TxHelper::new(3_500_000);
        assert_eq!(helper.tx_fee_receipt(), TxReceipt::new("Tx Fee", "3.500000 UST"));
        assert_eq!(helper.receipts().len(), 1);

        helper.set_tx_hash("ABC");
        let receipts = helper.receipts();
        assert_eq!(receipts[0], TxReceipt::new("Tx Hash", "ABC"));
        assert_eq!(receipts[1].name, "Tx Fee");
    }

    #[test]
    fn test_failure_renderings_carry_receipts() {
        let helper = TxHelper::new(3_500_000);
        helper.set_tx_hash("ABC");

        let rendering = helper.failed_to_find_events("from_contract");
        assert_eq!(rendering.phase, TxStreamPhase::Fail);
        assert_eq!(
            rendering.message().as_deref(),
            Some("failed to find events: from_contract")
        );
        assert_eq!(rendering.receipt("Tx Hash"), Some("ABC"));

        assert_eq!(
            helper.failed_to_find_raw_log().message().as_deref(),
            Some("failed to find raw log")
        );
        assert_eq!(
            helper.failed_to_parse_tx_result().message().as_deref(),
            Some("failed to parse tx result")
        );
        assert_eq!(
            helper.failed_on_chain(5, "out of gas").message().as_deref(),
            Some("transaction failed on chain (code 5): out of gas")
        );
    }
}
