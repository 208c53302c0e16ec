//! Per-operation transactions
//!
//! Each operation builds its contract message, submits it through the
//! signer, publishes a refetch topic and renders the confirmed result.

pub mod deposit_ust;
pub mod mint_basset;

pub use deposit_ust::{render_deposit_ust, DepositUstTx, DepositUstTxParams};
pub use mint_basset::{render_mint_basset, MintBAssetTx, MintBAssetTxParams};

use crate::helper::TxHelper;
use crate::phase::{TxReceipt, TxResultRendering};
use anchor_core::notation::{
    demicrofy, format_fluid_decimal_points, format_token_with_postfix_units,
};
use anchor_core::{
    pick_attribute_value_by_key, pick_event, pick_log, CoreResult, Decimal, Token, TxEvent,
    TxInfo,
};
use serde_json::{json, Map, Value};
use tracing::warn;

/// Event every Anchor contract emits its attributes under
pub(crate) const FROM_CONTRACT: &str = "from_contract";

/// Decimal places of a rendered exchange rate
const EXCHANGE_RATE_DECIMAL_POINTS: u32 = 6;

/// Micro amount attribute of a contract event
#[derive(Debug, Clone, Copy)]
pub(crate) struct AmountAttribute {
    /// Receipt label
    pub label: &'static str,
    pub key: &'static str,
    pub fallback_index: usize,
    pub token: Token,
}

impl AmountAttribute {
    /// `Ok(None)` when the attribute is absent or empty
    fn parse(&self, event: &TxEvent) -> CoreResult<Option<Decimal>> {
        match pick_attribute_value_by_key(event, self.key, self.fallback_index) {
            Some(value) if !value.trim().is_empty() => value.trim().parse().map(Some),
            _ => Ok(None),
        }
    }

    fn receipt(&self, micro_amount: &Decimal) -> TxReceipt {
        TxReceipt::new(
            self.label,
            format!(
                "{} {}",
                format_token_with_postfix_units(self.token, &demicrofy(micro_amount)),
                self.token
            ),
        )
    }
}

/// `paid / received`, `None` when either side is missing. A zero received
/// amount is a decode error.
pub(crate) fn exchange_rate(
    paid: Option<&Decimal>,
    received: Option<&Decimal>,
) -> CoreResult<Option<Decimal>> {
    match (paid, received) {
        (Some(paid), Some(received)) => paid.checked_div(received).map(Some),
        _ => Ok(None),
    }
}

/// Renders a transaction that swaps `paid` for `received` in the first
/// message's `from_contract` event.
pub(crate) fn render_exchange(
    tx_info: &TxInfo,
    helper: &TxHelper,
    paid: &AmountAttribute,
    received: &AmountAttribute,
) -> TxResultRendering {
    let Some(raw_log) = pick_log(tx_info, 0) else {
        return helper.failed_to_find_raw_log();
    };
    let Some(from_contract) = pick_event(raw_log, FROM_CONTRACT) else {
        return helper.failed_to_find_events(FROM_CONTRACT);
    };

    let parsed = paid.parse(from_contract).and_then(|paid_amount| {
        let received_amount = received.parse(from_contract)?;
        let rate = exchange_rate(paid_amount.as_ref(), received_amount.as_ref())?;
        Ok((paid_amount, received_amount, rate))
    });
    let (paid_amount, received_amount, rate) = match parsed {
        Ok(amounts) => amounts,
        Err(e) => {
            warn!(tx_hash = %tx_info.txhash, error = %e, "undecodable amount attribute");
            return helper.failed_to_parse_tx_result();
        }
    };

    let mut receipts = Vec::with_capacity(5);
    receipts.extend(paid_amount.as_ref().map(|amount| paid.receipt(amount)));
    receipts.extend(received_amount.as_ref().map(|amount| received.receipt(amount)));
    receipts.extend(rate.as_ref().map(|rate| {
        TxReceipt::new(
            "Exchange Rate",
            format_fluid_decimal_points(rate, EXCHANGE_RATE_DECIMAL_POINTS, true),
        )
    }));
    receipts.extend(helper.receipts());

    let mut value = Map::new();
    value.insert(paid.key.to_string(), json!(paid_amount.map(|a| a.to_string())));
    value.insert(received.key.to_string(), json!(received_amount.map(|a| a.to_string())));
    value.insert("exchange_rate".to_string(), json!(rate.map(|r| r.to_string())));
    TxResultRendering::succeed(receipts, Some(Value::Object(value)))
}
