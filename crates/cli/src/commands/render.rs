use crate::args::Operation;
use anchor_config::AnchorConfig;
use anchor_core::TxInfo;
use anchor_tx::{
    render_confirmed, render_deposit_ust, render_mint_basset, LcdClient, TxHelper,
    TxResultRendering,
};
use anyhow::{anyhow, Context, Result};
use std::fmt::Write;
use std::fs;
use std::path::Path;
use tracing::info;

pub fn load_tx_info(path: &Path) -> Result<TxInfo> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("{} is not a tx info document", path.display()))
}

/// Terminal rendering of a confirmed transaction, as the tx stream would
/// produce it.
pub fn render_tx_info(
    operation: Operation,
    tx_info: &TxInfo,
    config: &AnchorConfig,
) -> TxResultRendering {
    let helper = TxHelper::new(config.fee.fixed_gas_uusd);
    if !tx_info.txhash.is_empty() {
        helper.set_tx_hash(tx_info.txhash.as_str());
    }

    let render: fn(&TxInfo, &TxHelper) -> TxResultRendering = match operation {
        Operation::Deposit => render_deposit_ust,
        Operation::Mint => render_mint_basset,
    };
    render_confirmed(tx_info, &helper, render)
}

pub async fn fetch_and_render(
    hash: &str,
    operation: Operation,
    config: &AnchorConfig,
) -> Result<String> {
    let client = LcdClient::from_config(config)?;
    info!(hash, lcd = %client.base_address(), "fetching tx info");
    let tx_info = client
        .get_tx_info(hash)
        .await?
        .ok_or_else(|| anyhow!("transaction {} not found", hash))?;
    Ok(format_rendering(&render_tx_info(operation, &tx_info, config)))
}

pub fn format_rendering(rendering: &TxResultRendering) -> String {
    let mut out = rendering.phase.to_string();
    if let Some(message) = rendering.message() {
        let _ = write!(out, ": {}", message);
    }
    for receipt in &rendering.receipts {
        let _ = write!(out, "\n  {}", receipt);
    }
    out
}
