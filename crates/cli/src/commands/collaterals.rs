use anchor_config::AnchorConfig;
use anchor_core::notation::{demicrofy, format_basset, format_ust_with_postfix_units};
use anchor_tx::queries::market_collaterals;
use anyhow::{Context, Result};
use std::fmt::Write;

pub async fn show_collaterals(config: &AnchorConfig) -> Result<String> {
    let endpoint = config.network.api_endpoint()?;
    let client = reqwest::Client::new();
    let data = market_collaterals(&client, &endpoint)
        .await
        .with_context(|| format!("failed to query {}", endpoint))?;

    let mut out = format!(
        "Total collateral value: {} UST",
        format_ust_with_postfix_units(&demicrofy(&data.now.total_value))
    );
    for collateral in &data.now.collaterals {
        let _ = write!(
            out,
            "\n  {}: {} @ {} UST",
            collateral.symbol,
            format_basset(&demicrofy(&collateral.collateral)),
            collateral.price
        );
    }
    let _ = write!(out, "\nHistory points: {}", data.history.len());
    Ok(out)
}
