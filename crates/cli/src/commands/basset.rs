use anchor_config::AnchorConfig;
use anchor_core::logics::{basset_amount_from_asset, validate_asset_amount, validate_tx_fee};
use anchor_core::notation::{format_basset, format_luna};
use anchor_core::Decimal;
use anyhow::Result;
use std::fmt::Write;

pub fn mint_quote(
    amount: &Decimal,
    exchange_rate: Option<&Decimal>,
    uusd_balance: Option<&Decimal>,
    uluna_balance: Option<&Decimal>,
    config: &AnchorConfig,
) -> Result<String> {
    let minted = basset_amount_from_asset(amount, exchange_rate)?;
    let mut out = format!(
        "Mint {} Luna -> {} bLuna",
        format_luna(amount),
        format_basset(&minted)
    );

    let problems = [
        uusd_balance.and_then(|balance| validate_tx_fee(balance, config.fee.fixed_gas_uusd)),
        uluna_balance.and_then(|balance| validate_asset_amount(amount, balance)),
    ];
    for problem in problems.into_iter().flatten() {
        let _ = write!(out, "\n  {}", problem);
    }
    Ok(out)
}
