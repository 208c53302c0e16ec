use crate::decimal::{Decimal, RoundingMode};
use crate::error::CoreResult;
use crate::notation::{demicrofy, microfy, MICRO_DECIMALS};

/// bAsset received for `asset_amount` at `exchange_rate` (asset per bAsset).
/// An unknown rate counts as 1.
pub fn basset_amount_from_asset(
    asset_amount: &Decimal,
    exchange_rate: Option<&Decimal>,
) -> CoreResult<Decimal> {
    let one = Decimal::one();
    let rate = exchange_rate.unwrap_or(&one);
    Ok(asset_amount
        .checked_div(rate)?
        .round(MICRO_DECIMALS, RoundingMode::Down))
}

/// Asset needed to mint `basset_amount` at `exchange_rate`.
pub fn asset_amount_from_basset(
    basset_amount: &Decimal,
    exchange_rate: Option<&Decimal>,
) -> Decimal {
    let one = Decimal::one();
    let rate = exchange_rate.unwrap_or(&one);
    (basset_amount * rate).round(MICRO_DECIMALS, RoundingMode::Down)
}

/// Error message when the uusd balance cannot cover the fixed gas.
pub fn validate_tx_fee(uusd_balance: &Decimal, fixed_gas_uusd: u64) -> Option<String> {
    if *uusd_balance < Decimal::from(fixed_gas_uusd) {
        Some("Not Enough Tx Fee (Your USD Balance is lower than Fixed Gas)".to_string())
    } else {
        None
    }
}

/// Error message when `asset_amount` (display units) exceeds the uluna
/// balance (micro units).
pub fn validate_asset_amount(asset_amount: &Decimal, uluna_balance: &Decimal) -> Option<String> {
    if microfy(asset_amount) > *uluna_balance {
        Some(format!(
            "Insufficient balance: Not enough Assets ({} Luna)",
            demicrofy(uluna_balance)
        ))
    } else {
        None
    }
}
