use anchor_core::logics::compute_redeem_collateral_max_amount;
use anchor_core::notation::{demicrofy, format_basset};
use anchor_core::Decimal;

pub fn redeem_max(
    balance: &Decimal,
    loan: &Decimal,
    max_ltv: &Decimal,
    oracle_price: &Decimal,
) -> String {
    let amount = compute_redeem_collateral_max_amount(balance, loan, max_ltv, oracle_price);
    format!(
        "Redeemable collateral: {} ({} micro)",
        format_basset(&demicrofy(&amount)),
        amount
    )
}
