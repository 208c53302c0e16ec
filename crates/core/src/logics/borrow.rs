use crate::decimal::{Decimal, RoundingMode};

/// Largest collateral amount (micro units) that can be redeemed while the
/// loan stays within `max_ltv`:
///
/// `max(0, balance - loan_amount / max_ltv / oracle_price)`
///
/// A zero LTV or price leaves nothing redeemable.
pub fn compute_redeem_collateral_max_amount(
    collateral_balance: &Decimal,
    loan_amount: &Decimal,
    max_ltv: &Decimal,
    oracle_price: &Decimal,
) -> Decimal {
    let locked = match loan_amount
        .checked_div(max_ltv)
        .and_then(|by_ltv| by_ltv.checked_div(oracle_price))
    {
        Ok(locked) => locked,
        Err(_) => return Decimal::zero(),
    };

    let withdrawable = (collateral_balance - &locked).round(0, RoundingMode::Down);
    if withdrawable.is_negative() {
        Decimal::zero()
    } else {
        withdrawable
    }
}
