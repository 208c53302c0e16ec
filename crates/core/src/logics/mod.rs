//! Lending formulas shared by the borrow and bAsset flows

pub mod basset;
pub mod borrow;

pub use basset::{
    asset_amount_from_basset, basset_amount_from_asset, validate_asset_amount, validate_tx_fee,
};
pub use borrow::compute_redeem_collateral_max_amount;
