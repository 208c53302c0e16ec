//! Anchor API queries

pub mod collaterals;

pub use collaterals::{
    market_collaterals, MarketCollateral, MarketCollateralsData, MarketCollateralsHistory,
};
