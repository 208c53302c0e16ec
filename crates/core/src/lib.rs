//! # Anchor Core
//!
//! Building blocks shared by every Anchor transaction flow:
//!
//! - [`decimal`] - arbitrary-precision decimal arithmetic for token amounts
//! - [`notation`] - micro-unit conversion and receipt formatting
//! - [`tx_info`] - confirmed transaction model (logs, events, attributes)
//! - [`logs`] - pickers over raw logs
//! - [`logics`] - lending formulas (collateral, bAsset mint)

pub mod decimal;
pub mod error;
pub mod logics;
pub mod logs;
pub mod notation;
pub mod tx_info;

pub use decimal::{Decimal, RoundingMode, DIV_SCALE, MAX_EXPONENT};
pub use error::{CoreError, CoreResult};
pub use logs::{
    pick_attribute_value, pick_attribute_value_by_key, pick_event, pick_log, EventAttributes,
};
pub use notation::{demicrofy, microfy, Token, MICRO};
pub use tx_info::{EventAttribute, RawLog, TxEvent, TxInfo};
