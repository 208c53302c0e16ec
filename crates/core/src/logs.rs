//! Raw log pickers
//!
//! Read-only lookups into a confirmed transaction's logs. Absence is always
//! reported as `None`; callers decide how to render it.
//!
//! Contracts emit attributes in a fixed order, so positional lookup works
//! but silently breaks when a contract changes its output. Prefer
//! [`pick_attribute_value_by_key`], which falls back to the position only
//! when no attribute carries the expected name.

use crate::tx_info::{RawLog, TxEvent, TxInfo};
use std::collections::HashMap;

/// Log of the message at `index`.
pub fn pick_log(tx_info: &TxInfo, index: usize) -> Option<&RawLog> {
    tx_info.logs.get(index)
}

/// First event of the given type.
pub fn pick_event<'a>(raw_log: &'a RawLog, event_type: &str) -> Option<&'a TxEvent> {
    raw_log
        .events
        .iter()
        .find(|event| event.event_type == event_type)
}

/// Attribute value at a position. No schema validation is done.
pub fn pick_attribute_value(event: &TxEvent, index: usize) -> Option<&str> {
    event.attributes.get(index).map(|attr| attr.value.as_str())
}

/// Attribute value by name, falling back to `fallback_index` when the name
/// does not occur in the event.
pub fn pick_attribute_value_by_key<'a>(
    event: &'a TxEvent,
    key: &str,
    fallback_index: usize,
) -> Option<&'a str> {
    EventAttributes::new(event)
        .get(key)
        .or_else(|| pick_attribute_value(event, fallback_index))
}

/// Name-keyed view over an event's attributes. The first occurrence of a
/// repeated key wins.
#[derive(Debug, Clone)]
pub struct EventAttributes<'a> {
    by_key: HashMap<&'a str, &'a str>,
}

impl<'a> EventAttributes<'a> {
    pub fn new(event: &'a TxEvent) -> Self {
        let mut by_key = HashMap::with_capacity(event.attributes.len());
        for attr in &event.attributes {
            by_key.entry(attr.key.as_str()).or_insert(attr.value.as_str());
        }
        Self { by_key }
    }

    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.by_key.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
