use serde::{Deserialize, Serialize};

/// Confirmed transaction as returned by the LCD `GET /txs/{hash}` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TxInfo {
    /// Block height, serialized as a string by the LCD
    #[serde(default)]
    pub height: String,

    pub txhash: String,

    /// Non-zero when the chain rejected the transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u32>,

    #[serde(default)]
    pub raw_log: String,

    /// One entry per message, in message order
    #[serde(default)]
    pub logs: Vec<RawLog>,

    #[serde(default)]
    pub gas_wanted: String,

    #[serde(default)]
    pub gas_used: String,

    #[serde(default)]
    pub timestamp: String,
}

impl TxInfo {
    /// True when the chain reported a failure code
    pub fn is_failed(&self) -> bool {
        matches!(self.code, Some(code) if code != 0)
    }
}

/// Log of a single message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLog {
    #[serde(default)]
    pub msg_index: u32,

    #[serde(default)]
    pub log: String,

    #[serde(default)]
    pub events: Vec<TxEvent>,
}

/// Typed event inside a message log (`from_contract`, `transfer`, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TxEvent {
    #[serde(rename = "type")]
    pub event_type: String,

    /// Ordered key/value pairs; keys repeat when several contracts emit
    #[serde(default)]
    pub attributes: Vec<EventAttribute>,
}

/// Key/value pair of an event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAttribute {
    pub key: String,

    #[serde(default)]
    pub value: String,
}

impl EventAttribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_info_from_lcd_json() {
        let json = r#"{
            "height": "3140524",
            "txhash": "A1B2C3",
            "raw_log": "[]",
            "logs": [{
                "msg_index": 0,
                "log": "",
                "events": [{
                    "type": "from_contract",
                    "attributes": [
                        {"key": "contract_address", "value": "terra1market"},
                        {"key": "action", "value": "deposit_stable"}
                    ]
                }]
            }],
            "gas_wanted": "6000000",
            "gas_used": "412345",
            "timestamp": "2021-03-01T10:00:00Z"
        }"#;

        let info: TxInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.txhash, "A1B2C3");
        assert!(!info.is_failed());
        assert_eq!(info.logs.len(), 1);
        let event = &info.logs[0].events[0];
        assert_eq!(event.event_type, "from_contract");
        assert_eq!(event.attributes[1], EventAttribute::new("action", "deposit_stable"));
    }

    #[test]
    fn test_tx_info_failure_code() {
        let info: TxInfo =
            serde_json::from_str(r#"{"txhash":"FF","code":5,"raw_log":"insufficient funds"}"#)
                .unwrap();
        assert!(info.is_failed());
        assert!(info.logs.is_empty());
    }
}
