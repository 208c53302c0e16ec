//! Terra LCD client for transaction lookups

use crate::query::{QueryError, TxInfoSource};
use anchor_config::AnchorConfig;
use anchor_core::TxInfo;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use tracing::trace;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client over the LCD REST API
#[derive(Debug, Clone)]
pub struct LcdClient {
    base_address: Url,
    http_client: Client,
}

impl LcdClient {
    pub fn new(base_address: Url) -> Result<Self, QueryError> {
        let http_client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| QueryError::Http(e.to_string()))?;
        Ok(Self::with_client(http_client, base_address))
    }

    /// Uses an existing HTTP client
    pub fn with_client(http_client: Client, mut base_address: Url) -> Self {
        // keep the last path segment when joining relative paths
        if !base_address.path().ends_with('/') {
            let path = format!("{}/", base_address.path());
            base_address.set_path(&path);
        }
        Self {
            base_address,
            http_client,
        }
    }

    /// Client for the configured network's LCD
    pub fn from_config(config: &AnchorConfig) -> Result<Self, QueryError> {
        let url = config
            .network
            .lcd_url()
            .map_err(|e| QueryError::InvalidEndpoint(e.to_string()))?;
        Self::new(url)
    }

    pub fn base_address(&self) -> &Url {
        &self.base_address
    }

    /// `GET /txs/{hash}`. `None` while the chain does not know the hash.
    pub async fn get_tx_info(&self, tx_hash: &str) -> Result<Option<TxInfo>, QueryError> {
        let url = self
            .base_address
            .join(&format!("txs/{}", tx_hash))
            .map_err(|e| QueryError::InvalidEndpoint(e.to_string()))?;
        trace!(%url, "querying tx info");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| QueryError::Http(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QueryError::Status(status.as_u16(), body));
        }

        let content = response
            .text()
            .await
            .map_err(|e| QueryError::Http(format!("Failed to read response: {}", e)))?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| QueryError::Decode(e.to_string()))
    }
}

#[async_trait]
impl TxInfoSource for LcdClient {
    async fn tx_info(&self, tx_hash: &str) -> Result<Option<TxInfo>, QueryError> {
        self.get_tx_info(tx_hash).await
    }
}
