//! Market collateral snapshot and one-day history

use crate::query::QueryError;
use anchor_core::Decimal;
use chrono::Utc;
use futures::future::try_join;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Collateral of one bAsset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketCollateral {
    pub symbol: String,
    /// Micro bAsset amount
    pub collateral: Decimal,
    /// UST price of one bAsset
    pub price: Decimal,
}

/// Total collateral value at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketCollateralsHistory {
    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub timestamp: i64,
    /// Micro UST
    pub total_value: Decimal,
    #[serde(default)]
    pub collaterals: Vec<MarketCollateral>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketCollateralsData {
    pub now: MarketCollateralsHistory,
    /// Oldest first, ending with `now`
    pub history: Vec<MarketCollateralsHistory>,
}

fn endpoint_url(endpoint: &Url, path: &str) -> Result<Url, QueryError> {
    let raw = format!("{}/{}", endpoint.as_str().trim_end_matches('/'), path);
    Url::parse(&raw).map_err(|e| QueryError::InvalidEndpoint(format!("{}: {}", raw, e)))
}

async fn get_json<T: DeserializeOwned>(client: &Client, url: Url) -> Result<T, QueryError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| QueryError::Http(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(QueryError::Status(status.as_u16(), body));
    }

    response
        .json()
        .await
        .map_err(|e| QueryError::Decode(e.to_string()))
}

/// Fetches the current collateral totals, stamped with the local time, and
/// the last day of history.
pub async fn market_collaterals(
    client: &Client,
    endpoint: &Url,
) -> Result<MarketCollateralsData, QueryError> {
    let (mut now, mut history): (MarketCollateralsHistory, Vec<MarketCollateralsHistory>) =
        try_join(
            get_json(client, endpoint_url(endpoint, "collaterals")?),
            get_json(client, endpoint_url(endpoint, "collaterals/1d")?),
        )
        .await?;
    now.timestamp = Utc::now().timestamp_millis();

    history.reverse();
    history.push(now.clone());
    debug!(points = history.len(), "market collaterals loaded");

    Ok(MarketCollateralsData { now, history })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use std::net::TcpListener;

    fn localhost_binding_permitted() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let endpoint = Url::parse("https://api.example/api/v1").unwrap();
        assert_eq!(
            endpoint_url(&endpoint, "collaterals/1d").unwrap().as_str(),
            "https://api.example/api/v1/collaterals/1d"
        );
    }

    #[tokio::test]
    async fn market_collaterals_reverses_history_and_appends_now() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _now = server
            .mock("GET", "/api/v1/collaterals")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"total_value":"300","collaterals":[{"symbol":"bLuna","collateral":"100","price":"3"}]}"#,
            )
            .create_async()
            .await;
        let _history = server
            .mock("GET", "/api/v1/collaterals/1d")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"timestamp":2000,"total_value":"200","collaterals":[]},{"timestamp":1000,"total_value":"100","collaterals":[]}]"#,
            )
            .create_async()
            .await;

        let endpoint = Url::parse(&format!("{}/api/v1", server.url())).unwrap();
        let before = Utc::now().timestamp_millis();
        let data = market_collaterals(&Client::new(), &endpoint)
            .await
            .expect("collaterals");

        assert!(data.now.timestamp >= before);
        assert_eq!(data.now.collaterals[0].symbol, "bLuna");
        assert_eq!(data.now.total_value, "300".parse().unwrap());

        let timestamps: Vec<i64> = data.history.iter().map(|h| h.timestamp).collect();
        assert_eq!(timestamps, vec![1000, 2000, data.now.timestamp]);
        assert_eq!(data.history.last(), Some(&data.now));
    }

    #[tokio::test]
    async fn market_collaterals_surfaces_status() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", mockito::Matcher::Regex(r"^/collaterals(/1d)?$".to_string()))
            .with_status(503)
            .with_body("down")
            .create_async()
            .await;

        let endpoint = Url::parse(&server.url()).unwrap();
        let error = market_collaterals(&Client::new(), &endpoint)
            .await
            .unwrap_err();
        assert_eq!(error, QueryError::Status(503, "down".to_string()));
    }
}
