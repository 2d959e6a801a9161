//! HTTP chain gateway client
//!
//! Talks to a sidecar-style JSON gateway in front of the chain node. The
//! gateway renders storage values as JSON, so responses are parsed leniently:
//! balances may arrive as numbers or comma-grouped strings, field casing
//! varies with the gateway's encoding mode.

use crate::domain::pool::{AssetIndex, AssetMetadata, PoolIdentifier, PoolReserves};
use crate::infrastructure::chain::ChainQuery;
use crate::shared::errors::ChainError;
use crate::shared::utils::parse_balance;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const POOLS_KEYS_PATH: &str = "/pallets/asset-conversion/storage/pools/keys";
const POOLS_PATH: &str = "/pallets/asset-conversion/storage/pools";
const ASSET_METADATA_PATH: &str = "/pallets/assets/storage/metadata";

/// Assets created without registered metadata still price against 10
/// decimals on the reference chain.
const DEFAULT_DECIMALS: u8 = 10;

#[derive(Debug, Clone)]
pub struct HttpChainConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

/// Chain-query client over an HTTP JSON gateway
pub struct HttpChainClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct KeysResponse {
    keys: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct StorageResponse {
    value: Option<Value>,
}

impl HttpChainClient {
    pub fn new(config: &HttpChainConfig) -> Result<Self, ChainError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ChainError::Connection(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Option<Value>, ChainError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "chain gateway request");
        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ChainError::Connection(e.to_string()))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response
            .error_for_status()
            .map_err(|e| ChainError::BadResponse(e.to_string()))?;
        let value = response
            .json()
            .await
            .map_err(|e| ChainError::BadResponse(e.to_string()))?;
        Ok(Some(value))
    }
}

#[async_trait]
impl ChainQuery for HttpChainClient {
    async fn enumerate_pool_keys(&self) -> Result<Vec<PoolIdentifier>, ChainError> {
        let body = self
            .get_json(POOLS_KEYS_PATH, &[])
            .await?
            .ok_or_else(|| ChainError::BadResponse("pool keys endpoint missing".to_string()))?;
        let keys: KeysResponse = serde_json::from_value(body)
            .map_err(|e| ChainError::BadResponse(format!("pool keys: {e}")))?;
        Ok(keys.keys.into_iter().map(PoolIdentifier::new).collect())
    }

    async fn get_pool_reserves(
        &self,
        id: &PoolIdentifier,
    ) -> Result<Option<PoolReserves>, ChainError> {
        let query = [("key1", id.as_value().to_string())];
        let Some(body) = self.get_json(POOLS_PATH, &query).await? else {
            return Ok(None);
        };
        let storage: StorageResponse = serde_json::from_value(body)
            .map_err(|e| ChainError::BadResponse(format!("pool value: {e}")))?;
        match storage.value {
            Some(value) => parse_reserves(&value).map(Some),
            None => Ok(None),
        }
    }

    async fn get_asset_metadata(
        &self,
        index: AssetIndex,
    ) -> Result<Option<AssetMetadata>, ChainError> {
        let query = [("key1", index.to_string())];
        let Some(body) = self.get_json(ASSET_METADATA_PATH, &query).await? else {
            return Ok(None);
        };
        let storage: StorageResponse = serde_json::from_value(body)
            .map_err(|e| ChainError::BadResponse(format!("asset metadata: {e}")))?;
        Ok(storage.value.as_ref().map(parse_metadata))
    }

    async fn disconnect(self) {
        // reqwest pools connections internally; dropping the client closes
        // the session.
        debug!("closing chain gateway client");
    }
}

/// Pool values carry the pair as `reserve0` (native side) and `reserve1`
/// (asset side).
fn parse_reserves(value: &Value) -> Result<PoolReserves, ChainError> {
    let native = value
        .get("reserve0")
        .and_then(parse_balance)
        .ok_or_else(|| ChainError::BadResponse("reserve0 unreadable".to_string()))?;
    let asset = value
        .get("reserve1")
        .and_then(parse_balance)
        .ok_or_else(|| ChainError::BadResponse("reserve1 unreadable".to_string()))?;
    Ok(PoolReserves { native, asset })
}

fn parse_metadata(value: &Value) -> AssetMetadata {
    let text = |field: &str| {
        value
            .get(field)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    let decimals = value
        .get("decimals")
        .and_then(parse_balance)
        .and_then(|n| u8::try_from(n).ok())
        .unwrap_or(DEFAULT_DECIMALS);
    AssetMetadata {
        name: text("name"),
        symbol: text("symbol"),
        decimals,
    }
}
