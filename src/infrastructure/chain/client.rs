use crate::domain::pool::{AssetIndex, AssetMetadata, PoolIdentifier, PoolReserves};
use crate::shared::errors::ChainError;
use async_trait::async_trait;

/// Read-only chain-query capability consumed by the resolver.
///
/// Abstracting the transport keeps the resolver independently testable with
/// canned fixtures; the production implementation talks to an HTTP gateway.
#[async_trait]
pub trait ChainQuery: Send + Sync {
    /// List every pool key in the asset-conversion storage map
    async fn enumerate_pool_keys(&self) -> Result<Vec<PoolIdentifier>, ChainError>;

    /// Current reserves of a pool; `None` if the pool vanished since
    /// enumeration
    async fn get_pool_reserves(&self, id: &PoolIdentifier)
        -> Result<Option<PoolReserves>, ChainError>;

    /// Registry metadata for an asset; `None` if the asset is unknown
    async fn get_asset_metadata(&self, index: AssetIndex)
        -> Result<Option<AssetMetadata>, ChainError>;

    /// Release the underlying connection. Called exactly once per
    /// resolution session; consuming `self` lets the compiler enforce it.
    async fn disconnect(self);
}
