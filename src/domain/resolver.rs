//! Pool resolution - enumerate, decode, fetch metadata, derive prices

use crate::domain::pool::{PoolIdentifier, PoolInfo};
use crate::infrastructure::chain::ChainQuery;
use crate::shared::errors::{ChainError, ResolveError};
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::time::Duration;
use tokio::time::{error::Elapsed, timeout};
use tracing::{debug, info, warn};

/// Why a single pool was dropped from a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    UndecodableKey,
    MissingReserves,
    MissingMetadata,
    CallTimeout,
    ChainFault,
}

/// Per-pass skip counters, reported once per pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResolveStats {
    pub resolved: usize,
    pub undecodable: usize,
    pub missing_reserves: usize,
    pub missing_metadata: usize,
    pub timed_out: usize,
    pub chain_faults: usize,
}

impl ResolveStats {
    fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::UndecodableKey => self.undecodable += 1,
            SkipReason::MissingReserves => self.missing_reserves += 1,
            SkipReason::MissingMetadata => self.missing_metadata += 1,
            SkipReason::CallTimeout => self.timed_out += 1,
            SkipReason::ChainFault => self.chain_faults += 1,
        }
    }

    pub fn skipped(&self) -> usize {
        self.undecodable + self.missing_reserves + self.missing_metadata + self.timed_out
            + self.chain_faults
    }
}

/// Tuning for a resolution pass
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Bounded fan-out for per-pool lookups
    pub concurrency: usize,
    /// Timeout applied to every individual chain call
    pub call_timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            concurrency: 8,
            call_timeout: Duration::from_secs(10),
        }
    }
}

/// Transforms raw chain state into human-readable pool records.
///
/// A pass is a pure read pipeline: enumerate keys, decode each key's asset
/// index, fetch reserves and metadata, scale and derive prices. Individual
/// pool failures drop that pool; only a failed enumeration aborts the pass.
pub struct PoolResolver {
    config: ResolverConfig,
}

impl PoolResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Run one resolution pass, consuming the client for the session.
    ///
    /// The client is disconnected exactly once on every exit path. Output
    /// order follows enumeration order.
    pub async fn resolve<C: ChainQuery>(&self, client: C) -> Result<Vec<PoolInfo>, ResolveError> {
        let result = self.resolve_with(&client).await;
        client.disconnect().await;
        result
    }

    async fn resolve_with<C: ChainQuery>(&self, client: &C) -> Result<Vec<PoolInfo>, ResolveError> {
        let keys = self
            .bounded(client.enumerate_pool_keys())
            .await
            .map_err(|_| {
                ResolveError::Connection(ChainError::Connection(
                    "pool enumeration timed out".to_string(),
                ))
            })??;
        debug!(pools = keys.len(), "enumerated pool keys");

        let outcomes: Vec<Result<PoolInfo, SkipReason>> = stream::iter(keys)
            .map(|key| self.resolve_pool(client, key))
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        let mut stats = ResolveStats::default();
        let mut pools = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                Ok(info) => pools.push(info),
                Err(reason) => stats.record(reason),
            }
        }
        stats.resolved = pools.len();
        info!(
            resolved = stats.resolved,
            skipped = stats.skipped(),
            undecodable = stats.undecodable,
            missing_reserves = stats.missing_reserves,
            missing_metadata = stats.missing_metadata,
            timed_out = stats.timed_out,
            chain_faults = stats.chain_faults,
            "resolution pass complete"
        );
        Ok(pools)
    }

    /// Resolve a single pool. Every failure here is a skip, never an abort.
    async fn resolve_pool<C: ChainQuery>(
        &self,
        client: &C,
        key: PoolIdentifier,
    ) -> Result<PoolInfo, SkipReason> {
        let Some(index) = key.asset_index() else {
            warn!(key = %key, "could not extract asset index from pool key");
            return Err(SkipReason::UndecodableKey);
        };

        let reserves = match self.bounded(client.get_pool_reserves(&key)).await {
            Ok(Ok(Some(reserves))) => reserves,
            Ok(Ok(None)) => {
                warn!(key = %key, "pool reserves not available");
                return Err(SkipReason::MissingReserves);
            }
            Ok(Err(e)) => {
                warn!(key = %key, error = %e, "reserve lookup failed");
                return Err(SkipReason::ChainFault);
            }
            Err(_) => {
                warn!(key = %key, "reserve lookup timed out");
                return Err(SkipReason::CallTimeout);
            }
        };

        let metadata = match self.bounded(client.get_asset_metadata(index)).await {
            Ok(Ok(Some(metadata))) => metadata,
            Ok(Ok(None)) => {
                warn!(asset = index, "asset metadata not found");
                return Err(SkipReason::MissingMetadata);
            }
            Ok(Err(e)) => {
                warn!(asset = index, error = %e, "metadata lookup failed");
                return Err(SkipReason::ChainFault);
            }
            Err(_) => {
                warn!(asset = index, "metadata lookup timed out");
                return Err(SkipReason::CallTimeout);
            }
        };

        Ok(PoolInfo::derive(&key, reserves, &metadata))
    }

    async fn bounded<F: Future>(&self, fut: F) -> Result<F::Output, Elapsed> {
        timeout(self.config.call_timeout, fut).await
    }
}
