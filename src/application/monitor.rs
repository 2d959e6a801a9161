//! Polling monitor - refreshes the pool snapshot on a fixed interval
//!
//! Each pass is independent: a fresh chain client is built, the resolver
//! runs once, and the published snapshot is replaced wholesale. A failed
//! pass keeps the previous pool list visible and records the error.

use crate::domain::pool::PoolInfo;
use crate::domain::resolver::PoolResolver;
use crate::infrastructure::chain::ChainQuery;
use crate::shared::errors::{ChainError, ResolveError};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info};

/// Latest resolution state, published for display binding
#[derive(Debug, Clone, Default)]
pub struct PoolSnapshot {
    /// True while a pass is in flight; false afterwards, also after a
    /// failed pass
    pub loading: bool,
    pub pools: Vec<PoolInfo>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

/// Drives resolution passes and publishes snapshots over a watch channel
pub struct PoolMonitor<F> {
    resolver: PoolResolver,
    connect: F,
    poll_interval: Duration,
    tx: watch::Sender<PoolSnapshot>,
}

impl<C, F> PoolMonitor<F>
where
    C: ChainQuery,
    F: Fn() -> Result<C, ChainError>,
{
    pub fn new(resolver: PoolResolver, connect: F, poll_interval: Duration) -> Self {
        let (tx, _) = watch::channel(PoolSnapshot::default());
        Self {
            resolver,
            connect,
            poll_interval,
            tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<PoolSnapshot> {
        self.tx.subscribe()
    }

    /// Run a single resolution pass and publish the outcome.
    ///
    /// Only a connection-level failure surfaces here; per-pool problems
    /// already got absorbed by the resolver.
    pub async fn refresh_once(&self) -> Result<Vec<PoolInfo>, ResolveError> {
        self.tx.send_modify(|snapshot| snapshot.loading = true);

        let result = match (self.connect)() {
            Ok(client) => self.resolver.resolve(client).await,
            Err(e) => Err(ResolveError::Connection(e)),
        };

        match &result {
            Ok(pools) => {
                let pools = pools.clone();
                self.tx.send_modify(move |snapshot| {
                    snapshot.loading = false;
                    snapshot.pools = pools;
                    snapshot.fetched_at = Some(Utc::now());
                    snapshot.error = None;
                });
            }
            Err(e) => {
                let message = e.to_string();
                self.tx.send_modify(move |snapshot| {
                    snapshot.loading = false;
                    snapshot.error = Some(message);
                });
            }
        }
        result
    }

    /// Poll forever; a failed pass is logged and retried on the next tick
    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        loop {
            ticker.tick().await;
            match self.refresh_once().await {
                Ok(pools) => info!(pools = pools.len(), "pool snapshot refreshed"),
                Err(e) => error!(error = %e, "resolution pass failed"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pool::{AssetIndex, AssetMetadata, PoolIdentifier, PoolReserves};
    use crate::domain::resolver::ResolverConfig;
    use async_trait::async_trait;
    use serde_json::json;

    struct OnePoolChain;

    #[async_trait]
    impl ChainQuery for OnePoolChain {
        async fn enumerate_pool_keys(&self) -> Result<Vec<PoolIdentifier>, ChainError> {
            Ok(vec![PoolIdentifier::new(json!([
                {"parents": 1, "interior": "Here"},
                {"WithId": 1984}
            ]))])
        }

        async fn get_pool_reserves(
            &self,
            _id: &PoolIdentifier,
        ) -> Result<Option<PoolReserves>, ChainError> {
            Ok(Some(PoolReserves {
                native: 3_000_000,
                asset: 1_000_000,
            }))
        }

        async fn get_asset_metadata(
            &self,
            _index: AssetIndex,
        ) -> Result<Option<AssetMetadata>, ChainError> {
            Ok(Some(AssetMetadata {
                name: "Tether USD".to_string(),
                symbol: "USDT".to_string(),
                decimals: 6,
            }))
        }

        async fn disconnect(self) {}
    }

    struct DownChain;

    #[async_trait]
    impl ChainQuery for DownChain {
        async fn enumerate_pool_keys(&self) -> Result<Vec<PoolIdentifier>, ChainError> {
            Err(ChainError::Connection("connection refused".to_string()))
        }

        async fn get_pool_reserves(
            &self,
            _id: &PoolIdentifier,
        ) -> Result<Option<PoolReserves>, ChainError> {
            Ok(None)
        }

        async fn get_asset_metadata(
            &self,
            _index: AssetIndex,
        ) -> Result<Option<AssetMetadata>, ChainError> {
            Ok(None)
        }

        async fn disconnect(self) {}
    }

    fn monitor<C, F>(connect: F) -> PoolMonitor<F>
    where
        C: ChainQuery,
        F: Fn() -> Result<C, ChainError>,
    {
        PoolMonitor::new(
            PoolResolver::new(ResolverConfig::default()),
            connect,
            Duration::from_millis(10),
        )
    }

    #[tokio::test]
    async fn test_successful_pass_publishes_snapshot() {
        let monitor = monitor(|| Ok(OnePoolChain));
        let rx = monitor.subscribe();

        let pools = monitor.refresh_once().await.unwrap();
        assert_eq!(pools.len(), 1);

        let snapshot = rx.borrow();
        assert!(!snapshot.loading);
        assert_eq!(snapshot.pools.len(), 1);
        assert_eq!(snapshot.pools[0].symbol, "USDT");
        assert!(snapshot.fetched_at.is_some());
        assert!(snapshot.error.is_none());
    }

    #[tokio::test]
    async fn test_failed_pass_clears_loading_and_records_error() {
        let monitor = monitor(|| Ok(DownChain));
        let rx = monitor.subscribe();

        let result = monitor.refresh_once().await;
        assert!(matches!(result, Err(ResolveError::Connection(_))));

        let snapshot = rx.borrow();
        assert!(!snapshot.loading);
        assert!(snapshot.error.is_some());
        assert!(snapshot.pools.is_empty());
    }

    #[tokio::test]
    async fn test_failed_pass_keeps_previous_pools() {
        enum Mode {
            Up(OnePoolChain),
            Down(DownChain),
        }

        #[async_trait]
        impl ChainQuery for Mode {
            async fn enumerate_pool_keys(&self) -> Result<Vec<PoolIdentifier>, ChainError> {
                match self {
                    Mode::Up(c) => c.enumerate_pool_keys().await,
                    Mode::Down(c) => c.enumerate_pool_keys().await,
                }
            }

            async fn get_pool_reserves(
                &self,
                id: &PoolIdentifier,
            ) -> Result<Option<PoolReserves>, ChainError> {
                match self {
                    Mode::Up(c) => c.get_pool_reserves(id).await,
                    Mode::Down(c) => c.get_pool_reserves(id).await,
                }
            }

            async fn get_asset_metadata(
                &self,
                index: AssetIndex,
            ) -> Result<Option<AssetMetadata>, ChainError> {
                match self {
                    Mode::Up(c) => c.get_asset_metadata(index).await,
                    Mode::Down(c) => c.get_asset_metadata(index).await,
                }
            }

            async fn disconnect(self) {}
        }

        use std::sync::atomic::{AtomicBool, Ordering};
        let healthy = AtomicBool::new(true);
        let monitor = monitor(|| {
            Ok(if healthy.swap(false, Ordering::SeqCst) {
                Mode::Up(OnePoolChain)
            } else {
                Mode::Down(DownChain)
            })
        });
        let rx = monitor.subscribe();

        monitor.refresh_once().await.unwrap();
        assert!(monitor.refresh_once().await.is_err());

        let snapshot = rx.borrow();
        assert_eq!(snapshot.pools.len(), 1);
        assert!(snapshot.error.is_some());
    }
}
