//! Hubpools - Asset Hub liquidity pool resolver
//! Built with Domain-Driven Design principles

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export main types for convenience
pub use domain::pool::{AssetIndex, AssetMetadata, PoolIdentifier, PoolInfo, PoolReserves};
pub use domain::resolver::{PoolResolver, ResolverConfig};
pub use infrastructure::chain::ChainQuery;
