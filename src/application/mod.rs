//! Application layer - service shell around the resolver

pub mod monitor;
pub mod report;

pub use monitor::{PoolMonitor, PoolSnapshot};
