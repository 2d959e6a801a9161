//! Configuration - TOML file plus CLI overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;
use std::{fs, path::Path};

#[derive(Debug, Clone, Deserialize)]
pub struct ChainCfg {
    pub endpoint: String,
    pub call_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResolverCfg {
    pub concurrency: Option<usize>,
    pub poll_interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub chain: ChainCfg,
    pub resolver: Option<ResolverCfg>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())?;
        let cfg: Self = toml::from_str(&s).context("parse Config.toml")?;
        Ok(cfg)
    }
}

/// Effective application settings after merging CLI args over the config
/// file over built-in defaults.
#[derive(Debug, Clone)]
pub struct AppCfg {
    pub endpoint: String,
    pub call_timeout: Duration,
    pub concurrency: usize,
    pub poll_interval: Duration,
}

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080";
pub const DEFAULT_CALL_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_CONCURRENCY: usize = 8;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5_000;

impl AppCfg {
    /// Merge with priority: CLI args > config file > defaults
    pub fn build(
        file: Option<Config>,
        endpoint: Option<String>,
        call_timeout_ms: Option<u64>,
        concurrency: Option<usize>,
        poll_interval_ms: Option<u64>,
    ) -> Self {
        let (file_chain, file_resolver) = match file {
            Some(cfg) => (Some(cfg.chain), cfg.resolver),
            None => (None, None),
        };

        let endpoint = endpoint
            .or_else(|| file_chain.as_ref().map(|c| c.endpoint.clone()))
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let call_timeout_ms = call_timeout_ms
            .or_else(|| file_chain.as_ref().and_then(|c| c.call_timeout_ms))
            .unwrap_or(DEFAULT_CALL_TIMEOUT_MS);
        let concurrency = concurrency
            .or_else(|| file_resolver.as_ref().and_then(|r| r.concurrency))
            .unwrap_or(DEFAULT_CONCURRENCY);
        let poll_interval_ms = poll_interval_ms
            .or_else(|| file_resolver.as_ref().and_then(|r| r.poll_interval_ms))
            .unwrap_or(DEFAULT_POLL_INTERVAL_MS);

        Self {
            endpoint,
            call_timeout: Duration::from_millis(call_timeout_ms),
            concurrency: concurrency.max(1),
            poll_interval: Duration::from_millis(poll_interval_ms),
        }
    }
}

impl Default for AppCfg {
    fn default() -> Self {
        Self::build(None, None, None, None, None)
    }
}
