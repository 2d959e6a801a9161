//! Error handling for the application

use thiserror::Error;

/// Errors raised by a chain-query client
#[derive(Error, Debug)]
pub enum ChainError {
    #[error("chain endpoint unreachable: {0}")]
    Connection(String),

    #[error("unexpected gateway response: {0}")]
    BadResponse(String),
}

/// Errors surfaced by a whole pool-resolution pass.
///
/// Per-pool failures (undecodable key, missing reserves or metadata, call
/// timeout) never reach the caller; they only drop that pool from the result.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("chain connection failed: {0}")]
    Connection(#[from] ChainError),
}
