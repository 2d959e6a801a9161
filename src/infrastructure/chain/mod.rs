//! Chain access - the query capability trait and its HTTP implementation

mod client;
mod http;

pub use client::ChainQuery;
pub use http::{HttpChainClient, HttpChainConfig};
