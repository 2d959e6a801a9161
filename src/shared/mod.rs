//! Shared components - config, errors, and utilities

pub mod config;
pub mod errors;
pub mod utils;
