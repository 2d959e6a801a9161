//! Infrastructure layer - external interfaces

pub mod chain;
