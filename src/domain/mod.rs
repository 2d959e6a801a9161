//! Domain layer - core business logic and entities

pub mod location;
pub mod pool;
pub mod resolver;
