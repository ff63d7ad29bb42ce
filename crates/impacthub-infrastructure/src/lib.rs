// Infrastructure layer - Technical implementations
// Depends on domain layer, implements its interfaces

pub mod config;
pub mod gateway;
pub mod http;
pub mod logging;
pub mod persistence;
