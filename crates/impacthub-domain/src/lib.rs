// Domain layer - Pure business logic
// No dependencies on infrastructure or presentation layers

pub mod auth;
pub mod donation;
pub mod project;
pub mod session;
pub mod shared;

// Re-exports for convenience
pub use shared::{DomainError, DonationId, ErrorCode, ErrorSeverity, ProjectId, UserId};
