use async_trait::async_trait;

use super::{Credentials, LoginGrant, Registration, User};
use crate::shared::DomainError;

/// Backend authentication endpoints
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a token pair. Does not touch the session store.
    async fn login(&self, credentials: &Credentials) -> Result<LoginGrant, DomainError>;

    async fn register(&self, registration: &Registration) -> Result<User, DomainError>;

    /// Check the stored access token against the backend.
    async fn verify_token(&self) -> Result<(), DomainError>;

    /// Swap the stored access token for a new one using the refresh token.
    /// Clears the session and fails with `SessionExpired` when that is not possible.
    async fn refresh_session(&self) -> Result<(), DomainError>;
}
