use std::sync::Arc;

use impacthub_domain::auth::{AuthApi, Credentials, Registration, User};
use impacthub_domain::session::SessionStore;
use impacthub_domain::DomainError;
use tracing::{info, warn};

/// Where the stored session stands after startup validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Nothing stored
    Anonymous,
    /// The stored token is accepted by the backend
    Active,
    /// The stored token was rejected and could not be renewed; it has been cleared
    Expired,
}

pub struct AuthService {
    api: Arc<dyn AuthApi>,
    sessions: Arc<dyn SessionStore>,
}

impl AuthService {
    pub fn new(api: Arc<dyn AuthApi>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { api, sessions }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Option<User>, DomainError> {
        let credentials = Credentials::new(username, password)?;
        let grant = self.api.login(&credentials).await?;

        self.sessions.set(&grant.session).await?;
        info!(username = %credentials.username, "Logged in");

        Ok(grant.user)
    }

    /// Create an account. The caller still has to log in afterwards.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        confirmation: &str,
    ) -> Result<User, DomainError> {
        let registration = Registration::new(username, email, password, confirmation)?;
        let user = self.api.register(&registration).await?;
        info!(username = %user.username, "Registered new account");
        Ok(user)
    }

    pub async fn logout(&self) -> Result<(), DomainError> {
        self.sessions.clear().await?;
        info!("Logged out");
        Ok(())
    }

    pub async fn is_authenticated(&self) -> Result<bool, DomainError> {
        Ok(self.sessions.get().await?.is_some())
    }

    /// Validate the stored session against the backend, renewing it once if
    /// the access token was rejected. Network failures are returned as errors
    /// and leave the session in place.
    pub async fn restore_session(&self) -> Result<SessionStatus, DomainError> {
        if self.sessions.get().await?.is_none() {
            return Ok(SessionStatus::Anonymous);
        }

        match self.api.verify_token().await {
            Ok(()) => return Ok(SessionStatus::Active),
            Err(e) if e.is_session_expired() => {}
            Err(e) => return Err(e),
        }

        match self.api.refresh_session().await {
            Ok(()) => {}
            // the refresh path already cleared the store
            Err(e) if e.is_session_expired() => return Ok(SessionStatus::Expired),
            Err(e) => return Err(e),
        }

        match self.api.verify_token().await {
            Ok(()) => Ok(SessionStatus::Active),
            Err(e) if e.is_session_expired() => {
                warn!("Renewed token rejected, clearing session");
                self.sessions.clear().await?;
                Ok(SessionStatus::Expired)
            }
            Err(e) => Err(e),
        }
    }
}
