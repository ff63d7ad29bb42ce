mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::DomainError;

pub use store::SessionStore;

/// The bearer token pair issued by the backend at login.
///
/// The access token is swapped on every refresh while the refresh token stays
/// put; both are dropped together on logout or when a refresh is rejected.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    access_token: String,
    refresh_token: Option<String>,
    updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session
    pub fn new(access_token: String, refresh_token: Option<String>) -> Result<Self, DomainError> {
        if access_token.trim().is_empty() {
            return Err(DomainError::Validation(
                "Access token cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            access_token,
            refresh_token: refresh_token.filter(|t| !t.trim().is_empty()),
            updated_at: Utc::now(),
        })
    }

    /// Restore session from persistence
    pub fn restore(
        access_token: String,
        refresh_token: Option<String>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            updated_at,
        }
    }

    /// Replace the access token after a successful refresh
    pub fn refresh_access(&mut self, access_token: String) -> Result<(), DomainError> {
        if access_token.trim().is_empty() {
            return Err(DomainError::Validation(
                "Access token cannot be empty".to_string(),
            ));
        }

        self.access_token = access_token;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }

    // Getters
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

// Tokens stay out of logs and panic messages.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"***")
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("updated_at", &self.updated_at)
            .finish()
    }
}
