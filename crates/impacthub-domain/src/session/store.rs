use async_trait::async_trait;

use super::Session;
use crate::shared::DomainError;

/// Durable storage for the single token pair of the signed-in user.
///
/// Written by login (initial pair), by the HTTP client on refresh (access
/// token only) and cleared by logout or an irrecoverable refresh failure.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self) -> Result<Option<Session>, DomainError>;

    async fn set(&self, session: &Session) -> Result<(), DomainError>;

    async fn clear(&self) -> Result<(), DomainError>;

    async fn access_token(&self) -> Result<Option<String>, DomainError> {
        Ok(self.get().await?.map(|s| s.access_token().to_string()))
    }

    async fn refresh_token(&self) -> Result<Option<String>, DomainError> {
        Ok(self
            .get()
            .await?
            .and_then(|s| s.refresh_token().map(str::to_string)))
    }

    /// Swap in a freshly issued access token, keeping the refresh token.
    async fn replace_access_token(&self, access_token: String) -> Result<(), DomainError> {
        let mut session = self.get().await?.ok_or_else(|| {
            DomainError::SessionExpired("No session to refresh".to_string())
        })?;
        session.refresh_access(access_token)?;
        self.set(&session).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockStore {
        session: Mutex<Option<Session>>,
    }

    #[async_trait]
    impl SessionStore for MockStore {
        async fn get(&self) -> Result<Option<Session>, DomainError> {
            Ok(self.session.lock().unwrap().clone())
        }

        async fn set(&self, session: &Session) -> Result<(), DomainError> {
            *self.session.lock().unwrap() = Some(session.clone());
            Ok(())
        }

        async fn clear(&self) -> Result<(), DomainError> {
            *self.session.lock().unwrap() = None;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_replace_access_token_keeps_refresh_token() {
        let store = MockStore::default();
        let session = Session::new("old".to_string(), Some("refresh".to_string())).unwrap();
        store.set(&session).await.unwrap();

        store.replace_access_token("new".to_string()).await.unwrap();

        assert_eq!(store.access_token().await.unwrap().as_deref(), Some("new"));
        assert_eq!(store.refresh_token().await.unwrap().as_deref(), Some("refresh"));
    }

    #[tokio::test]
    async fn test_replace_access_token_without_session() {
        let store = MockStore::default();

        let result = store.replace_access_token("new".to_string()).await;

        assert!(matches!(result, Err(DomainError::SessionExpired(_))));
        assert!(store.get().await.unwrap().is_none());
    }
}
