use async_trait::async_trait;
use tokio::sync::RwLock;

use impacthub_domain::session::{Session, SessionStore};
use impacthub_domain::DomainError;

/// Process-local session storage, lost on exit
#[derive(Default)]
pub struct InMemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self) -> Result<Option<Session>, DomainError> {
        Ok(self.session.read().await.clone())
    }

    async fn set(&self, session: &Session) -> Result<(), DomainError> {
        *self.session.write().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        *self.session.write().await = None;
        Ok(())
    }
}
