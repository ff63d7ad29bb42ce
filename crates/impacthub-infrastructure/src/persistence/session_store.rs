use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use impacthub_domain::session::{Session, SessionStore};
use impacthub_domain::DomainError;

// The table only ever holds row 1
const SESSION_ROW_ID: i64 = 1;

#[derive(FromRow)]
struct SessionRow {
    token: String,
    refresh_token: Option<String>,
    updated_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> Session {
        Session::restore(self.token, self.refresh_token, self.updated_at)
    }
}

fn repository_error(operation: &str, e: sqlx::Error) -> DomainError {
    DomainError::Repository(format!("{} failed: {}", operation, e))
}

/// Token pair persisted in the local SQLite database, surviving restarts
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn get(&self) -> Result<Option<Session>, DomainError> {
        let query = "SELECT token, refresh_token, updated_at FROM session_tokens WHERE id = ?1";

        let row: Option<SessionRow> = sqlx::query_as(query)
            .bind(SESSION_ROW_ID)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| repository_error("Load session", e))?;

        Ok(row.map(SessionRow::into_session))
    }

    async fn set(&self, session: &Session) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO session_tokens (id, token, refresh_token, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                token = ?2,
                refresh_token = ?3,
                updated_at = ?4
        "#;

        sqlx::query(query)
            .bind(SESSION_ROW_ID)
            .bind(session.access_token())
            .bind(session.refresh_token())
            .bind(session.updated_at())
            .execute(&self.pool)
            .await
            .map_err(|e| repository_error("Save session", e))?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM session_tokens")
            .execute(&self.pool)
            .await
            .map_err(|e| repository_error("Clear session", e))?;

        Ok(())
    }
}
