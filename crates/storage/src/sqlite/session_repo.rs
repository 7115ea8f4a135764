use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;
use tryout_core::model::Role;

use crate::repository::{SessionRecord, SessionRepository, StorageError};

use super::SqliteRepository;

fn ser<E: ToString>(err: E) -> StorageError {
    StorageError::Serialization(err.to_string())
}

#[async_trait]
impl SessionRepository for SqliteRepository {
    async fn load_session(&self) -> Result<Option<SessionRecord>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT username, name, role, created_at, expires_at
            FROM session
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let role: String = row.try_get("role").map_err(ser)?;
        Ok(Some(SessionRecord {
            username: row.try_get("username").map_err(ser)?,
            name: row.try_get("name").map_err(ser)?,
            role: Role::from_backend(Some(&role)),
            created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(ser)?,
            expires_at: row.try_get::<DateTime<Utc>, _>("expires_at").map_err(ser)?,
        }))
    }

    async fn save_session(&self, record: &SessionRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO session (id, username, name, role, created_at, expires_at)
            VALUES (1, ?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                username = excluded.username,
                name = excluded.name,
                role = excluded.role,
                created_at = excluded.created_at,
                expires_at = excluded.expires_at
            ",
        )
        .bind(&record.username)
        .bind(&record.name)
        .bind(record.role.as_str())
        .bind(record.created_at)
        .bind(record.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }

    async fn clear_session(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM session WHERE id = 1")
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}
