//! History Store Adapter — persists synthesized reports per user.
//!
//! Rows are immutable: each synthesis inserts a brand-new record, reads come
//! back newest first capped at 10, and the only mutation is an explicit
//! user delete. Saving is a best-effort side channel: a failed insert is
//! logged and the user still gets their freshly generated report.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

/// Maximum records returned by a history listing.
pub const HISTORY_LIMIT: i64 = 10;

/// Persisted subset of a synthesized report.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct HistoryRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub persona_id: String,
    pub participant_name: Option<String>,
    pub raw_text: String,
    pub created_at: DateTime<Utc>,
}

/// Inserts one immutable history row and returns its id.
pub async fn save(
    pool: &PgPool,
    user_id: Uuid,
    title: &str,
    persona_id: &str,
    participant_name: Option<&str>,
    raw_text: &str,
    created_at: DateTime<Utc>,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO reports (id, user_id, title, persona_id, participant_name, raw_text, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(title)
    .bind(persona_id)
    .bind(participant_name)
    .bind(raw_text)
    .bind(created_at)
    .execute(pool)
    .await?;
    Ok(id)
}

/// Best-effort save: logs and swallows failure, returning the id on success.
#[allow(clippy::too_many_arguments)]
pub async fn save_best_effort(
    pool: &PgPool,
    user_id: Uuid,
    title: &str,
    persona_id: &str,
    participant_name: Option<&str>,
    raw_text: &str,
    created_at: DateTime<Utc>,
) -> Option<Uuid> {
    match save(
        pool,
        user_id,
        title,
        persona_id,
        participant_name,
        raw_text,
        created_at,
    )
    .await
    {
        Ok(id) => Some(id),
        Err(e) => {
            warn!("History save failed (report still returned to user): {e}");
            None
        }
    }
}

/// The user's most recent reports, newest first, capped at `HISTORY_LIMIT`.
pub async fn list_recent(pool: &PgPool, user_id: Uuid) -> Result<Vec<HistoryRecord>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, user_id, title, persona_id, participant_name, raw_text, created_at
        FROM reports
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(HISTORY_LIMIT)
    .fetch_all(pool)
    .await
}

/// Deletes one record owned by the user. Returns whether a row was removed.
pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM reports WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
