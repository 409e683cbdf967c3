//! Translation record CRUD keyed by (owner, field, language).

use super::Store;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;
use translatable_core::{
    error::TranslatableError,
    record::{OwnerRef, TranslationRecord},
    traits::TranslationStore,
};
use uuid::Uuid;

const RECORD_COLUMNS: &str =
    "id, owner_kind, owner_id, field, language, value, created_at, updated_at";

/// Raw row: id, owner_kind, owner_id, field, language, value, created_at, updated_at.
type RecordRow = (
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
);

/// Format a timestamp for storage. Nanosecond precision keeps freshness
/// comparisons exact.
pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, TranslatableError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| TranslatableError::Storage(format!("invalid timestamp '{raw}': {e}")))
}

fn into_record(row: RecordRow) -> Result<TranslationRecord, TranslatableError> {
    let (id, owner_kind, owner_id, field, language, value, created_at, updated_at) = row;
    Ok(TranslationRecord {
        id,
        owner: OwnerRef {
            kind: owner_kind,
            id: owner_id,
        },
        field,
        language,
        value,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

#[async_trait]
impl TranslationStore for Store {
    async fn find(
        &self,
        owner: &OwnerRef,
        field: &str,
        language: &str,
    ) -> Result<Option<TranslationRecord>, TranslatableError> {
        let row: Option<RecordRow> = sqlx::query_as(&format!(
            "SELECT {RECORD_COLUMNS} FROM translations \
             WHERE owner_kind = ? AND owner_id = ? AND field = ? AND language = ?"
        ))
        .bind(&owner.kind)
        .bind(&owner.id)
        .bind(field)
        .bind(language)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TranslatableError::Storage(format!("query failed: {e}")))?;

        row.map(into_record).transpose()
    }

    async fn upsert(
        &self,
        owner: &OwnerRef,
        field: &str,
        language: &str,
        value: &str,
    ) -> Result<TranslationRecord, TranslatableError> {
        let id = Uuid::new_v4().to_string();
        let now = format_timestamp(Utc::now());

        let row: RecordRow = sqlx::query_as(&format!(
            "INSERT INTO translations \
             (id, owner_kind, owner_id, field, language, value, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT(owner_kind, owner_id, field, language) \
             DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at \
             RETURNING {RECORD_COLUMNS}"
        ))
        .bind(&id)
        .bind(&owner.kind)
        .bind(&owner.id)
        .bind(field)
        .bind(language)
        .bind(value)
        .bind(&now)
        .bind(&now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| TranslatableError::Storage(format!("upsert translation failed: {e}")))?;

        debug!("store: upserted {owner} {field}/{language}");
        into_record(row)
    }

    async fn delete_matching(
        &self,
        owner: &OwnerRef,
        field: &str,
        language: &str,
    ) -> Result<u64, TranslatableError> {
        let result = sqlx::query(
            "DELETE FROM translations \
             WHERE owner_kind = ? AND owner_id = ? AND field = ? AND language = ?",
        )
        .bind(&owner.kind)
        .bind(&owner.id)
        .bind(field)
        .bind(language)
        .execute(&self.pool)
        .await
        .map_err(|e| TranslatableError::Storage(format!("delete failed: {e}")))?;

        Ok(result.rows_affected())
    }

    async fn list_all(&self, owner: &OwnerRef) -> Result<Vec<TranslationRecord>, TranslatableError> {
        let rows: Vec<RecordRow> = sqlx::query_as(&format!(
            "SELECT {RECORD_COLUMNS} FROM translations \
             WHERE owner_kind = ? AND owner_id = ? ORDER BY language, field"
        ))
        .bind(&owner.kind)
        .bind(&owner.id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TranslatableError::Storage(format!("query failed: {e}")))?;

        rows.into_iter().map(into_record).collect()
    }

    async fn delete_owner(&self, owner: &OwnerRef) -> Result<u64, TranslatableError> {
        let result =
            sqlx::query("DELETE FROM translations WHERE owner_kind = ? AND owner_id = ?")
                .bind(&owner.kind)
                .bind(&owner.id)
                .execute(&self.pool)
                .await
                .map_err(|e| TranslatableError::Storage(format!("delete failed: {e}")))?;

        Ok(result.rows_affected())
    }
}
