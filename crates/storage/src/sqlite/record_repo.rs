use sqlx::Row;
use survey_core::model::SubmissionRecord;

use super::SqliteRepository;
use crate::repository::{RecordSink, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn write_err(record_name: &str, e: sqlx::Error) -> StorageError {
    match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StorageError::Conflict(record_name.to_string())
        }
        other => StorageError::Connection(other.to_string()),
    }
}

impl SqliteRepository {
    /// Fetch the stored payload of a record, if present.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the query fails or the payload is not valid JSON.
    pub async fn fetch_payload(
        &self,
        record_name: &str,
    ) -> Result<Option<serde_json::Value>, StorageError> {
        let row = sqlx::query("SELECT payload FROM submission_records WHERE record_name = ?1")
            .bind(record_name)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.map(|row| {
            let text: String = row.try_get("payload").map_err(ser)?;
            serde_json::from_str(&text).map_err(ser)
        })
        .transpose()
    }

    /// Number of stored records.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the query fails.
    pub async fn count_records(&self) -> Result<u64, StorageError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM submission_records")
            .fetch_one(self.pool())
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let n: i64 = row.try_get("n").map_err(ser)?;
        u64::try_from(n).map_err(|_| StorageError::Serialization(format!("invalid count: {n}")))
    }
}

#[async_trait::async_trait]
impl RecordSink for SqliteRepository {
    async fn write(&self, record_name: &str, record: &SubmissionRecord) -> Result<(), StorageError> {
        let payload = serde_json::to_string(record).map_err(ser)?;

        sqlx::query(
            r"
                INSERT INTO submission_records (
                    record_name, respondent_name, variant, submitted_at, payload
                )
                VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(record_name)
        .bind(record.profile().name())
        .bind(record.variant().as_str())
        .bind(record.submitted_at())
        .bind(payload)
        .execute(self.pool())
        .await
        .map_err(|e| write_err(record_name, e))?;

        tracing::debug!(record_name, "stored submission record in sqlite");
        Ok(())
    }
}
