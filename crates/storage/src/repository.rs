use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use survey_core::model::{Stimulus, SubmissionRecord};
use thiserror::Error;

/// Errors surfaced by sink and asset adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("authorization error: {0}")]
    Auth(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Local durable store of submission records. Append-only.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Persist one record under `record_name`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if a record with that name already
    /// exists, or other storage errors if the record cannot be written.
    async fn write(&self, record_name: &str, record: &SubmissionRecord) -> Result<(), StorageError>;
}

/// Remote spreadsheet that accepts appended rows.
#[async_trait]
pub trait TabularSink: Send + Sync {
    /// Append one row to the first worksheet of the spreadsheet named `sheet_name`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Auth`, `StorageError::NotFound` or
    /// `StorageError::Connection` when the append cannot be completed.
    async fn append_row(&self, sheet_name: &str, columns: &[String]) -> Result<(), StorageError>;
}

/// Read access to the video bytes behind each stimulus.
#[async_trait]
pub trait StimulusAssets: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` when the asset is missing, or
    /// `StorageError::Io` when it cannot be read.
    async fn read_stimulus(&self, stimulus: &Stimulus) -> Result<Vec<u8>, StorageError>;
}

/// A record as captured by the in-memory sink.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub name: String,
    pub payload: serde_json::Value,
}

/// A row as captured by the in-memory sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendedRow {
    pub sheet_name: String,
    pub columns: Vec<String>,
}

/// Simple in-memory adapters for testing and offline runs.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    records: Arc<Mutex<Vec<StoredRecord>>>,
    rows: Arc<Mutex<Vec<AppendedRow>>>,
    assets: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register video bytes under a stimulus locator.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn insert_asset(
        &self,
        locator: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .assets
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(locator.into(), bytes);
        Ok(())
    }

    /// Snapshot of written records, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn records(&self) -> Result<Vec<StoredRecord>, StorageError> {
        let guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    /// Snapshot of appended rows, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn rows(&self) -> Result<Vec<AppendedRow>, StorageError> {
        let guard = self
            .rows
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

#[async_trait]
impl RecordSink for InMemoryRepository {
    async fn write(&self, record_name: &str, record: &SubmissionRecord) -> Result<(), StorageError> {
        let payload = serde_json::to_value(record)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.iter().any(|stored| stored.name == record_name) {
            return Err(StorageError::Conflict(record_name.to_string()));
        }
        guard.push(StoredRecord {
            name: record_name.to_string(),
            payload,
        });
        Ok(())
    }
}

#[async_trait]
impl TabularSink for InMemoryRepository {
    async fn append_row(&self, sheet_name: &str, columns: &[String]) -> Result<(), StorageError> {
        let mut guard = self
            .rows
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push(AppendedRow {
            sheet_name: sheet_name.to_string(),
            columns: columns.to_vec(),
        });
        Ok(())
    }
}

#[async_trait]
impl StimulusAssets for InMemoryRepository {
    async fn read_stimulus(&self, stimulus: &Stimulus) -> Result<Vec<u8>, StorageError> {
        let guard = self
            .assets
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .get(stimulus.locator())
            .cloned()
            .ok_or_else(|| StorageError::NotFound(stimulus.locator().to_string()))
    }
}

/// Aggregates the sinks and asset store behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub records: Arc<dyn RecordSink>,
    pub sheets: Arc<dyn TabularSink>,
    pub assets: Arc<dyn StimulusAssets>,
}

impl Storage {
    #[must_use]
    pub fn from_repository(repo: InMemoryRepository) -> Self {
        let records: Arc<dyn RecordSink> = Arc::new(repo.clone());
        let sheets: Arc<dyn TabularSink> = Arc::new(repo.clone());
        let assets: Arc<dyn StimulusAssets> = Arc::new(repo);
        Self {
            records,
            sheets,
            assets,
        }
    }
}
