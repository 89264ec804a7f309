//! Filesystem adapters: JSON record directory and video asset directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use survey_core::model::{Stimulus, SubmissionRecord};
use tokio::io::AsyncWriteExt;

use crate::repository::{RecordSink, StimulusAssets, StorageError};

fn io_err(e: std::io::Error) -> StorageError {
    StorageError::Io(e.to_string())
}

/// Writes each record as `{dir}/{record_name}.json`, indented four spaces.
///
/// The directory is created on first write. Existing files are never replaced.
#[derive(Debug, Clone)]
pub struct JsonRecordStore {
    dir: PathBuf,
}

impl JsonRecordStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path_for(&self, record_name: &str) -> PathBuf {
        self.dir.join(format!("{record_name}.json"))
    }
}

pub(crate) fn to_pretty_json(record: &SubmissionRecord) -> Result<Vec<u8>, StorageError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    record
        .serialize(&mut ser)
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    Ok(buf)
}

#[async_trait]
impl RecordSink for JsonRecordStore {
    async fn write(&self, record_name: &str, record: &SubmissionRecord) -> Result<(), StorageError> {
        let body = to_pretty_json(record)?;
        tokio::fs::create_dir_all(&self.dir).await.map_err(io_err)?;

        let path = self.path_for(record_name);
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => StorageError::Conflict(path.display().to_string()),
                _ => io_err(e),
            })?;
        file.write_all(&body).await.map_err(io_err)?;
        file.flush().await.map_err(io_err)?;

        tracing::debug!(path = %path.display(), "wrote submission record");
        Ok(())
    }
}

/// Reads stimulus videos from files below `root`.
#[derive(Debug, Clone)]
pub struct FsStimulusAssets {
    root: PathBuf,
}

impl FsStimulusAssets {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl StimulusAssets for FsStimulusAssets {
    async fn read_stimulus(&self, stimulus: &Stimulus) -> Result<Vec<u8>, StorageError> {
        let path = self.root.join(stimulus.locator());
        tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound(path.display().to_string()),
            _ => io_err(e),
        })
    }
}
