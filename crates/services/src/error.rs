//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use survey_core::model::{ProfileError, SessionError};

/// Errors emitted by survey services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SurveyError {
    #[error("the questionnaire has already been submitted")]
    Submitted,
    #[error("answer the last question before submitting")]
    NotReady,
    #[error("no stimulus at position {0}")]
    UnknownStimulus(usize),
    #[error("Error loading video: {source}")]
    Asset {
        locator: String,
        #[source]
        source: StorageError,
    },
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Profile(#[from] ProfileError),
}
