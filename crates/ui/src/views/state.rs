use dioxus::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    EmptySurvey,
    MissingName,
    NotReady,
    AlreadySubmitted,
    Video(String),
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Unknown => "Something went wrong. Please try again.".to_string(),
            Self::EmptySurvey => "No videos are configured for this questionnaire.".to_string(),
            Self::MissingName => "Please enter your name".to_string(),
            Self::NotReady => "Answer the last question before submitting.".to_string(),
            Self::AlreadySubmitted => "Your answers were already submitted.".to_string(),
            Self::Video(detail) => format!("Error loading video: {detail}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
