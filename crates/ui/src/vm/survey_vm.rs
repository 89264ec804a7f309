use services::{
    NavigationIntent, QuestionView, SubmissionReport, SurveyError, SurveyFlow, SurveyLoopService,
};
use survey_core::model::{Preference, ProfileDraft, SessionError};

use crate::views::ViewError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurveyIntent {
    Select(Option<Preference>),
    Previous,
    Next,
    Submit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurveyOutcome {
    Continue,
    Submitted(SubmissionReport),
}

/// Questionnaire state as seen by the survey page.
pub struct SurveyVm {
    flow: SurveyFlow,
    report: Option<SubmissionReport>,
}

impl SurveyVm {
    #[must_use]
    pub fn new(flow: SurveyFlow) -> Self {
        Self { flow, report: None }
    }

    #[must_use]
    pub fn question(&self) -> Option<QuestionView> {
        self.flow.view()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.flow.current_index()
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.flow.is_submitted()
    }

    #[must_use]
    pub fn report(&self) -> Option<&SubmissionReport> {
        self.report.as_ref()
    }

    /// # Errors
    ///
    /// Returns `ViewError::AlreadySubmitted` once the survey has ended.
    /// Rejected navigation moves are ignored.
    pub fn navigate(&mut self, intent: NavigationIntent) -> Result<SurveyOutcome, ViewError> {
        match self.flow.apply(intent) {
            Ok(_) | Err(SurveyError::Session(_)) => Ok(SurveyOutcome::Continue),
            Err(err) => Err(map_survey_error(err)),
        }
    }

    /// # Errors
    ///
    /// Returns a `ViewError` when the profile or session is not ready. Sink
    /// failures are carried in the returned report instead.
    pub async fn submit(
        &mut self,
        survey_loop: &SurveyLoopService,
        draft: ProfileDraft,
    ) -> Result<SurveyOutcome, ViewError> {
        let report = survey_loop
            .submit(&mut self.flow, draft)
            .await
            .map_err(map_survey_error)?;
        self.report = Some(report.clone());
        Ok(SurveyOutcome::Submitted(report))
    }
}

fn map_survey_error(err: SurveyError) -> ViewError {
    match err {
        SurveyError::Submitted => ViewError::AlreadySubmitted,
        SurveyError::NotReady => ViewError::NotReady,
        SurveyError::Profile(_) => ViewError::MissingName,
        SurveyError::Session(SessionError::Empty) => ViewError::EmptySurvey,
        SurveyError::Asset { source, .. } => ViewError::Video(source.to_string()),
        _ => ViewError::Unknown,
    }
}

/// # Errors
///
/// Returns `ViewError::EmptySurvey` when no stimuli are configured.
pub fn start_survey(survey_loop: &SurveyLoopService) -> Result<SurveyVm, ViewError> {
    survey_loop
        .start_session()
        .map(SurveyVm::new)
        .map_err(map_survey_error)
}

/// # Errors
///
/// Returns `ViewError::Video` with the loader's message when the file cannot be read.
pub async fn load_video(
    survey_loop: &SurveyLoopService,
    index: usize,
) -> Result<services::VideoEmbed, ViewError> {
    survey_loop.load_video(index).await.map_err(map_survey_error)
}
