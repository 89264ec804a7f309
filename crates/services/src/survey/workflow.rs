use std::sync::Arc;

use storage::repository::StimulusAssets;
use survey_core::model::{ProfileDraft, QuestionnaireVariant, StimulusSet};

use super::flow::SurveyFlow;
use super::media::VideoEmbed;
use super::submission::{SubmissionPipeline, SubmissionReport};
use crate::error::SurveyError;

/// Orchestrates one questionnaire: session start, stimulus loading and submission.
#[derive(Clone)]
pub struct SurveyLoopService {
    variant: QuestionnaireVariant,
    stimuli: Arc<StimulusSet>,
    assets: Arc<dyn StimulusAssets>,
    pipeline: SubmissionPipeline,
}

impl SurveyLoopService {
    #[must_use]
    pub fn new(
        variant: QuestionnaireVariant,
        stimuli: StimulusSet,
        assets: Arc<dyn StimulusAssets>,
        pipeline: SubmissionPipeline,
    ) -> Self {
        Self {
            variant,
            stimuli: Arc::new(stimuli),
            assets,
            pipeline,
        }
    }

    #[must_use]
    pub fn variant(&self) -> QuestionnaireVariant {
        self.variant
    }

    #[must_use]
    pub fn stimuli(&self) -> &StimulusSet {
        &self.stimuli
    }

    /// Start a fresh questionnaire over the configured stimulus set.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::Session` if the stimulus set is empty.
    pub fn start_session(&self) -> Result<SurveyFlow, SurveyError> {
        let flow = SurveyFlow::new(self.variant, Arc::clone(&self.stimuli))?;
        tracing::info!(
            variant = self.variant.as_str(),
            questions = self.stimuli.len(),
            "started survey session"
        );
        Ok(flow)
    }

    /// Load and encode the video for the stimulus at `index`.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::UnknownStimulus` for an out-of-range index and
    /// `SurveyError::Asset` if the video cannot be read.
    pub async fn load_video(&self, index: usize) -> Result<VideoEmbed, SurveyError> {
        let stimulus = self
            .stimuli
            .get(index)
            .ok_or(SurveyError::UnknownStimulus(index))?;
        match self.assets.read_stimulus(stimulus).await {
            Ok(bytes) => Ok(VideoEmbed::from_mp4(&bytes)),
            Err(source) => {
                tracing::warn!(locator = stimulus.locator(), error = %source, "video load failed");
                Err(SurveyError::Asset {
                    locator: stimulus.locator().to_string(),
                    source,
                })
            }
        }
    }

    /// Validate the profile, then write the session to both sinks.
    ///
    /// The flow becomes terminal once the pipeline has run, whatever the sink
    /// outcomes were.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::Submitted` if the flow already ended,
    /// `SurveyError::NotReady` unless the last question is current and
    /// answered, and `SurveyError::Profile` if the profile is invalid.
    pub async fn submit(
        &self,
        flow: &mut SurveyFlow,
        draft: ProfileDraft,
    ) -> Result<SubmissionReport, SurveyError> {
        if flow.is_submitted() {
            return Err(SurveyError::Submitted);
        }
        let ready = flow.session().is_some_and(|s| s.can_submit());
        if !ready {
            return Err(SurveyError::NotReady);
        }
        let profile = draft.validate(flow.variant())?;
        let session = flow.session().ok_or(SurveyError::NotReady)?;

        let report = self.pipeline.submit(profile, session).await;
        flow.mark_submitted();
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::flow::NavigationIntent;
    use storage::repository::{InMemoryRepository, Storage};
    use survey_core::model::Preference;
    use survey_core::time::fixed_clock;

    fn build_service(repo: InMemoryRepository) -> SurveyLoopService {
        let storage = Storage::from_repository(repo);
        let pipeline = SubmissionPipeline::new(
            fixed_clock(),
            QuestionnaireVariant::Standard,
            storage.records,
            storage.sheets,
            "Responses",
        );
        SurveyLoopService::new(
            QuestionnaireVariant::Standard,
            StimulusSet::new(["a.mp4", "b.mp4"]).unwrap(),
            storage.assets,
            pipeline,
        )
    }

    #[tokio::test]
    async fn submit_requires_answered_last_question() {
        let service = build_service(InMemoryRepository::new());
        let mut flow = service.start_session().unwrap();
        flow.apply(NavigationIntent::Answer(Some(Preference::Left))).unwrap();

        let err = service
            .submit(&mut flow, ProfileDraft::new("Ann", false))
            .await
            .unwrap_err();
        assert!(matches!(err, SurveyError::NotReady));
        assert!(!flow.is_submitted());
    }

    #[tokio::test]
    async fn blank_name_is_rejected_before_any_write() {
        let repo = InMemoryRepository::new();
        let service = build_service(repo.clone());
        let mut flow = service.start_session().unwrap();
        flow.apply(NavigationIntent::Answer(Some(Preference::Left))).unwrap();
        flow.apply(NavigationIntent::Next).unwrap();
        flow.apply(NavigationIntent::Answer(Some(Preference::Right))).unwrap();

        let err = service
            .submit(&mut flow, ProfileDraft::new("   ", false))
            .await
            .unwrap_err();
        assert!(matches!(err, SurveyError::Profile(_)));
        assert!(repo.records().unwrap().is_empty());
        assert!(repo.rows().unwrap().is_empty());
    }

    #[tokio::test]
    async fn load_video_reports_missing_asset() {
        let repo = InMemoryRepository::new();
        repo.insert_asset("a.mp4", b"abc".to_vec()).unwrap();
        let service = build_service(repo);

        let embed = service.load_video(0).await.unwrap();
        assert_eq!(embed.data_uri, "data:video/mp4;base64,YWJj");

        let err = service.load_video(1).await.unwrap_err();
        assert!(err.to_string().starts_with("Error loading video:"));
        assert!(matches!(
            service.load_video(7).await,
            Err(SurveyError::UnknownStimulus(7))
        ));
    }
}
