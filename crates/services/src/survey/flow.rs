use std::fmt;
use std::sync::Arc;

use survey_core::model::{
    Preference, QuestionnaireVariant, SessionStore, StimulusSet, SurveySession,
};

use super::view::QuestionView;
use crate::error::SurveyError;

//
// ─── INTENTS ───────────────────────────────────────────────────────────────────
//

/// A discrete respondent action on the questionnaire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationIntent {
    /// Select an answer for the current question; `None` is the placeholder option.
    Answer(Option<Preference>),
    Previous,
    Next,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurveyPhase {
    Answering,
    Submitted,
}

//
// ─── FLOW ──────────────────────────────────────────────────────────────────────
//

/// State of one respondent's questionnaire, threaded through the UI event loop.
///
/// Every action goes through [`SurveyFlow::apply`]; rendering reads
/// [`SurveyFlow::view`] and never mutates.
pub struct SurveyFlow {
    variant: QuestionnaireVariant,
    stimuli: Arc<StimulusSet>,
    store: SessionStore,
    phase: SurveyPhase,
}

impl SurveyFlow {
    /// # Errors
    ///
    /// Returns `SurveyError::Session` if the stimulus set is empty.
    pub fn new(variant: QuestionnaireVariant, stimuli: Arc<StimulusSet>) -> Result<Self, SurveyError> {
        let mut flow = Self {
            variant,
            stimuli,
            store: SessionStore::new(),
            phase: SurveyPhase::Answering,
        };
        flow.initialize()?;
        Ok(flow)
    }

    /// Ensure the session exists. Safe to call on every render; never resets answers.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::Session` if the stimulus set is empty.
    pub fn initialize(&mut self) -> Result<(), SurveyError> {
        self.store.initialize(self.stimuli.len())?;
        Ok(())
    }

    #[must_use]
    pub fn variant(&self) -> QuestionnaireVariant {
        self.variant
    }

    #[must_use]
    pub fn phase(&self) -> SurveyPhase {
        self.phase
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.phase == SurveyPhase::Submitted
    }

    #[must_use]
    pub fn stimuli(&self) -> &StimulusSet {
        &self.stimuli
    }

    #[must_use]
    pub fn session(&self) -> Option<&SurveySession> {
        self.store.session()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.session().map_or(0, SurveySession::current_index)
    }

    /// Apply one respondent action.
    ///
    /// # Errors
    ///
    /// Returns `SurveyError::Submitted` once the flow has ended, and
    /// `SurveyError::Session` when a navigation gate rejects the move. The
    /// state is unchanged on error.
    pub fn apply(&mut self, intent: NavigationIntent) -> Result<usize, SurveyError> {
        if self.is_submitted() {
            return Err(SurveyError::Submitted);
        }
        let session = self.store.initialize(self.stimuli.len())?;
        let index = match intent {
            NavigationIntent::Answer(value) => {
                session.record_current(value);
                session.current_index()
            }
            NavigationIntent::Previous => session.retreat()?,
            NavigationIntent::Next => session.advance()?,
        };
        tracing::debug!(?intent, index, "applied survey intent");
        Ok(index)
    }

    /// Pure projection of the current question for rendering.
    #[must_use]
    pub fn view(&self) -> Option<QuestionView> {
        if self.is_submitted() {
            return None;
        }
        let session = self.store.session()?;
        let stimulus = self.stimuli.get(session.current_index())?;
        Some(QuestionView::project(session, stimulus))
    }

    pub(crate) fn mark_submitted(&mut self) {
        self.phase = SurveyPhase::Submitted;
    }
}

impl fmt::Debug for SurveyFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurveyFlow")
            .field("variant", &self.variant)
            .field("stimuli_len", &self.stimuli.len())
            .field("session", &self.store.session())
            .field("phase", &self.phase)
            .finish()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
