use survey_core::model::{Preference, Stimulus, SurveySession};

/// Presentation-agnostic snapshot of the current question.
///
/// Carries the navigation and completion affordances so the UI only decides
/// how to draw them, not whether they apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub index: usize,
    pub total: usize,
    pub label: String,
    pub locator: String,
    pub selected: Option<Preference>,
    pub can_previous: bool,
    pub can_next: bool,
    pub is_last: bool,
    pub can_submit: bool,
    pub answered: usize,
}

impl QuestionView {
    pub(crate) fn project(session: &SurveySession, stimulus: &Stimulus) -> Self {
        Self {
            index: session.current_index(),
            total: session.len(),
            label: stimulus.label(),
            locator: stimulus.locator().to_string(),
            selected: session.current_answer(),
            can_previous: session.can_retreat(),
            can_next: session.can_advance(),
            is_last: session.is_last(),
            can_submit: session.can_submit(),
            answered: session.answers().iter().filter(|a| a.is_some()).count(),
        }
    }
}
