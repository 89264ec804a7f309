mod preference;
mod profile;
mod record;
mod session;
mod stimulus;

pub use preference::{Preference, PreferenceError};
pub use profile::{
    ExperienceLevel, ProceduresPerformed, ProfileDraft, ProfileError, QuestionnaireVariant,
    RespondentProfile,
};
pub use record::{NO_RESPONSE, SubmissionRecord, record_name, sanitize_record_name};
pub use session::{SessionError, SessionStore, SurveySession};
pub use stimulus::{STIMULUS_COUNT, Stimulus, StimulusError, StimulusSet, question_label};
