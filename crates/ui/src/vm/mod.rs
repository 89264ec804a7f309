mod profile_vm;
mod survey_vm;

pub use profile_vm::ProfileFormVm;
pub use survey_vm::{SurveyIntent, SurveyOutcome, SurveyVm, load_video, start_survey};
