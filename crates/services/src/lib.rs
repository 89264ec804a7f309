#![forbid(unsafe_code)]

pub mod error;
pub mod survey;

pub use survey_core::Clock;

pub use error::SurveyError;
pub use survey::{
    ImageEmbed, NavigationIntent, QuestionView, SUCCESS_MESSAGE, SinkOutcome, SubmissionPipeline,
    SubmissionReport, SurveyFlow, SurveyLoopService, SurveyPhase, VIDEO_MAX_WIDTH, VideoEmbed,
};
