mod flow;
mod media;
mod submission;
mod view;
mod workflow;

// Public API of the survey subsystem.
pub use crate::error::SurveyError;
pub use flow::{NavigationIntent, SurveyFlow, SurveyPhase};
pub use media::{ImageEmbed, VIDEO_MAX_WIDTH, VideoEmbed};
pub use submission::{SUCCESS_MESSAGE, SinkOutcome, SubmissionPipeline, SubmissionReport};
pub use view::QuestionView;
pub use workflow::SurveyLoopService;
