mod intro;
mod state;
mod survey;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use intro::IntroView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use survey::SurveyView;
