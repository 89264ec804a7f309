use std::sync::Arc;

use services::{ImageEmbed, SurveyLoopService};
use survey_core::model::QuestionnaireVariant;

pub trait UiApp: Send + Sync {
    fn survey_loop(&self) -> Arc<SurveyLoopService>;

    /// Example depth-map frame for the intro page, if one was found at startup.
    fn example_image(&self) -> Option<ImageEmbed>;
}

#[derive(Clone)]
pub struct AppContext {
    survey_loop: Arc<SurveyLoopService>,
    example_image: Option<ImageEmbed>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            survey_loop: app.survey_loop(),
            example_image: app.example_image(),
        }
    }

    #[must_use]
    pub fn survey_loop(&self) -> Arc<SurveyLoopService> {
        Arc::clone(&self.survey_loop)
    }

    #[must_use]
    pub fn variant(&self) -> QuestionnaireVariant {
        self.survey_loop.variant()
    }

    #[must_use]
    pub fn example_image(&self) -> Option<&ImageEmbed> {
        self.example_image.as_ref()
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
