use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{Clock, ImageEmbed, SubmissionPipeline, SurveyLoopService};
use storage::repository::{InMemoryRepository, Storage};
use survey_core::model::{QuestionnaireVariant, StimulusSet};
use survey_core::time::fixed_now;

use crate::context::{UiApp, build_app_context};
use crate::views::survey::SurveyTestHandles;
use crate::views::{IntroView, SurveyView};

#[derive(Clone)]
struct TestApp {
    survey_loop: Arc<SurveyLoopService>,
    example_image: Option<ImageEmbed>,
}

impl UiApp for TestApp {
    fn survey_loop(&self) -> Arc<SurveyLoopService> {
        Arc::clone(&self.survey_loop)
    }

    fn example_image(&self) -> Option<ImageEmbed> {
        self.example_image.clone()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Intro,
    Survey,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    survey_handles: Option<SurveyTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    if let Some(handles) = props.survey_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Intro => rsx! { IntroView {} },
        ViewKind::Survey => rsx! { SurveyView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub repo: InMemoryRepository,
    pub survey_handles: Option<SurveyTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Run `f` inside the root scope so signal writes and spawns have a runtime.
    pub fn in_root<T>(&self, f: impl FnOnce() -> T) -> T {
        self.dom.in_scope(ScopeId::ROOT, f)
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(
    view: ViewKind,
    variant: QuestionnaireVariant,
    stimuli: StimulusSet,
) -> ViewHarness {
    let repo = InMemoryRepository::new();
    let storage = Storage::from_repository(repo.clone());
    let clock = Clock::fixed(fixed_now());
    let pipeline = SubmissionPipeline::new(
        clock,
        variant,
        Arc::clone(&storage.records),
        Arc::clone(&storage.sheets),
        "Responses_qualitative_assessment",
    );
    let survey_loop = Arc::new(SurveyLoopService::new(
        variant,
        stimuli,
        Arc::clone(&storage.assets),
        pipeline,
    ));

    let survey_handles = match view {
        ViewKind::Survey => Some(SurveyTestHandles::default()),
        ViewKind::Intro => None,
    };

    let app = Arc::new(TestApp {
        survey_loop,
        example_image: Some(ImageEmbed::from_png(&[0x89, 0x50], "Example Depth Maps from AI Models")),
    });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            survey_handles: survey_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        repo,
        survey_handles,
    }
}
