mod form;
mod question;

use dioxus::prelude::*;
use services::{NavigationIntent, SUCCESS_MESSAGE};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ProfileFormVm, SurveyIntent, SurveyOutcome, SurveyVm, load_video, start_survey};
use form::ProfileForm;
use question::QuestionPanel;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn SurveyView() -> Element {
    let ctx = use_context::<AppContext>();
    let survey_loop = ctx.survey_loop();
    let variant = ctx.variant();

    let form = use_signal(move || ProfileFormVm::new(variant));
    let error = use_signal(|| None::<ViewError>);
    let vm = use_signal(|| None::<SurveyVm>);
    let submitting = use_signal(|| false);

    let survey_loop_for_start = survey_loop.clone();
    let resource = use_resource(move || {
        let survey_loop = survey_loop_for_start.clone();
        let mut vm = vm;
        async move {
            let started = start_survey(&survey_loop)?;
            vm.set(Some(started));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    let current_index = use_memo(move || vm.read().as_ref().map_or(0, SurveyVm::current_index));
    let survey_loop_for_video = survey_loop.clone();
    let video_resource = use_resource(move || {
        let survey_loop = survey_loop_for_video.clone();
        let index = current_index();
        async move { load_video(&survey_loop, index).await }
    });
    let video = view_state_from_resource(&video_resource);

    let dispatch_intent = {
        let survey_loop = survey_loop.clone();
        use_callback(move |intent: SurveyIntent| {
            let mut error = error;
            let mut vm = vm;
            let mut submitting = submitting;

            let navigation = match intent {
                SurveyIntent::Select(value) => Some(NavigationIntent::Answer(value)),
                SurveyIntent::Previous => Some(NavigationIntent::Previous),
                SurveyIntent::Next => Some(NavigationIntent::Next),
                SurveyIntent::Submit => None,
            };

            if let Some(navigation) = navigation {
                let result = vm.write().as_mut().map(|vm| vm.navigate(navigation));
                match result {
                    Some(Ok(_)) => error.set(None),
                    Some(Err(err)) => error.set(Some(err)),
                    None => error.set(Some(ViewError::Unknown)),
                }
                return;
            }

            if submitting() {
                return;
            }
            submitting.set(true);
            let draft = form.read().draft();
            let survey_loop = survey_loop.clone();
            spawn(async move {
                let taken = {
                    let mut guard = vm.write();
                    guard.take()
                };
                let Some(mut vm_value) = taken else {
                    submitting.set(false);
                    error.set(Some(ViewError::Unknown));
                    return;
                };

                let result = vm_value.submit(&survey_loop, draft).await;

                // Put the survey back even on error so answers are not lost.
                {
                    let mut guard = vm.write();
                    *guard = Some(vm_value);
                }
                submitting.set(false);

                match result {
                    Ok(SurveyOutcome::Submitted(report)) => {
                        tracing::info!(record = %report.record_name, "survey submitted");
                        error.set(None);
                    }
                    Ok(SurveyOutcome::Continue) => error.set(None),
                    Err(err) => error.set(Some(err)),
                }
            });
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<SurveyTestHandles>() {
                handles.register(dispatch_intent, vm, form);
            }
        }
    }

    let has_name = form.read().has_name();
    let vm_guard = vm.read();
    let question = vm_guard.as_ref().and_then(SurveyVm::question);
    let report = vm_guard.as_ref().and_then(SurveyVm::report).cloned();
    drop(vm_guard);

    rsx! {
        div { class: "page survey",
            ProfileForm { form }
            if has_name {
                h2 { "Questionnaire" }
                match state {
                    ViewState::Idle | ViewState::Loading => rsx! {
                        p { "Loading..." }
                    },
                    ViewState::Error(err) => rsx! {
                        p { class: "notice notice--error", "{err.message()}" }
                    },
                    ViewState::Ready(()) => rsx! {
                        if let Some(report) = report {
                            for line in report.errors() {
                                p { class: "notice notice--error", "{line}" }
                            }
                            p { id: "survey-saved", class: "notice notice--success", "{SUCCESS_MESSAGE}" }
                        } else if let Some(question) = question {
                            QuestionPanel { question, video: video.clone(), on_intent: dispatch_intent }
                        }
                    },
                }
                if let Some(err) = error() {
                    p { class: "notice notice--error", "{err.message()}" }
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SurveyTestHandles {
    dispatch: Rc<RefCell<Option<Callback<SurveyIntent>>>>,
    vm: Rc<RefCell<Option<Signal<Option<SurveyVm>>>>>,
    form: Rc<RefCell<Option<Signal<ProfileFormVm>>>>,
}

#[cfg(test)]
impl SurveyTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<SurveyIntent>,
        vm: Signal<Option<SurveyVm>>,
        form: Signal<ProfileFormVm>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
        *self.form.borrow_mut() = Some(form);
    }

    pub(crate) fn dispatch(&self) -> Callback<SurveyIntent> {
        (*self.dispatch.borrow()).expect("survey dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<Option<SurveyVm>> {
        (*self.vm.borrow()).expect("survey vm registered")
    }

    pub(crate) fn form(&self) -> Signal<ProfileFormVm> {
        (*self.form.borrow()).expect("survey form registered")
    }
}
