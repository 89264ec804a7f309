use dioxus::prelude::*;
use services::{QuestionView, VideoEmbed};
use survey_core::model::Preference;

use crate::views::ViewState;
use crate::vm::SurveyIntent;

const PROMPT: &str = "Which of the two side videos (left or right) do you think best \
    reflects reality in terms of accuracy in depth estimation?";

const PLACEHOLDER: &str = "Select an option";

#[component]
pub(super) fn QuestionPanel(
    question: QuestionView,
    video: ViewState<VideoEmbed>,
    on_intent: Callback<SurveyIntent>,
) -> Element {
    let group = format!("question-{}", question.index);
    let selected = question.selected;

    rsx! {
        section { class: "question",
            h3 { "{question.label}" }
            div { class: "question__video",
                match video {
                    ViewState::Ready(embed) => rsx! {
                        video {
                            class: "responsive-video",
                            controls: true,
                            style: "width: 100%; max-width: {embed.max_width}px; height: auto;",
                            source { src: "{embed.data_uri}", r#type: "video/mp4" }
                            "Your browser does not support the video tag."
                        }
                    },
                    ViewState::Loading => rsx! {
                        p { class: "muted", "Loading video..." }
                    },
                    ViewState::Error(err) => rsx! {
                        p { class: "notice notice--error", "{err.message()}" }
                    },
                    ViewState::Idle => rsx! {},
                }
            }
            fieldset { class: "question__options",
                legend { "{PROMPT}" }
                label {
                    input {
                        id: "answer-none",
                        r#type: "radio",
                        name: "{group}",
                        checked: selected.is_none(),
                        onchange: move |_| on_intent.call(SurveyIntent::Select(None)),
                    }
                    "{PLACEHOLDER}"
                }
                for preference in Preference::ALL {
                    label { key: "{preference}",
                        input {
                            id: "answer-{preference}",
                            r#type: "radio",
                            name: "{group}",
                            checked: selected == Some(preference),
                            onchange: move |_| on_intent.call(SurveyIntent::Select(Some(preference))),
                        }
                        "{preference}"
                    }
                }
            }
            div { class: "question__nav",
                button {
                    id: "question-previous",
                    class: "btn",
                    r#type: "button",
                    disabled: !question.can_previous,
                    onclick: move |_| on_intent.call(SurveyIntent::Previous),
                    "Previous"
                }
                button {
                    id: "question-next",
                    class: "btn",
                    r#type: "button",
                    disabled: !question.can_next,
                    onclick: move |_| on_intent.call(SurveyIntent::Next),
                    "Next"
                }
            }
            if question.is_last {
                button {
                    id: "question-submit",
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: !question.can_submit,
                    onclick: move |_| on_intent.call(SurveyIntent::Submit),
                    "Submit Answers"
                }
            }
        }
    }
}
