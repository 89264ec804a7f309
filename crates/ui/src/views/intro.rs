use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;

pub const TITLE: &str = "Qualitative Performance Assessment of EndoDAC and Depth Pro Models";

const BACKGROUND: &str = "Colorectal cancer is one of the leading causes of death worldwide, \
    and its early detection by colonoscopy is critical to improve the likelihood of success. \
    However, two-dimensional visualization during colonoscopy can limit diagnostic accuracy, \
    increasing the risk of undetected lesions. Depth estimation is therefore crucial to \
    reconstruct a three-dimensional view of the bowel environment, improving diagnostic \
    accuracy. However, obtaining accurate reference data (ground truth) in the clinical setting \
    is particularly difficult due to the complexity of images and anatomical variability of \
    patients. In this context, foundation AI models, pre-trained on huge amounts of data, could \
    be a promising solution.";

const PURPOSE: &str = "To evaluate the effectiveness of AI models of depth estimation in \
    endoscopy, it is crucial to involve clinicians directly, given the absence of an accurate \
    ground truth with which to compare artificial intelligence predictions. For this reason, a \
    questionnaire was developed for endoscopy specialists, with the aim of collecting opinions \
    on the reliability of depth estimates generated by the analyzed models.";

const LAYOUT: &str = "The questionnaire consists of viewing several videos. In the center, a \
    real colonoscopy video will be displayed, while on the left and right, depth maps generated \
    by two different AI models will be shown.";

const LEGEND: &str = "The depth maps generated by the two predictive models use a color \
    gradient, where blue represents the deepest areas, transitioning through green and yellow \
    for intermediate depths, and finally red indicating the shallowest areas.";

#[component]
pub fn IntroView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let example = ctx.example_image().cloned();

    rsx! {
        div { class: "page intro",
            h1 { "{TITLE}" }
            p { class: "intro__description", em { "{BACKGROUND}" } }
            p { class: "intro__description", em { "{PURPOSE}" } }
            p { class: "intro__legend", strong { "{LAYOUT}" } }
            p { class: "intro__legend", strong { "{LEGEND}" } }
            if let Some(image) = example {
                figure { class: "intro__example",
                    img { src: "{image.data_uri}", width: "500", alt: "{image.caption}" }
                    figcaption { "{image.caption}" }
                }
            }
            button {
                id: "intro-continue",
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| {
                    let _ = navigator.push(Route::Survey {});
                },
                "Continue"
            }
        }
    }
}
