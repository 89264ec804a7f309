use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::{IntroView, SurveyView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", IntroView)] Intro {},
        #[route("/survey", SurveyView)] Survey {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
