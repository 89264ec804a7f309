use dioxus::prelude::*;

use crate::vm::ProfileFormVm;

#[component]
pub(super) fn ProfileForm(form: Signal<ProfileFormVm>) -> Element {
    let mut form = form;
    let snapshot = form.read().clone();
    let experience_options = snapshot.experience_options();
    let name = snapshot.name().to_string();

    rsx! {
        section { class: "profile",
            fieldset { class: "profile__group",
                legend { "Are you a clinician?" }
                label {
                    input {
                        id: "clinician-yes",
                        r#type: "radio",
                        name: "clinician",
                        checked: snapshot.is_clinician(),
                        onchange: move |_| form.write().set_clinician(true),
                    }
                    "Yes"
                }
                label {
                    input {
                        id: "clinician-no",
                        r#type: "radio",
                        name: "clinician",
                        checked: !snapshot.is_clinician(),
                        onchange: move |_| form.write().set_clinician(false),
                    }
                    "No"
                }
            }
            if snapshot.shows_experience() {
                fieldset { class: "profile__group",
                    legend { "What is your experience level?" }
                    for level in experience_options.iter().copied() {
                        label { key: "{level}",
                            input {
                                r#type: "radio",
                                name: "experience",
                                checked: snapshot.experience() == level,
                                onchange: move |_| form.write().set_experience(level),
                            }
                            "{level}"
                        }
                    }
                }
            }
            if snapshot.shows_procedures() {
                fieldset { class: "profile__group",
                    legend { "How many colonoscopies have you performed?" }
                    for procedures in survey_core::model::ProceduresPerformed::ALL {
                        label { key: "{procedures}",
                            input {
                                r#type: "radio",
                                name: "procedures",
                                checked: snapshot.procedures() == procedures,
                                onchange: move |_| form.write().set_procedures(procedures),
                            }
                            "{procedures}"
                        }
                    }
                }
            }
            label { class: "profile__name",
                "Please enter your name"
                input {
                    id: "respondent-name",
                    r#type: "text",
                    value: "{name}",
                    oninput: move |evt: FormEvent| form.write().set_name(evt.value()),
                }
            }
        }
    }
}
