use dioxus::prelude::{ReadableExt, WritableExt};
use survey_core::model::{Preference, QuestionnaireVariant, StimulusSet};

use super::test_harness::{ViewHarness, ViewKind, setup_view_harness};
use crate::vm::SurveyIntent;

fn two_stimuli() -> StimulusSet {
    StimulusSet::new(["a.mp4", "b.mp4"]).unwrap()
}

async fn settle(harness: &mut ViewHarness) {
    for _ in 0..4 {
        harness.drive_async().await;
    }
}

#[tokio::test(flavor = "current_thread")]
async fn intro_view_smoke_renders_description_and_example() {
    let mut harness = setup_view_harness(
        ViewKind::Intro,
        QuestionnaireVariant::Standard,
        StimulusSet::colonoscopy_default(),
    );
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Qualitative Performance Assessment"), "missing title in {html}");
    assert!(html.contains("blue represents the deepest areas"), "missing legend in {html}");
    assert!(html.contains("Example Depth Maps from AI Models"), "missing caption in {html}");
    assert!(html.contains("data:image/png;base64,iVA="), "missing image in {html}");
    assert!(html.contains("Continue"), "missing continue in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn survey_view_hides_questionnaire_until_name_entered() {
    let mut harness = setup_view_harness(
        ViewKind::Survey,
        QuestionnaireVariant::Standard,
        two_stimuli(),
    );
    harness.rebuild();
    settle(&mut harness).await;

    let html = harness.render();
    assert!(html.contains("Are you a clinician?"), "missing clinician prompt in {html}");
    assert!(html.contains("What is your experience level?"), "missing experience in {html}");
    assert!(html.contains("Esperto"), "missing level option in {html}");
    assert!(!html.contains("Specializzando"), "unexpected level in {html}");
    assert!(html.contains("Please enter your name"), "missing name field in {html}");
    assert!(!html.contains("Questionnaire"), "questionnaire shown early in {html}");

    let handles = harness.survey_handles.clone().expect("survey handles");
    let mut form = handles.form();
    harness.in_root(|| form.write().set_name("   "));
    settle(&mut harness).await;
    assert!(!harness.render().contains("Questionnaire"));
}

#[tokio::test(flavor = "current_thread")]
async fn extended_survey_asks_for_procedures() {
    let mut harness = setup_view_harness(
        ViewKind::Survey,
        QuestionnaireVariant::Extended,
        two_stimuli(),
    );
    harness.rebuild();
    settle(&mut harness).await;

    let html = harness.render();
    assert!(html.contains("Specializzando"), "missing level in {html}");
    assert!(html.contains("50-100"), "missing procedures in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn survey_view_smoke_answers_and_submits() {
    let mut harness = setup_view_harness(
        ViewKind::Survey,
        QuestionnaireVariant::Standard,
        two_stimuli(),
    );
    harness
        .repo
        .insert_asset("a.mp4", b"abc".to_vec())
        .expect("insert asset");
    harness.rebuild();
    settle(&mut harness).await;

    let handles = harness.survey_handles.clone().expect("survey handles");
    let mut form = handles.form();
    harness.in_root(|| form.write().set_name("Ann"));
    settle(&mut harness).await;

    let html = harness.render();
    assert!(html.contains("Questionnaire"), "missing header in {html}");
    assert!(html.contains("Question 1"), "missing label in {html}");
    assert!(html.contains("Select an option"), "missing placeholder in {html}");
    assert!(html.contains("data:video/mp4;base64,YWJj"), "missing video in {html}");
    assert!(!html.contains("Submit Answers"), "submit shown early in {html}");

    let dispatch = handles.dispatch();
    harness.in_root(|| dispatch.call(SurveyIntent::Next));
    settle(&mut harness).await;
    assert!(harness.render().contains("Question 1"));

    harness.in_root(|| dispatch.call(SurveyIntent::Select(Some(Preference::Left))));
    harness.in_root(|| dispatch.call(SurveyIntent::Next));
    settle(&mut harness).await;

    let html = harness.render();
    assert!(html.contains("Question 2"), "did not advance in {html}");
    assert!(html.contains("Error loading video:"), "missing video error in {html}");
    assert!(html.contains("Submit Answers"), "missing submit in {html}");

    harness.in_root(|| dispatch.call(SurveyIntent::Select(Some(Preference::Right))));
    harness.in_root(|| dispatch.call(SurveyIntent::Submit));
    settle(&mut harness).await;

    let html = harness.render();
    assert!(html.contains("Your answers have been saved!"), "missing success in {html}");
    assert!(!html.contains("Submit Answers"), "submit still shown in {html}");

    let records = harness.repo.records().expect("records");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Ann_20231114_221320");
    assert_eq!(records[0].payload["Experience Level"], "Resident");
    assert_eq!(records[0].payload["Question 2"], "Right");
    let submitted = harness.in_root(|| {
        handles
            .vm()
            .read()
            .as_ref()
            .is_some_and(crate::vm::SurveyVm::is_submitted)
    });
    assert!(submitted);
}

#[tokio::test(flavor = "current_thread")]
async fn double_submit_saves_once_without_error() {
    let mut harness = setup_view_harness(
        ViewKind::Survey,
        QuestionnaireVariant::Standard,
        two_stimuli(),
    );
    harness.rebuild();
    settle(&mut harness).await;

    let handles = harness.survey_handles.clone().expect("survey handles");
    let mut form = handles.form();
    harness.in_root(|| form.write().set_name("Ann"));
    settle(&mut harness).await;

    let dispatch = handles.dispatch();
    harness.in_root(|| dispatch.call(SurveyIntent::Select(Some(Preference::Left))));
    harness.in_root(|| dispatch.call(SurveyIntent::Next));
    harness.in_root(|| dispatch.call(SurveyIntent::Select(Some(Preference::Right))));
    harness.in_root(|| {
        dispatch.call(SurveyIntent::Submit);
        dispatch.call(SurveyIntent::Submit);
    });
    settle(&mut harness).await;

    let html = harness.render();
    assert!(html.contains("Your answers have been saved!"), "missing success in {html}");
    assert!(!html.contains("Something went wrong"), "spurious error in {html}");
    assert!(!html.contains("already submitted"), "second submit surfaced in {html}");
    assert_eq!(harness.repo.records().expect("records").len(), 1);
    assert_eq!(harness.repo.rows().expect("rows").len(), 1);
}
