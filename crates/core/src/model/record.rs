use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::model::{Preference, QuestionnaireVariant, RespondentProfile, SurveySession, question_label};

/// Marker written for any question left without an answer.
pub const NO_RESPONSE: &str = "No Response";

const FALLBACK_RECORD_STEM: &str = "respondent";

/// Keep word characters, `-`, `_`, `.` and spaces; drop everything else.
#[must_use]
pub fn sanitize_record_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ' '))
        .collect();
    let trimmed = kept.trim();
    if trimmed.is_empty() {
        FALLBACK_RECORD_STEM.to_string()
    } else {
        trimmed.to_string()
    }
}

/// `{sanitized_name}_{YYYYMMDD_HHMMSS}`.
#[must_use]
pub fn record_name(name: &str, at: DateTime<Utc>) -> String {
    format!(
        "{}_{}",
        sanitize_record_name(name),
        at.format("%Y%m%d_%H%M%S")
    )
}

/// Everything persisted for one completed questionnaire.
///
/// Serializes as a flat, ordered mapping: `Name`, `Clinician`,
/// `Experience Level`, `Procedures Performed` (extended variant only), then
/// `Question 1..N`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    profile: RespondentProfile,
    variant: QuestionnaireVariant,
    answers: Vec<Option<Preference>>,
    submitted_at: DateTime<Utc>,
}

impl SubmissionRecord {
    #[must_use]
    pub fn new(
        profile: RespondentProfile,
        variant: QuestionnaireVariant,
        session: &SurveySession,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            profile,
            variant,
            answers: session.answers().to_vec(),
            submitted_at,
        }
    }

    #[must_use]
    pub fn profile(&self) -> &RespondentProfile {
        &self.profile
    }

    #[must_use]
    pub fn variant(&self) -> QuestionnaireVariant {
        self.variant
    }

    #[must_use]
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Record name used by the local sink.
    #[must_use]
    pub fn record_name(&self) -> String {
        record_name(self.profile.name(), self.submitted_at)
    }

    /// Answer labels with unset slots materialised as `No Response`.
    #[must_use]
    pub fn answer_cells(&self) -> Vec<&'static str> {
        self.answers
            .iter()
            .map(|answer| answer.map_or(NO_RESPONSE, Preference::as_str))
            .collect()
    }

    /// Spreadsheet row in sheet column order. Absent values become empty strings.
    #[must_use]
    pub fn row(&self) -> Vec<String> {
        let mut row = vec![
            self.profile.name().to_string(),
            self.profile.clinician_label().to_string(),
            self.profile
                .experience_level()
                .map(|level| level.as_str().to_string())
                .unwrap_or_default(),
        ];
        if self.variant.asks_procedures() {
            row.push(
                self.profile
                    .procedures_performed()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default(),
            );
        }
        row.extend(self.answer_cells().into_iter().map(str::to_string));
        row
    }
}

impl Serialize for SubmissionRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let procedures_field = usize::from(self.variant.asks_procedures());
        let mut map = serializer.serialize_map(Some(3 + procedures_field + self.answers.len()))?;
        map.serialize_entry("Name", self.profile.name())?;
        map.serialize_entry("Clinician", self.profile.clinician_label())?;
        map.serialize_entry(
            "Experience Level",
            &self.profile.experience_level().map(|l| l.as_str()),
        )?;
        if self.variant.asks_procedures() {
            map.serialize_entry(
                "Procedures Performed",
                &self.profile.procedures_performed().map(|p| p.as_str()),
            )?;
        }
        for (index, cell) in self.answer_cells().into_iter().enumerate() {
            map.serialize_entry(&question_label(index), cell)?;
        }
        map.end()
    }
}
