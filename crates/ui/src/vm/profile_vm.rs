use survey_core::model::{ExperienceLevel, ProceduresPerformed, ProfileDraft, QuestionnaireVariant};

/// Respondent form state. Radio groups start on their first option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileFormVm {
    variant: QuestionnaireVariant,
    name: String,
    is_clinician: bool,
    experience: ExperienceLevel,
    procedures: ProceduresPerformed,
}

impl ProfileFormVm {
    #[must_use]
    pub fn new(variant: QuestionnaireVariant) -> Self {
        let experience = variant
            .experience_levels()
            .first()
            .copied()
            .unwrap_or(ExperienceLevel::Resident);
        Self {
            variant,
            name: String::new(),
            is_clinician: true,
            experience,
            procedures: ProceduresPerformed::ALL[0],
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The questionnaire is only shown once a name has been entered.
    #[must_use]
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    #[must_use]
    pub fn is_clinician(&self) -> bool {
        self.is_clinician
    }

    pub fn set_clinician(&mut self, is_clinician: bool) {
        self.is_clinician = is_clinician;
    }

    #[must_use]
    pub fn experience(&self) -> ExperienceLevel {
        self.experience
    }

    pub fn set_experience(&mut self, level: ExperienceLevel) {
        if self.variant.experience_levels().contains(&level) {
            self.experience = level;
        }
    }

    #[must_use]
    pub fn procedures(&self) -> ProceduresPerformed {
        self.procedures
    }

    pub fn set_procedures(&mut self, procedures: ProceduresPerformed) {
        self.procedures = procedures;
    }

    #[must_use]
    pub fn experience_options(&self) -> &'static [ExperienceLevel] {
        self.variant.experience_levels()
    }

    #[must_use]
    pub fn shows_experience(&self) -> bool {
        self.is_clinician
    }

    #[must_use]
    pub fn shows_procedures(&self) -> bool {
        self.is_clinician && self.variant.asks_procedures()
    }

    #[must_use]
    pub fn draft(&self) -> ProfileDraft {
        let mut draft = ProfileDraft::new(self.name.clone(), self.is_clinician);
        if self.shows_experience() {
            draft = draft.with_experience(self.experience);
        }
        if self.shows_procedures() {
            draft = draft.with_procedures(self.procedures);
        }
        draft
    }
}
