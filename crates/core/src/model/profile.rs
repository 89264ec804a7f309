use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("respondent name is required")]
    MissingName,

    #[error("experience level {level} is not offered by the {variant} questionnaire")]
    UnsupportedExperience {
        level: ExperienceLevel,
        variant: QuestionnaireVariant,
    },

    #[error("unknown questionnaire variant: {0}")]
    UnknownVariant(String),

    #[error("unknown experience level: {0}")]
    UnknownExperience(String),

    #[error("unknown procedures bracket: {0}")]
    UnknownProcedures(String),
}

//
// ─── VARIANT ──────────────────────────────────────────────────────────────────
//

/// Which respondent questionnaire is deployed.
///
/// - `Standard`: experience level is Resident or Esperto.
/// - `Extended`: adds Specializzando and asks how many procedures were performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionnaireVariant {
    #[default]
    Standard,
    Extended,
}

impl QuestionnaireVariant {
    /// Experience levels offered by this variant, in display order.
    #[must_use]
    pub fn experience_levels(self) -> &'static [ExperienceLevel] {
        match self {
            QuestionnaireVariant::Standard => &[ExperienceLevel::Resident, ExperienceLevel::Esperto],
            QuestionnaireVariant::Extended => &[
                ExperienceLevel::Specializzando,
                ExperienceLevel::Resident,
                ExperienceLevel::Esperto,
            ],
        }
    }

    #[must_use]
    pub fn asks_procedures(self) -> bool {
        matches!(self, QuestionnaireVariant::Extended)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionnaireVariant::Standard => "standard",
            QuestionnaireVariant::Extended => "extended",
        }
    }
}

impl fmt::Display for QuestionnaireVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionnaireVariant {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "extended" => Ok(Self::Extended),
            _ => Err(ProfileError::UnknownVariant(s.to_string())),
        }
    }
}

//
// ─── CLINICIAN METADATA ───────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Specializzando,
    Resident,
    Esperto,
}

impl ExperienceLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::Specializzando => "Specializzando",
            ExperienceLevel::Resident => "Resident",
            ExperienceLevel::Esperto => "Esperto",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceLevel {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Specializzando" => Ok(Self::Specializzando),
            "Resident" => Ok(Self::Resident),
            "Esperto" => Ok(Self::Esperto),
            other => Err(ProfileError::UnknownExperience(other.to_string())),
        }
    }
}

/// Bracket of colonoscopies performed by a clinician.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProceduresPerformed {
    UnderFifty,
    FiftyToHundred,
    OverHundred,
}

impl ProceduresPerformed {
    pub const ALL: [ProceduresPerformed; 3] = [
        ProceduresPerformed::UnderFifty,
        ProceduresPerformed::FiftyToHundred,
        ProceduresPerformed::OverHundred,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProceduresPerformed::UnderFifty => "<50",
            ProceduresPerformed::FiftyToHundred => "50-100",
            ProceduresPerformed::OverHundred => ">100",
        }
    }
}

impl fmt::Display for ProceduresPerformed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProceduresPerformed {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<50" => Ok(Self::UnderFifty),
            "50-100" => Ok(Self::FiftyToHundred),
            ">100" => Ok(Self::OverHundred),
            other => Err(ProfileError::UnknownProcedures(other.to_string())),
        }
    }
}

//
// ─── PROFILE ──────────────────────────────────────────────────────────────────
//

/// Raw form input, before it is checked against a questionnaire variant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub name: String,
    pub is_clinician: bool,
    pub experience_level: Option<ExperienceLevel>,
    pub procedures_performed: Option<ProceduresPerformed>,
}

impl ProfileDraft {
    #[must_use]
    pub fn new(name: impl Into<String>, is_clinician: bool) -> Self {
        Self {
            name: name.into(),
            is_clinician,
            experience_level: None,
            procedures_performed: None,
        }
    }

    #[must_use]
    pub fn with_experience(mut self, level: ExperienceLevel) -> Self {
        self.experience_level = Some(level);
        self
    }

    #[must_use]
    pub fn with_procedures(mut self, procedures: ProceduresPerformed) -> Self {
        self.procedures_performed = Some(procedures);
        self
    }

    /// Validate the draft for a questionnaire variant.
    ///
    /// Clinician-only fields are dropped for non-clinicians, and the
    /// procedures bracket is dropped when the variant does not ask for it.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::MissingName` for a blank name and
    /// `ProfileError::UnsupportedExperience` when the level is not offered.
    pub fn validate(self, variant: QuestionnaireVariant) -> Result<RespondentProfile, ProfileError> {
        if self.name.trim().is_empty() {
            return Err(ProfileError::MissingName);
        }

        let (experience_level, procedures_performed) = if self.is_clinician {
            if let Some(level) = self.experience_level {
                if !variant.experience_levels().contains(&level) {
                    return Err(ProfileError::UnsupportedExperience { level, variant });
                }
            }
            let procedures = self
                .procedures_performed
                .filter(|_| variant.asks_procedures());
            (self.experience_level, procedures)
        } else {
            (None, None)
        };

        Ok(RespondentProfile {
            name: self.name,
            is_clinician: self.is_clinician,
            experience_level,
            procedures_performed,
        })
    }
}

/// Identity and clinician metadata of one respondent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RespondentProfile {
    name: String,
    is_clinician: bool,
    experience_level: Option<ExperienceLevel>,
    procedures_performed: Option<ProceduresPerformed>,
}

impl RespondentProfile {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_clinician(&self) -> bool {
        self.is_clinician
    }

    /// `Yes` / `No`, as stored in records.
    #[must_use]
    pub fn clinician_label(&self) -> &'static str {
        if self.is_clinician { "Yes" } else { "No" }
    }

    #[must_use]
    pub fn experience_level(&self) -> Option<ExperienceLevel> {
        self.experience_level
    }

    #[must_use]
    pub fn procedures_performed(&self) -> Option<ProceduresPerformed> {
        self.procedures_performed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        let err = ProfileDraft::new("   ", false)
            .validate(QuestionnaireVariant::Standard)
            .unwrap_err();
        assert_eq!(err, ProfileError::MissingName);
    }

    #[test]
    fn non_clinician_drops_clinician_fields() {
        let profile = ProfileDraft::new("Ann", false)
            .with_experience(ExperienceLevel::Esperto)
            .with_procedures(ProceduresPerformed::OverHundred)
            .validate(QuestionnaireVariant::Extended)
            .unwrap();
        assert_eq!(profile.clinician_label(), "No");
        assert_eq!(profile.experience_level(), None);
        assert_eq!(profile.procedures_performed(), None);
    }

    #[test]
    fn standard_variant_rejects_specializzando_and_ignores_procedures() {
        let err = ProfileDraft::new("Bo", true)
            .with_experience(ExperienceLevel::Specializzando)
            .validate(QuestionnaireVariant::Standard)
            .unwrap_err();
        assert!(matches!(err, ProfileError::UnsupportedExperience { .. }));

        let profile = ProfileDraft::new("Bo", true)
            .with_experience(ExperienceLevel::Resident)
            .with_procedures(ProceduresPerformed::UnderFifty)
            .validate(QuestionnaireVariant::Standard)
            .unwrap();
        assert_eq!(profile.experience_level(), Some(ExperienceLevel::Resident));
        assert_eq!(profile.procedures_performed(), None);
    }

    #[test]
    fn extended_variant_keeps_procedures() {
        let profile = ProfileDraft::new("Cy", true)
            .with_experience(ExperienceLevel::Esperto)
            .with_procedures(ProceduresPerformed::UnderFifty)
            .validate(QuestionnaireVariant::Extended)
            .unwrap();
        assert_eq!(profile.clinician_label(), "Yes");
        assert_eq!(
            profile.procedures_performed(),
            Some(ProceduresPerformed::UnderFifty)
        );
    }

    #[test]
    fn variant_parses_case_insensitively() {
        assert_eq!(
            "Extended".parse::<QuestionnaireVariant>().unwrap(),
            QuestionnaireVariant::Extended
        );
        assert!("other".parse::<QuestionnaireVariant>().is_err());
    }
}
