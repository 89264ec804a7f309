use std::sync::Arc;

use storage::repository::{RecordSink, TabularSink};
use survey_core::Clock;
use survey_core::model::{QuestionnaireVariant, RespondentProfile, SubmissionRecord, SurveySession};

/// Confirmation shown once a submission has run.
pub const SUCCESS_MESSAGE: &str = "Your answers have been saved!";

/// Result of one sink attempt. Failures carry the sink's error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOutcome {
    Saved,
    Failed(String),
}

impl SinkOutcome {
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Independent outcomes of the local and remote writes for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    pub record_name: String,
    pub local: SinkOutcome,
    pub remote: SinkOutcome,
}

impl SubmissionReport {
    /// One user-facing error line per failed sink, local first.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let SinkOutcome::Failed(reason) = &self.local {
            lines.push(format!("Error saving JSON file: {reason}"));
        }
        if let SinkOutcome::Failed(reason) = &self.remote {
            lines.push(format!("Error saving to Google Sheets: {reason}"));
        }
        lines
    }

    /// Sink errors followed by the confirmation, which is shown regardless.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        let mut lines = self.errors();
        lines.push(SUCCESS_MESSAGE.to_string());
        lines
    }

    #[must_use]
    pub fn fully_saved(&self) -> bool {
        self.local.is_saved() && self.remote.is_saved()
    }
}

/// Writes a completed session to the local record sink, then the remote sheet.
///
/// The two sinks are attempted in that order and neither outcome affects the
/// other, so a submission never fails as a whole.
#[derive(Clone)]
pub struct SubmissionPipeline {
    clock: Clock,
    variant: QuestionnaireVariant,
    records: Arc<dyn RecordSink>,
    sheets: Arc<dyn TabularSink>,
    sheet_name: String,
}

impl SubmissionPipeline {
    #[must_use]
    pub fn new(
        clock: Clock,
        variant: QuestionnaireVariant,
        records: Arc<dyn RecordSink>,
        sheets: Arc<dyn TabularSink>,
        sheet_name: impl Into<String>,
    ) -> Self {
        Self {
            clock,
            variant,
            records,
            sheets,
            sheet_name: sheet_name.into(),
        }
    }

    pub async fn submit(&self, profile: RespondentProfile, session: &SurveySession) -> SubmissionReport {
        let record = SubmissionRecord::new(profile, self.variant, session, self.clock.now());
        let record_name = record.record_name();

        let local = match self.records.write(&record_name, &record).await {
            Ok(()) => {
                tracing::info!(record = %record_name, "saved submission record");
                SinkOutcome::Saved
            }
            Err(err) => {
                tracing::warn!(record = %record_name, error = %err, "local record write failed");
                SinkOutcome::Failed(err.to_string())
            }
        };

        let remote = match self.sheets.append_row(&self.sheet_name, &record.row()).await {
            Ok(()) => SinkOutcome::Saved,
            Err(err) => {
                tracing::warn!(sheet = %self.sheet_name, error = %err, "sheet append failed");
                SinkOutcome::Failed(err.to_string())
            }
        };

        SubmissionReport {
            record_name,
            local,
            remote,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_messages_follow_sink_outcomes() {
        let ok = SubmissionReport {
            record_name: "Ann_20231114_221320".into(),
            local: SinkOutcome::Saved,
            remote: SinkOutcome::Saved,
        };
        assert_eq!(ok.messages(), vec![SUCCESS_MESSAGE.to_string()]);
        assert!(ok.fully_saved());

        let both_failed = SubmissionReport {
            record_name: "Ann_20231114_221320".into(),
            local: SinkOutcome::Failed("disk full".into()),
            remote: SinkOutcome::Failed("quota".into()),
        };
        assert_eq!(
            both_failed.messages(),
            vec![
                "Error saving JSON file: disk full".to_string(),
                "Error saving to Google Sheets: quota".to_string(),
                SUCCESS_MESSAGE.to_string(),
            ]
        );
        assert!(!both_failed.fully_saved());
        assert_eq!(both_failed.errors().len(), 2);
    }
}
