use thiserror::Error;

use crate::model::Preference;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("a session needs at least one stimulus")]
    Empty,

    #[error("question {index} is out of range for {len} questions")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("question {index} has no answer yet")]
    Unanswered { index: usize },

    #[error("already at the last question")]
    AtLastQuestion,

    #[error("already at the first question")]
    AtFirstQuestion,
}

/// Navigation position and answers for one respondent's questionnaire.
///
/// `current` always indexes a valid slot. Moving forward requires an answer on
/// the current slot; moving back never does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveySession {
    current: usize,
    answers: Vec<Option<Preference>>,
}

impl SurveySession {
    /// Start at question 0 with every slot unset.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when `len` is zero.
    pub fn new(len: usize) -> Result<Self, SessionError> {
        if len == 0 {
            return Err(SessionError::Empty);
        }
        Ok(Self {
            current: 0,
            answers: vec![None; len],
        })
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<Preference>] {
        &self.answers
    }

    #[must_use]
    pub fn answer(&self, index: usize) -> Option<Preference> {
        self.answers.get(index).copied().flatten()
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<Preference> {
        self.answer(self.current)
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 == self.answers.len()
    }

    /// Overwrite the answer at `index`; `None` clears it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::IndexOutOfRange` for an index past the end.
    pub fn record_answer(
        &mut self,
        index: usize,
        value: Option<Preference>,
    ) -> Result<(), SessionError> {
        let len = self.answers.len();
        let slot = self
            .answers
            .get_mut(index)
            .ok_or(SessionError::IndexOutOfRange { index, len })?;
        *slot = value;
        Ok(())
    }

    /// Overwrite the answer at the current position.
    pub fn record_current(&mut self, value: Option<Preference>) {
        self.answers[self.current] = value;
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        !self.is_last() && self.current_answer().is_some()
    }

    #[must_use]
    pub fn can_retreat(&self) -> bool {
        !self.is_first()
    }

    /// Move to the next question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AtLastQuestion` on the last question and
    /// `SessionError::Unanswered` when the current slot is unset. The position
    /// is unchanged on error.
    pub fn advance(&mut self) -> Result<usize, SessionError> {
        if self.is_last() {
            return Err(SessionError::AtLastQuestion);
        }
        if self.current_answer().is_none() {
            return Err(SessionError::Unanswered {
                index: self.current,
            });
        }
        self.current += 1;
        Ok(self.current)
    }

    /// Move to the previous question, regardless of answers.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AtFirstQuestion` on question 0.
    pub fn retreat(&mut self) -> Result<usize, SessionError> {
        if self.is_first() {
            return Err(SessionError::AtFirstQuestion);
        }
        self.current -= 1;
        Ok(self.current)
    }

    /// True iff every slot holds an answer.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.answers.iter().all(Option::is_some)
    }

    /// The completion affordance: last question reached and answered.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.is_last() && self.current_answer().is_some()
    }
}

/// Per-respondent holder whose initialisation survives re-renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStore {
    session: Option<SurveySession>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the session on first call; later calls return the existing one untouched.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when a new session would have no slots.
    pub fn initialize(&mut self, len: usize) -> Result<&mut SurveySession, SessionError> {
        if self.session.is_none() {
            self.session = Some(SurveySession::new(len)?);
        }
        self.session.as_mut().ok_or(SessionError::Empty)
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn session(&self) -> Option<&SurveySession> {
        self.session.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answered_up_to(len: usize, answered: usize) -> SurveySession {
        let mut session = SurveySession::new(len).unwrap();
        for i in 0..answered {
            session.record_answer(i, Some(Preference::Left)).unwrap();
        }
        session
    }

    #[test]
    fn empty_session_is_rejected() {
        assert_eq!(SurveySession::new(0).unwrap_err(), SessionError::Empty);
    }

    #[test]
    fn advance_succeeds_only_when_answered_and_not_last() {
        let len = 10;
        for i in 0..len {
            for answered in [false, true] {
                let mut session = SurveySession::new(len).unwrap();
                for _ in 0..i {
                    session.record_current(Some(Preference::Right));
                    session.advance().unwrap();
                }
                if answered {
                    session.record_current(Some(Preference::Left));
                }
                let before = session.clone();
                let result = session.advance();
                if answered && i < len - 1 {
                    assert_eq!(result, Ok(i + 1));
                    assert_eq!(session.current_index(), i + 1);
                } else {
                    assert!(result.is_err(), "advance from {i} (answered={answered})");
                    assert_eq!(session, before);
                }
            }
        }
    }

    #[test]
    fn advance_errors_name_the_gate() {
        let mut session = SurveySession::new(2).unwrap();
        assert_eq!(
            session.advance(),
            Err(SessionError::Unanswered { index: 0 })
        );
        session.record_current(Some(Preference::Left));
        session.advance().unwrap();
        session.record_current(Some(Preference::Left));
        assert_eq!(session.advance(), Err(SessionError::AtLastQuestion));
    }

    #[test]
    fn retreat_never_needs_an_answer() {
        let mut session = answered_up_to(5, 3);
        for _ in 0..3 {
            session.advance().unwrap();
        }
        assert_eq!(session.current_index(), 3);
        session.record_answer(2, None).unwrap();
        assert_eq!(session.retreat(), Ok(2));
        assert_eq!(session.retreat(), Ok(1));
        assert_eq!(session.retreat(), Ok(0));
        assert_eq!(session.retreat(), Err(SessionError::AtFirstQuestion));
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn record_answer_overwrites_and_clears() {
        let mut session = SurveySession::new(3).unwrap();
        session.record_answer(1, Some(Preference::Left)).unwrap();
        session.record_answer(1, Some(Preference::Right)).unwrap();
        assert_eq!(session.answer(1), Some(Preference::Right));
        session.record_answer(1, None).unwrap();
        assert_eq!(session.answer(1), None);

        let err = session.record_answer(3, Some(Preference::Left)).unwrap_err();
        assert_eq!(err, SessionError::IndexOutOfRange { index: 3, len: 3 });
    }

    #[test]
    fn completeness_checks_every_slot() {
        let mut session = answered_up_to(3, 3);
        assert!(session.is_complete());
        session.record_answer(0, None).unwrap();
        assert!(!session.is_complete());
    }

    #[test]
    fn submit_gate_only_on_answered_last_question() {
        let mut session = answered_up_to(2, 1);
        assert!(!session.can_submit());
        session.advance().unwrap();
        assert!(!session.can_submit());
        session.record_current(Some(Preference::Right));
        assert!(session.can_submit());
    }

    #[test]
    fn initialize_is_idempotent() {
        let mut store = SessionStore::new();
        assert!(!store.is_initialized());
        {
            let session = store.initialize(4).unwrap();
            session.record_current(Some(Preference::Left));
            session.advance().unwrap();
        }
        let again = store.initialize(4).unwrap();
        assert_eq!(again.current_index(), 1);
        assert_eq!(again.answer(0), Some(Preference::Left));
    }
}
