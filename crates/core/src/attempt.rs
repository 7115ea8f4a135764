//! Timed multiple-choice attempt.
//!
//! `Loading → InProgress → Submitting → Done`. A countdown expiry and a user
//! submit both go through [`Attempt::begin_submit`], which can succeed at most
//! once per attempt.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::model::{BatchId, Question, Subtest, resolve_question};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptPhase {
    Loading,
    InProgress,
    Submitting,
    Done,
}

impl fmt::Display for AttemptPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AttemptPhase::Loading => "loading",
            AttemptPhase::InProgress => "in progress",
            AttemptPhase::Submitting => "submitting",
            AttemptPhase::Done => "done",
        };
        f.write_str(label)
    }
}

/// Why an attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionReason {
    /// The countdown reached zero.
    Time,
    /// The user pressed submit.
    Submit,
}

impl CompletionReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CompletionReason::Time => "time",
            CompletionReason::Submit => "submit",
        }
    }

    /// Parses the short form used in navigation.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "time" => Some(CompletionReason::Time),
            "submit" => Some(CompletionReason::Submit),
            _ => None,
        }
    }
}

/// Result of one countdown step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Running(u32),
    /// Returned exactly once, on the tick that reaches zero.
    Expired,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum AttemptError {
    #[error("attempt cannot start while {0}")]
    NotLoading(AttemptPhase),
    #[error("attempt is not in progress (currently {0})")]
    NotInProgress(AttemptPhase),
    #[error("attempt is not submitting (currently {0})")]
    NotSubmitting(AttemptPhase),
    #[error("the subtest has no questions")]
    NoQuestions,
    #[error("no answers have been selected")]
    EmptyAnswers,
    #[error("attempt was already submitted")]
    AlreadySubmitted,
    #[error("subtest was already completed")]
    AlreadyCompleted,
}

/// Everything needed to report a finished attempt to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub reason: CompletionReason,
    /// Backend question id (or raw key) to the upper-cased option key.
    pub answers: BTreeMap<String, String>,
    /// Seconds spent, when positive.
    pub duration_secs: Option<u32>,
    /// Answer keys that matched no question.
    pub dropped_keys: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Attempt {
    batch_id: BatchId,
    subtest: Subtest,
    questions: Vec<Question>,
    phase: AttemptPhase,
    current: usize,
    answers: BTreeMap<String, String>,
    total_secs: u32,
    seconds_left: u32,
    expiry_reported: bool,
    completion: Option<CompletionReason>,
}

impl Attempt {
    /// Creates an attempt in `Loading` with the full subtest duration on the clock.
    #[must_use]
    pub fn new(batch_id: BatchId, subtest: Subtest, questions: Vec<Question>) -> Self {
        let total_secs = subtest.duration_secs();
        Self {
            batch_id,
            subtest,
            questions,
            phase: AttemptPhase::Loading,
            current: 0,
            answers: BTreeMap::new(),
            total_secs,
            seconds_left: total_secs,
            expiry_reported: false,
            completion: None,
        }
    }

    /// Moves `Loading → InProgress`.
    ///
    /// # Errors
    ///
    /// Returns `NotLoading` outside `Loading` and `NoQuestions` for an empty
    /// question list.
    pub fn start(&mut self) -> Result<(), AttemptError> {
        if self.phase != AttemptPhase::Loading {
            return Err(AttemptError::NotLoading(self.phase));
        }
        if self.questions.is_empty() {
            return Err(AttemptError::NoQuestions);
        }
        self.phase = AttemptPhase::InProgress;
        Ok(())
    }

    /// Records `value` for the current question, replacing any earlier choice.
    /// Returns whether the stored answer changed.
    ///
    /// # Errors
    ///
    /// Returns `NotInProgress` outside `InProgress`.
    pub fn select_answer(&mut self, value: &str) -> Result<bool, AttemptError> {
        self.ensure_in_progress()?;
        let key = self.questions[self.current].answer_key(self.current);
        let previous = self.answers.insert(key, value.to_string());
        Ok(previous.as_deref() != Some(value))
    }

    /// Moves the pointer when `index` is in range. Returns whether it moved.
    pub fn go_to(&mut self, index: usize) -> bool {
        if self.phase != AttemptPhase::InProgress || index >= self.questions.len() {
            return false;
        }
        let moved = index != self.current;
        self.current = index;
        moved
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.current + 1)
    }

    pub fn previous(&mut self) -> bool {
        match self.current.checked_sub(1) {
            Some(index) => self.go_to(index),
            None => false,
        }
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> Tick {
        if self.phase != AttemptPhase::InProgress || self.expiry_reported {
            return Tick::Stopped;
        }
        self.seconds_left = self.seconds_left.saturating_sub(1);
        if self.seconds_left == 0 {
            self.expiry_reported = true;
            Tick::Expired
        } else {
            Tick::Running(self.seconds_left)
        }
    }

    /// Locks the attempt and builds its submission.
    ///
    /// A `Time` submission goes through even with no answers so the attempt
    /// can never stay open after expiry.
    ///
    /// # Errors
    ///
    /// Returns `AlreadySubmitted` once any submission has begun,
    /// `NotInProgress` outside `InProgress`, and `EmptyAnswers` for a user
    /// submit without answers (the attempt stays `InProgress`).
    pub fn begin_submit(&mut self, reason: CompletionReason) -> Result<Submission, AttemptError> {
        if self.completion.is_some() {
            return Err(AttemptError::AlreadySubmitted);
        }
        self.ensure_in_progress()?;
        if reason == CompletionReason::Submit && self.answers.is_empty() {
            return Err(AttemptError::EmptyAnswers);
        }

        let mut answers = BTreeMap::new();
        let mut dropped_keys = Vec::new();
        for (key, value) in &self.answers {
            match resolve_question(&self.questions, key) {
                Some((_, question)) => {
                    let final_key = question
                        .soal_id
                        .as_ref()
                        .map_or_else(|| key.clone(), ToString::to_string);
                    answers.insert(final_key, value.trim().to_uppercase());
                }
                None => dropped_keys.push(key.clone()),
            }
        }

        let elapsed = self.total_secs.saturating_sub(self.seconds_left);
        self.completion = Some(reason);
        self.phase = AttemptPhase::Submitting;
        Ok(Submission {
            reason,
            answers,
            duration_secs: (elapsed > 0).then_some(elapsed),
            dropped_keys,
        })
    }

    /// Moves `Submitting → Done`.
    ///
    /// # Errors
    ///
    /// Returns `NotSubmitting` outside `Submitting`.
    pub fn finish(&mut self) -> Result<(), AttemptError> {
        if self.phase != AttemptPhase::Submitting {
            return Err(AttemptError::NotSubmitting(self.phase));
        }
        self.phase = AttemptPhase::Done;
        Ok(())
    }

    fn ensure_in_progress(&self) -> Result<(), AttemptError> {
        if self.phase == AttemptPhase::InProgress {
            Ok(())
        } else {
            Err(AttemptError::NotInProgress(self.phase))
        }
    }

    #[must_use]
    pub fn phase(&self) -> AttemptPhase {
        self.phase
    }

    #[must_use]
    pub fn batch_id(&self) -> &BatchId {
        &self.batch_id
    }

    #[must_use]
    pub fn subtest(&self) -> &Subtest {
        &self.subtest
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    /// The option chosen for the question at `index`.
    #[must_use]
    pub fn selected(&self, index: usize) -> Option<&str> {
        let question = self.questions.get(index)?;
        self.answers
            .get(&question.answer_key(index))
            .map(String::as_str)
    }

    #[must_use]
    pub fn answers(&self) -> &BTreeMap<String, String> {
        &self.answers
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    #[must_use]
    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    /// Set once a submission has begun; never cleared.
    #[must_use]
    pub fn completion(&self) -> Option<CompletionReason> {
        self.completion
    }

    /// Whether the view should offer a submit button.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.phase == AttemptPhase::InProgress && self.completion.is_none()
    }
}
