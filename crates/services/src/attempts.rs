use std::sync::Arc;

use tracing::{info, warn};
use tryout_core::attempt::{Attempt, AttemptError, CompletionReason, Submission};
use tryout_core::model::{BatchId, Hasil, Identity, Subtest, SubtestCode};

use crate::api::{SubmitRequest, TryoutApi};
use crate::error::AttemptServiceError;
use crate::history::HistoryService;
use crate::progress::ProgressService;
use crate::session::IdentityProvider;

/// A subtest on the batch page, with the current user's completion flag.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSubtest {
    pub subtest: Subtest,
    pub done: bool,
}

/// What happened to a submission after the attempt was locked.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    /// Scored by the backend.
    Sent(Hasil),
    /// Guests are never submitted.
    Guest,
    /// No answer survived key resolution; the backend rejects empty sets.
    NothingToSend,
    /// The request failed; the attempt still counts as done locally.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub reason: CompletionReason,
    pub delivery: Delivery,
    pub dropped_keys: Vec<String>,
}

/// Identifies the attempt a submission belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptTarget {
    pub batch_id: BatchId,
    pub subtest_id: String,
    pub subtest_code: SubtestCode,
}

impl AttemptTarget {
    #[must_use]
    pub fn of(attempt: &Attempt) -> Self {
        Self {
            batch_id: attempt.batch_id().clone(),
            subtest_id: attempt.subtest().id.clone(),
            subtest_code: attempt.subtest().code.clone(),
        }
    }
}

/// Loads attempts and reports them once they end.
#[derive(Clone)]
pub struct AttemptService {
    api: Arc<dyn TryoutApi>,
    identity: Arc<dyn IdentityProvider>,
    progress: ProgressService,
    history: Arc<HistoryService>,
}

impl AttemptService {
    #[must_use]
    pub fn new(
        api: Arc<dyn TryoutApi>,
        identity: Arc<dyn IdentityProvider>,
        progress: ProgressService,
        history: Arc<HistoryService>,
    ) -> Self {
        Self {
            api,
            identity,
            progress,
            history,
        }
    }

    /// Subtests of a batch with done flags for the current user.
    ///
    /// A failed subtest fetch is logged and yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `AttemptServiceError` if the progress marker cannot be read.
    pub async fn batch_subtests(
        &self,
        batch_id: &BatchId,
    ) -> Result<Vec<BatchSubtest>, AttemptServiceError> {
        let identity = self.identity.identity().await;
        let subtests = match self.api.subtests().await {
            Ok(subtests) => subtests,
            Err(err) => {
                warn!(batch = %batch_id, error = %err, "subtest list unavailable; showing none");
                Vec::new()
            }
        };
        let marker = self
            .progress
            .load(&identity.username, batch_id.as_str())
            .await?;
        Ok(subtests
            .into_iter()
            .map(|subtest| BatchSubtest {
                done: marker.is_done(&subtest.id),
                subtest,
            })
            .collect())
    }

    /// Fetch a subtest and its questions and start the attempt.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::AlreadyCompleted` when the progress marker says
    /// the subtest is done, `UnknownSubtest` when the code is not listed,
    /// `AttemptError::NoQuestions` for an empty subtest, or read failures.
    pub async fn load(
        &self,
        batch_id: &BatchId,
        code: &SubtestCode,
    ) -> Result<Attempt, AttemptServiceError> {
        let identity = self.identity.identity().await;
        let subtest = self
            .api
            .subtests()
            .await?
            .into_iter()
            .find(|subtest| &subtest.code == code)
            .ok_or_else(|| AttemptServiceError::UnknownSubtest(code.to_string()))?;

        if self
            .progress
            .is_done(&identity.username, batch_id.as_str(), &subtest.id)
            .await?
        {
            return Err(AttemptError::AlreadyCompleted.into());
        }

        let questions = self.api.questions(code).await?;
        let mut attempt = Attempt::new(batch_id.clone(), subtest, questions);
        attempt.start()?;
        Ok(attempt)
    }

    /// Lock, report and finish an attempt in one call.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::EmptyAnswers` for a user submit without answers
    /// (the attempt stays open) or `AlreadySubmitted` for a second submit.
    pub async fn submit(
        &self,
        attempt: &mut Attempt,
        reason: CompletionReason,
    ) -> Result<SubmitOutcome, AttemptServiceError> {
        let submission = attempt.begin_submit(reason)?;
        let outcome = self.complete(&AttemptTarget::of(attempt), submission).await;
        attempt.finish()?;
        Ok(outcome)
    }

    /// Report a locked attempt: mark it done locally, then post it for a
    /// signed-in user. Never fails; delivery problems end up in the outcome.
    pub async fn complete(&self, target: &AttemptTarget, submission: Submission) -> SubmitOutcome {
        let identity = self.identity.identity().await;
        if let Err(err) = self
            .progress
            .mark_done(&identity.username, target.batch_id.as_str(), &target.subtest_id)
            .await
        {
            warn!(error = %err, subtest = %target.subtest_code, "failed to mark subtest done");
        }
        if !submission.dropped_keys.is_empty() {
            warn!(keys = ?submission.dropped_keys, "answers without a matching question were dropped");
        }

        let delivery = self.deliver(&identity, target, &submission).await;
        SubmitOutcome {
            reason: submission.reason,
            delivery,
            dropped_keys: submission.dropped_keys,
        }
    }

    async fn deliver(
        &self,
        identity: &Identity,
        target: &AttemptTarget,
        submission: &Submission,
    ) -> Delivery {
        if identity.is_guest() {
            return Delivery::Guest;
        }
        if submission.answers.is_empty() {
            return Delivery::NothingToSend;
        }

        let request = SubmitRequest {
            username: identity.username.clone(),
            subtest_code: target.subtest_code.to_string(),
            batch_id: target.batch_id.to_string(),
            answers: submission.answers.clone(),
            duration_secs: submission.duration_secs,
        };
        match self.api.submit_answers(&request).await {
            Ok(hasil) => {
                info!(
                    username = %identity.username,
                    subtest = %target.subtest_code,
                    reason = submission.reason.as_str(),
                    score = hasil.score,
                    "answers submitted"
                );
                if let Err(err) = self.history.append_offline(&hasil).await {
                    warn!(error = %err, "failed to keep offline history copy");
                }
                Delivery::Sent(hasil)
            }
            Err(err) => {
                warn!(
                    username = %identity.username,
                    subtest = %target.subtest_code,
                    error = %err,
                    "submission failed"
                );
                Delivery::Failed(err.user_message())
            }
        }
    }
}
