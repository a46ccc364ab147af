//! The review session state machine.
//!
//! [`SessionStore`] owns the code buffer, the request state, the last good
//! result, and any pending failure notices. It is driven from a single event
//! loop: `request_review` spawns the assessment on the tokio runtime and
//! returns at once, and the outcome comes back later as a [`ReviewCompletion`]
//! on the channel given to [`SessionStore::new`]. The loop hands that value to
//! [`SessionStore::resolve`].

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::client::Assessor;
use crate::error::ReviewError;
use crate::types::{RequestState, ReviewResult};

/// Code shown in the editor when a session starts.
pub const DEFAULT_CODE: &str = "function sum() {\n  return 1 + 1\n}";

/// The request currently in flight: its id and the code it carries.
#[derive(Debug, Clone)]
pub struct ReviewTicket {
    pub id: Uuid,
    /// The buffer as it was when the request was issued.
    pub snapshot: String,
}

/// Outcome of one assessment request, delivered back to the event loop.
#[derive(Debug)]
pub struct ReviewCompletion {
    pub id: Uuid,
    pub outcome: Result<ReviewResult, ReviewError>,
}

/// A user-visible message for one failed review attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureNotice {
    pub message: String,
}

impl fmt::Display for FailureNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Single owner of all review-session state.
pub struct SessionStore<A: Assessor> {
    code: String,
    state: RequestState,
    result: Option<ReviewResult>,
    in_flight: Option<ReviewTicket>,
    notices: VecDeque<FailureNotice>,
    assessor: Arc<A>,
    completions: UnboundedSender<ReviewCompletion>,
}

impl<A: Assessor> SessionStore<A> {
    /// Starts an idle session holding [`DEFAULT_CODE`] and no result.
    pub fn new(assessor: A, completions: UnboundedSender<ReviewCompletion>) -> Self {
        Self {
            code: DEFAULT_CODE.to_owned(),
            state: RequestState::Idle,
            result: None,
            in_flight: None,
            notices: VecDeque::new(),
            assessor: Arc::new(assessor),
            completions,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Replaces the code buffer. Allowed in every state, including `Pending`.
    pub fn set_code(&mut self, text: impl Into<String>) {
        self.code = text.into();
    }

    /// Issues a review of the current buffer.
    ///
    /// Returns `false` without doing anything while a request is already
    /// pending. Otherwise snapshots the buffer, moves to `Pending`, spawns the
    /// assessment, and returns `true` immediately. Must be called from inside
    /// a tokio runtime.
    pub fn request_review(&mut self) -> bool {
        if self.state == RequestState::Pending {
            tracing::debug!("review already pending; ignoring request");
            return false;
        }

        let ticket = ReviewTicket { id: Uuid::new_v4(), snapshot: self.code.clone() };
        tracing::info!(request_id = %ticket.id, bytes = ticket.snapshot.len(), "review requested");

        let assessor = Arc::clone(&self.assessor);
        let completions = self.completions.clone();
        let id = ticket.id;
        let snapshot = ticket.snapshot.clone();
        tokio::spawn(async move {
            let outcome = assessor.submit(snapshot).await;
            // The receiver is gone only when the app is shutting down.
            let _ = completions.send(ReviewCompletion { id, outcome });
        });

        self.in_flight = Some(ticket);
        self.state = RequestState::Pending;
        true
    }

    /// Applies a completed request.
    ///
    /// Success replaces the stored result. Failure keeps whatever result was
    /// already stored and queues one [`FailureNotice`]. A completion that does
    /// not belong to the in-flight request is logged and dropped. Returns
    /// whether the completion was applied.
    pub fn resolve(&mut self, completion: ReviewCompletion) -> bool {
        let matches = self.state == RequestState::Pending
            && self.in_flight.as_ref().is_some_and(|t| t.id == completion.id);
        if !matches {
            tracing::warn!(request_id = %completion.id, "dropping completion for unknown request");
            return false;
        }
        self.in_flight = None;

        match completion.outcome {
            Ok(result) => {
                tracing::info!(request_id = %completion.id, score = result.score, "review succeeded");
                self.result = Some(result);
                self.state = RequestState::Succeeded;
            }
            Err(err) => {
                tracing::warn!(request_id = %completion.id, error = %err, "review failed");
                self.notices.push_back(FailureNotice {
                    message: format!("Failed to generate review. {err}"),
                });
                self.state = RequestState::Failed;
            }
        }
        true
    }

    pub fn current_result(&self) -> Option<&ReviewResult> {
        self.result.as_ref()
    }

    pub fn current_state(&self) -> RequestState {
        self.state
    }

    pub fn in_flight(&self) -> Option<&ReviewTicket> {
        self.in_flight.as_ref()
    }

    /// Takes the oldest unseen failure notice. Each notice is returned once.
    pub fn take_notice(&mut self) -> Option<FailureNotice> {
        self.notices.pop_front()
    }
}
