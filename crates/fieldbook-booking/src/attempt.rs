//! Ephemeral per-call state of one order submission.
//!
//! ```text
//! Unsubmitted -> Submitted -> Confirmed
//!                    |  \---> Conflict -> Resubmitted -> Confirmed | Failed
//!                    \------> (transient error, one retry) -> Confirmed | Failed
//! ```
//!
//! The attempt never holds more than [`MAX_SUBMISSIONS`] submissions; once
//! the budget is spent any further error is terminal.

use fieldbook_core::OrderCandidate;

/// Upper bound on order-upserting provider calls per attempt.
pub const MAX_SUBMISSIONS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    Unsubmitted,
    Submitted,
    Conflict,
    Resubmitted,
    Confirmed,
    Failed,
}

impl AttemptState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, AttemptState::Confirmed | AttemptState::Failed)
    }
}

#[derive(Debug, Clone)]
pub struct ReservationAttempt {
    candidate: OrderCandidate,
    original_order_no: String,
    state: AttemptState,
    attempt_count: u32,
    last_error: Option<String>,
}

impl ReservationAttempt {
    #[must_use]
    pub fn new(candidate: OrderCandidate) -> Self {
        Self {
            original_order_no: candidate.order_no.clone(),
            candidate,
            state: AttemptState::Unsubmitted,
            attempt_count: 0,
            last_error: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> AttemptState {
        self.state
    }

    #[must_use]
    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The order number the caller asked for, whatever is on the wire.
    #[must_use]
    pub fn original_order_no(&self) -> &str {
        &self.original_order_no
    }

    /// The temporary order number, once a conflict forced one.
    #[must_use]
    pub fn temporary_order_no(&self) -> Option<&str> {
        (self.candidate.order_no != self.original_order_no).then_some(self.candidate.order_no.as_str())
    }

    #[must_use]
    pub fn has_budget(&self) -> bool {
        !self.state.is_terminal() && self.attempt_count < MAX_SUBMISSIONS
    }

    /// Records a submission and returns the candidate to send, or `None`
    /// once the budget is spent or the attempt is over.
    pub fn submit(&mut self) -> Option<OrderCandidate> {
        if !self.has_budget() {
            return None;
        }
        self.attempt_count += 1;
        self.state = match self.state {
            AttemptState::Conflict => AttemptState::Resubmitted,
            AttemptState::Resubmitted => AttemptState::Resubmitted,
            _ => AttemptState::Submitted,
        };
        Some(self.candidate.clone())
    }

    pub fn confirm(&mut self) {
        self.state = AttemptState::Confirmed;
    }

    /// Moves to `Conflict` with `temporary_order_no` swapped in. Only the
    /// first submission may conflict; afterwards the attempt fails.
    pub fn conflict(&mut self, temporary_order_no: String) -> bool {
        self.last_error = Some(format!("order number {} is taken", self.candidate.order_no));
        if self.state == AttemptState::Submitted && self.temporary_order_no().is_none() && self.has_budget() {
            self.candidate.order_no = temporary_order_no;
            self.state = AttemptState::Conflict;
            true
        } else {
            self.state = AttemptState::Failed;
            false
        }
    }

    /// Records a non-conflict failure. Returns `true` when one more attempt
    /// with the same order number is allowed.
    pub fn fail(&mut self, error: &impl std::fmt::Display, transient: bool) -> bool {
        self.last_error = Some(error.to_string());
        if transient && self.has_budget() {
            true
        } else {
            self.state = AttemptState::Failed;
            false
        }
    }
}
