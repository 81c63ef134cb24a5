//! One-shot thumbs up/down collector that can be mounted under any content.
//!
//! The collector never talks to the network itself. Callers pass the
//! submission effect as an async callback on every [`FeedbackCollector::submit`].

use crate::models::FeedbackSubmission;
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt::Display;
use std::future::Future;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectorState {
    Idle,
    Submitting,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission is in flight or one already went through.
    Ignored,
    Submitted,
    /// The callback failed and the collector is idle again.
    Failed,
}

#[derive(Debug)]
pub struct FeedbackCollector {
    state: Mutex<CollectorState>,
}

impl Default for FeedbackCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackCollector {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(CollectorState::Idle),
        }
    }

    pub fn state(&self) -> CollectorState {
        *self.state.lock()
    }

    pub async fn submit<F, Fut, E>(
        &self,
        is_positive: bool,
        text: Option<String>,
        callback: F,
    ) -> SubmitOutcome
    where
        F: FnOnce(FeedbackSubmission) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: Display,
    {
        {
            let mut state = self.state.lock();
            if *state != CollectorState::Idle {
                return SubmitOutcome::Ignored;
            }
            *state = CollectorState::Submitting;
        }
        let guard = SubmittingGuard { state: &self.state };

        let result = callback(FeedbackSubmission::new(is_positive, text)).await;

        std::mem::forget(guard);
        let mut state = self.state.lock();
        match result {
            Ok(()) => {
                *state = CollectorState::Submitted;
                info!(is_positive, "feedback recorded");
                SubmitOutcome::Submitted
            }
            Err(err) => {
                *state = CollectorState::Idle;
                warn!("feedback submission failed: {err}");
                SubmitOutcome::Failed
            }
        }
    }
}

/// Puts the collector back to idle when `submit` is dropped mid-callback.
struct SubmittingGuard<'a> {
    state: &'a Mutex<CollectorState>,
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        if *state == CollectorState::Submitting {
            warn!("feedback submission abandoned before completing");
            *state = CollectorState::Idle;
        }
    }
}
