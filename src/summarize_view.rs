//! Summarization form controller.

use crate::api::ApiClient;
use crate::errors::{ClientError, EMPTY_TEXT, REQUEST_PENDING};
use crate::feedback::{CollectorState, FeedbackCollector, SubmitOutcome};
use crate::models::SummaryResult;
use crate::task::detached;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct SummarizeState {
    pub text: String,
    pub result: Option<SummaryResult>,
    pub loading: bool,
    pub error: Option<String>,
    /// Feedback widget under the current summary, absent without one.
    pub feedback: Option<CollectorState>,
}

#[derive(Default)]
struct Inner {
    text: String,
    result: Option<SummaryResult>,
    loading: bool,
    error: Option<String>,
    collector: Option<Arc<FeedbackCollector>>,
}

pub struct SummarizeView {
    client: ApiClient,
    user_id: Option<String>,
    inner: Mutex<Inner>,
}

impl SummarizeView {
    pub fn new(client: ApiClient, user_id: Option<String>) -> Self {
        Self {
            client,
            user_id,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub async fn snapshot(&self) -> SummarizeState {
        let inner = self.inner.lock().await;
        let feedback = inner.collector.as_ref().map(|collector| collector.state());
        SummarizeState {
            text: inner.text.clone(),
            result: inner.result.clone(),
            loading: inner.loading,
            error: inner.error.clone(),
            feedback,
        }
    }

    pub async fn summarize(self: &Arc<Self>, text: &str) -> Result<SummaryResult, ClientError> {
        let view = Arc::clone(self);
        let text = text.to_string();
        detached(async move { view.run_summarize(text).await }).await
    }

    /// Rates the current summary through its feedback widget.
    pub async fn submit_feedback(
        self: &Arc<Self>,
        is_positive: bool,
        text: Option<String>,
    ) -> SubmitOutcome {
        let view = Arc::clone(self);
        detached(async move { view.run_feedback(is_positive, text).await }).await
    }

    async fn run_summarize(&self, text: String) -> Result<SummaryResult, ClientError> {
        {
            let mut inner = self.inner.lock().await;
            if inner.loading {
                return Err(ClientError::Validation(REQUEST_PENDING));
            }
            inner.text = text.clone();
            if text.trim().is_empty() {
                inner.error = Some(EMPTY_TEXT.to_string());
                return Err(ClientError::Validation(EMPTY_TEXT));
            }
            inner.loading = true;
            inner.error = None;
        }

        let result = self
            .client
            .post_summary(&text, self.user_id.as_deref())
            .await;

        let mut inner = self.inner.lock().await;
        inner.loading = false;
        match result {
            Ok(summary) => {
                info!(saved = summary.saved, "summary received");
                inner.result = Some(summary.clone());
                inner.error = None;
                inner.collector = Some(Arc::new(FeedbackCollector::new()));
                Ok(summary)
            }
            Err(err) => {
                inner.result = None;
                inner.collector = None;
                inner.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    async fn run_feedback(&self, is_positive: bool, text: Option<String>) -> SubmitOutcome {
        let (collector, summary_id) = {
            let inner = self.inner.lock().await;
            match (&inner.collector, &inner.result) {
                (Some(collector), Some(result)) => {
                    (Arc::clone(collector), result.summary_id.clone())
                }
                _ => return SubmitOutcome::Ignored,
            }
        };

        let client = &self.client;
        let user_id = self.user_id.as_deref();
        collector
            .submit(is_positive, text, |submission| async move {
                client
                    .submit_feedback(&submission, summary_id.as_ref(), user_id)
                    .await
            })
            .await
    }
}
