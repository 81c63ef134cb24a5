//! Dashboard controller: sample/live statistics for a date range.

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::{DisplayMode, FeedbackStats, SampleTrigger, StatsDisplay};
use chrono::{Duration, NaiveDate};
use crate::task::detached;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const DEFAULT_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Serialize)]
pub struct StatsState {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub display: Option<StatsDisplay>,
    /// The onboarding banner with the demo button replaces the range form while set.
    pub sample_banner: bool,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug)]
struct Inner {
    view: StatsState,
    activated: bool,
    latest_request: u64,
}

pub struct StatsView {
    client: ApiClient,
    inner: Mutex<Inner>,
}

enum Request {
    Sample(SampleTrigger),
    Range,
}

impl StatsView {
    pub fn new(client: ApiClient, today: NaiveDate) -> Self {
        Self {
            client,
            inner: Mutex::new(Inner {
                view: StatsState {
                    start_date: today - Duration::days(DEFAULT_WINDOW_DAYS),
                    end_date: today,
                    display: None,
                    sample_banner: true,
                    loading: false,
                    error: None,
                },
                activated: false,
                latest_request: 0,
            }),
        }
    }

    pub async fn snapshot(&self) -> StatsState {
        self.inner.lock().await.view.clone()
    }

    /// Runs the first sample load unless something was already requested.
    pub async fn activate(self: &Arc<Self>) {
        let view = Arc::clone(self);
        detached(async move {
            {
                let mut inner = view.inner.lock().await;
                if inner.activated {
                    return;
                }
                inner.activated = true;
            }
            // The error (if any) is already on the view state.
            let _ = view.fetch_sample(SampleTrigger::Auto).await;
        })
        .await
    }

    pub async fn load_sample(
        self: &Arc<Self>,
        trigger: SampleTrigger,
    ) -> Result<(), ClientError> {
        let view = Arc::clone(self);
        detached(async move { view.fetch_sample(trigger).await }).await
    }

    pub async fn load_range(
        self: &Arc<Self>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<(), ClientError> {
        let view = Arc::clone(self);
        detached(async move {
            let ticket = view.begin(Some((start, end))).await;
            let result = view.client.fetch_stats(start, end).await;
            view.finish(ticket, Request::Range, result).await
        })
        .await
    }

    async fn fetch_sample(&self, trigger: SampleTrigger) -> Result<(), ClientError> {
        let ticket = self.begin(None).await;
        let result = self.client.fetch_sample().await;
        self.finish(ticket, Request::Sample(trigger), result).await
    }

    async fn begin(&self, range: Option<(NaiveDate, NaiveDate)>) -> u64 {
        let mut inner = self.inner.lock().await;
        inner.activated = true;
        inner.latest_request += 1;
        if let Some((start, end)) = range {
            inner.view.start_date = start;
            inner.view.end_date = end;
        }
        inner.view.loading = true;
        inner.view.error = None;
        inner.latest_request
    }

    async fn finish(
        &self,
        ticket: u64,
        request: Request,
        result: Result<FeedbackStats, ClientError>,
    ) -> Result<(), ClientError> {
        let mut inner = self.inner.lock().await;
        if ticket != inner.latest_request {
            debug!(ticket, latest = inner.latest_request, "dropping stale stats response");
            return result.map(|_| ());
        }

        inner.view.loading = false;
        let stats = match result {
            Ok(stats) => stats,
            Err(err) => {
                inner.view.error = Some(err.to_string());
                return Err(err);
            }
        };

        if !stats.rates_consistent() {
            warn!(
                positive = stats.positive_rate,
                negative = stats.negative_rate,
                "feedback rates add up to more than 1"
            );
        }

        let mode = match request {
            Request::Sample(SampleTrigger::Auto) => DisplayMode::Sample,
            Request::Sample(SampleTrigger::Explicit) => {
                inner.view.sample_banner = false;
                DisplayMode::Sample
            }
            Request::Range => {
                inner.view.sample_banner = false;
                DisplayMode::Live
            }
        };
        info!(
            total = stats.total_feedbacks,
            mode = ?mode,
            "feedback stats loaded"
        );
        inner.view.display = Some(StatsDisplay { mode, stats });
        Ok(())
    }
}
