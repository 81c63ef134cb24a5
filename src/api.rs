//! Thin wrappers around the backend's HTTP endpoints.
//!
//! Every call maps failures to a [`ClientError`] whose message is ready to
//! show: the backend's `detail` field when present, otherwise a fallback
//! chosen per endpoint.

use crate::config::AppConfig;
use crate::errors::{
    ClientError, ConfigError, FEEDBACK_FALLBACK, STATS_FALLBACK, SUMMARY_FALLBACK,
};
use crate::models::{
    FeedbackRequest, FeedbackStats, FeedbackSubmission, SummarizeRequest, SummaryId,
    SummaryResult,
};
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
        })
    }

    pub async fn fetch_sample(&self) -> Result<FeedbackStats, ClientError> {
        let request = self.http.get(self.url("/feedback/sample"));
        send_json(request, STATS_FALLBACK).await
    }

    pub async fn fetch_stats(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FeedbackStats, ClientError> {
        let request = self.http.get(self.url("/feedback/stats")).query(&[
            ("start_date", start.format("%Y-%m-%d").to_string()),
            ("end_date", end.format("%Y-%m-%d").to_string()),
        ]);
        send_json(request, STATS_FALLBACK).await
    }

    pub async fn post_summary(
        &self,
        text: &str,
        user_id: Option<&str>,
    ) -> Result<SummaryResult, ClientError> {
        let request = self
            .http
            .post(self.url("/summarize"))
            .json(&SummarizeRequest { text, user_id });
        send_json(request, SUMMARY_FALLBACK).await
    }

    pub async fn submit_feedback(
        &self,
        submission: &FeedbackSubmission,
        summary_id: Option<&SummaryId>,
        user_id: Option<&str>,
    ) -> Result<(), ClientError> {
        let request = self.http.post(self.url("/feedback/submit")).json(&FeedbackRequest {
            submission,
            summary_id,
            user_id,
        });
        send_checked(request, FEEDBACK_FALLBACK).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Pulls a human-readable `detail` string out of an error body.
pub fn error_detail(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail),
        _ => None,
    }
}

async fn send_checked(
    request: RequestBuilder,
    fallback: &'static str,
) -> Result<Vec<u8>, ClientError> {
    let response = request
        .send()
        .await
        .map_err(|source| transport(source, fallback))?;
    let status = response.status();
    let url = response.url().path().to_string();
    let body = response
        .bytes()
        .await
        .map_err(|source| transport(source, fallback))?;

    if !status.is_success() {
        let detail = error_detail(&body).unwrap_or_else(|| fallback.to_string());
        warn!("backend {url} returned {status}: {detail}");
        return Err(ClientError::Backend {
            status: status.as_u16(),
            detail,
        });
    }

    info!("backend {url} returned {status}");
    Ok(body.to_vec())
}

async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    fallback: &'static str,
) -> Result<T, ClientError> {
    let body = send_checked(request, fallback).await?;
    serde_json::from_slice(&body).map_err(|source| {
        warn!("failed to decode backend response: {source}");
        ClientError::Decode {
            message: fallback,
            source,
        }
    })
}

fn transport(source: reqwest::Error, fallback: &'static str) -> ClientError {
    warn!("backend request failed: {source}");
    ClientError::Transport {
        message: fallback,
        source,
    }
}
