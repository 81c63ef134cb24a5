use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentComment {
    #[serde(alias = "feedback_text")]
    pub text: String,
    pub is_positive: bool,
    pub created_at: String,
}

impl RecentComment {
    /// Calendar date of `created_at`, accepting RFC 3339 and naive ISO timestamps.
    pub fn created_on(&self) -> Option<NaiveDate> {
        let raw = self.created_at.trim();
        if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
            return Some(stamp.date_naive());
        }
        if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(stamp.date());
        }
        if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
            return Some(stamp.date());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackStats {
    pub total_feedbacks: u64,
    pub positive_rate: f64,
    pub negative_rate: f64,
    #[serde(default)]
    pub recent_comments: Vec<RecentComment>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl FeedbackStats {
    /// The remainder after both rates is neutral feedback and is never negative.
    pub fn rates_consistent(&self) -> bool {
        self.positive_rate + self.negative_rate <= 1.0 + f64::EPSILON
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Sample,
    Live,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleTrigger {
    /// First load when the dashboard is opened.
    Auto,
    /// The user pressed the demo button.
    Explicit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsDisplay {
    pub mode: DisplayMode,
    pub stats: FeedbackStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub label: &'static str,
    pub percent: u8,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SummaryId {
    Number(i64),
    Text(String),
}

impl fmt::Display for SummaryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryId::Number(id) => write!(f, "{id}"),
            SummaryId::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary: String,
    #[serde(default)]
    pub saved: bool,
    #[serde(default)]
    pub summary_id: Option<SummaryId>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeRequest<'a> {
    pub text: &'a str,
    pub user_id: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackSubmission {
    pub is_positive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl FeedbackSubmission {
    pub fn new(is_positive: bool, text: Option<String>) -> Self {
        let text = text
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Self { is_positive, text }
    }
}

/// Body for `POST /feedback/submit`, linking a judgment to the summary it rates.
#[derive(Debug, Serialize)]
pub struct FeedbackRequest<'a> {
    #[serde(flatten)]
    pub submission: &'a FeedbackSubmission,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_id: Option<&'a SummaryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct RangeForm {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeForm {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackForm {
    pub is_positive: String,
    #[serde(default)]
    pub text: Option<String>,
}
