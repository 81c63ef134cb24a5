//! Shared fixtures for the integration tests.

#![allow(dead_code)]

pub mod mock_backend;

use chrono::NaiveDate;
use feedback_console::api::ApiClient;
use feedback_console::{router, AppConfig, AppState};
use std::net::TcpListener;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

pub fn client_for(base_url: &str) -> ApiClient {
    ApiClient::new(&AppConfig::new(base_url).unwrap()).unwrap()
}

/// Port that nothing is listening on.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    listener.local_addr().unwrap().port()
}

pub fn stats_json(total: u64, positive_rate: f64, negative_rate: f64) -> String {
    serde_json::json!({
        "total_feedbacks": total,
        "positive_rate": positive_rate,
        "negative_rate": negative_rate,
        "recent_comments": [],
        "start_date": "2024-01-01",
        "end_date": "2024-01-31"
    })
    .to_string()
}

pub fn summary_json(summary: &str, summary_id: serde_json::Value) -> String {
    serde_json::json!({
        "summary": summary,
        "saved": true,
        "summary_id": summary_id
    })
    .to_string()
}

/// Serves the console on an ephemeral port and returns its base URL.
pub async fn spawn_console(config: &AppConfig) -> String {
    let state = AppState::with_today(config, today()).unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind console");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.ok();
    });
    format!("http://{addr}")
}
