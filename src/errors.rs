use axum::http::StatusCode;
use thiserror::Error;

pub const STATS_FALLBACK: &str = "데이터를 불러오지 못했습니다.";
pub const SUMMARY_FALLBACK: &str = "요약 중 오류가 발생했습니다.";
pub const FEEDBACK_FALLBACK: &str = "피드백 저장 중 오류가 발생했습니다.";
pub const EMPTY_TEXT: &str = "요약할 텍스트를 입력해주세요.";
pub const REQUEST_PENDING: &str = "이미 요청을 처리하고 있습니다.";

/// Failures of a backend call, displayed to the user as-is.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("{detail}")]
    Backend { status: u16, detail: String },

    #[error("{message}")]
    Transport {
        message: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{message}")]
    Decode {
        message: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API_BASE_URL is not a valid URL: {0}")]
    InvalidBaseUrl(String),

    #[error("API_BASE_URL must use http or https, got {0}")]
    UnsupportedScheme(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
