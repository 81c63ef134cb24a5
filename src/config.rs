use crate::errors::ConfigError;
use reqwest::Url;
use std::env;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_PORT: u16 = 8080;

/// Startup configuration, resolved once and handed to the state explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub port: u16,
    pub user_id: Option<String>,
}

impl AppConfig {
    pub fn new(api_base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: normalize_base_url(api_base_url)?,
            port: DEFAULT_PORT,
            user_id: None,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url =
            env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let mut config = Self::new(&base_url)?;
        config.port = parse_port(env::var("PORT").ok().as_deref());
        config.user_id = env::var("FEEDBACK_USER_ID")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Ok(config)
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|err| ConfigError::InvalidBaseUrl(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}

fn parse_port(value: Option<&str>) -> u16 {
    value
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}
