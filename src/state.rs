use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::errors::ConfigError;
use crate::stats_view::StatsView;
use crate::summarize_view::SummarizeView;
use chrono::{Local, NaiveDate};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub stats: Arc<StatsView>,
    pub summarize: Arc<SummarizeView>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        Self::with_today(config, Local::now().date_naive())
    }

    pub fn with_today(config: &AppConfig, today: NaiveDate) -> Result<Self, ConfigError> {
        let client = ApiClient::new(config)?;
        Ok(Self {
            stats: Arc::new(StatsView::new(client.clone(), today)),
            summarize: Arc::new(SummarizeView::new(client, config.user_id.clone())),
        })
    }
}
