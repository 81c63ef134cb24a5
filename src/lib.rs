pub mod api;
pub mod app;
pub mod config;
pub mod errors;
pub mod feedback;
pub mod handlers;
pub mod models;
pub mod state;
pub mod stats;
pub mod stats_view;
pub mod summarize_view;
mod task;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use state::AppState;
