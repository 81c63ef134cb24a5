use crate::errors::AppError;
use crate::models::{FeedbackForm, RangeForm, SampleTrigger, SummarizeForm};
use crate::state::AppState;
use crate::stats_view::StatsState;
use crate::summarize_view::SummarizeState;
use crate::ui::{render_stats_page, render_summarize_page};
use axum::{
    extract::State,
    response::{Html, Redirect},
    Form, Json,
};
use chrono::NaiveDate;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    state.stats.activate().await;
    let view = state.stats.snapshot().await;
    Html(render_stats_page(&view))
}

pub async fn load_sample(State(state): State<AppState>) -> Redirect {
    // Failures end up on the view state and are rendered after the redirect.
    let _ = state.stats.load_sample(SampleTrigger::Explicit).await;
    Redirect::to("/")
}

pub async fn query_range(
    State(state): State<AppState>,
    Form(form): Form<RangeForm>,
) -> Result<Redirect, AppError> {
    let start = parse_date(&form.start_date)?;
    let end = parse_date(&form.end_date)?;
    let _ = state.stats.load_range(start, end).await;
    Ok(Redirect::to("/"))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsState> {
    Json(state.stats.snapshot().await)
}

pub async fn summarize_page(State(state): State<AppState>) -> Html<String> {
    let view = state.summarize.snapshot().await;
    Html(render_summarize_page(&view))
}

pub async fn summarize(
    State(state): State<AppState>,
    Form(form): Form<SummarizeForm>,
) -> Redirect {
    let _ = state.summarize.summarize(&form.text).await;
    Redirect::to("/summarize")
}

pub async fn submit_feedback(
    State(state): State<AppState>,
    Form(form): Form<FeedbackForm>,
) -> Result<Redirect, AppError> {
    let is_positive = match form.is_positive.trim() {
        "true" => true,
        "false" => false,
        _ => return Err(AppError::bad_request("is_positive must be 'true' or 'false'")),
    };

    state.summarize.submit_feedback(is_positive, form.text).await;
    Ok(Redirect::to("/summarize"))
}

pub async fn get_summary(State(state): State<AppState>) -> Json<SummarizeState> {
    Json(state.summarize.snapshot().await)
}

fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::bad_request(format!("invalid date '{value}', expected YYYY-MM-DD")))
}
