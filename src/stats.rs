use crate::models::{ChartSlice, FeedbackStats};

pub const POSITIVE_COLOR: &str = "#4ade80";
pub const NEGATIVE_COLOR: &str = "#f87171";

/// Positive and negative slices, each rounded on its own.
///
/// The two percentages are not forced to add up to 100.
pub fn chart_slices(stats: &FeedbackStats) -> [ChartSlice; 2] {
    [
        ChartSlice {
            label: "긍정",
            percent: rate_percent(stats.positive_rate),
            color: POSITIVE_COLOR,
        },
        ChartSlice {
            label: "부정",
            percent: rate_percent(stats.negative_rate),
            color: NEGATIVE_COLOR,
        },
    ]
}

pub fn rate_percent(rate: f64) -> u8 {
    if !rate.is_finite() {
        return 0;
    }
    (rate * 100.0).round().clamp(0.0, 100.0) as u8
}
