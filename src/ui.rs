use crate::feedback::CollectorState;
use crate::models::{DisplayMode, RecentComment, StatsDisplay};
use crate::stats::chart_slices;
use crate::stats_view::StatsState;
use crate::summarize_view::SummarizeState;
use chrono::Datelike;

pub fn render_stats_page(state: &StatsState) -> String {
    let mut body = String::new();
    body.push_str("<h1>피드백 통계 대시보드</h1>\n");

    if state.sample_banner {
        let label = if state.loading {
            "처리 중..."
        } else {
            "👀 샘플 데이터로 먼저 체험해보기"
        };
        body.push_str(&format!(
            r#"<section class="banner">
  <h3>👋 STANDARD-AI를 시작해보세요!</h3>
  <p>샘플 데이터로 먼저 체험해보세요.<br />실제 사용 시에는 자동으로 기록이 누적됩니다.</p>
  <form method="post" action="/stats/sample">
    <button type="submit" class="sample"{disabled}>{label}</button>
  </form>
</section>
"#,
            disabled = disabled_attr(state.loading),
        ));
    } else {
        let label = if state.loading { "로딩 중..." } else { "조회" };
        body.push_str(&format!(
            r#"<form class="range" method="post" action="/stats/query">
  <label>시작일<input type="date" name="start_date" value="{start}" /></label>
  <label>종료일<input type="date" name="end_date" value="{end}" /></label>
  <button type="submit"{disabled}>{label}</button>
</form>
"#,
            start = state.start_date.format("%Y-%m-%d"),
            end = state.end_date.format("%Y-%m-%d"),
            disabled = disabled_attr(state.loading),
        ));
        if !state.loading
            && matches!(&state.display, Some(display) if display.mode == DisplayMode::Sample)
        {
            body.push_str("<p class=\"note\">* 실제 데이터는 저장되지 않습니다</p>\n");
        }
    }

    if let Some(error) = &state.error {
        body.push_str(&format!("<div class=\"error\">{}</div>\n", escape_html(error)));
    }

    if let Some(display) = &state.display {
        render_stats_cards(&mut body, display);
    }

    render_layout("피드백 통계", &body)
}

fn render_stats_cards(body: &mut String, display: &StatsDisplay) {
    let stats = &display.stats;
    let [positive, negative] = chart_slices(stats);
    let positive_end = u32::from(positive.percent);
    let negative_end = (positive_end + u32::from(negative.percent)).min(100);

    body.push_str(&format!(
        r#"<div class="grid">
  <div class="card">
    <h2>총 피드백</h2>
    <p class="total">{total}</p>
  </div>
  <div class="card wide">
    <h2>피드백 분포</h2>
    <div class="chart">
      <div class="pie" style="background: conic-gradient({pos_color} 0% {positive_end}%, {neg_color} {positive_end}% {negative_end}%, #e5e7eb {negative_end}% 100%);"></div>
      <ul class="legend">
        <li><span class="swatch" style="background: {pos_color}"></span>{pos_label} {pos_percent}%</li>
        <li><span class="swatch" style="background: {neg_color}"></span>{neg_label} {neg_percent}%</li>
      </ul>
    </div>
  </div>
  <div class="card full">
    <h2>최근 피드백</h2>
"#,
        total = stats.total_feedbacks,
        pos_color = positive.color,
        neg_color = negative.color,
        pos_label = positive.label,
        neg_label = negative.label,
        pos_percent = positive.percent,
        neg_percent = negative.percent,
    ));

    for comment in &stats.recent_comments {
        body.push_str(&format!(
            r#"    <div class="comment {tone}">
      <p>{text}</p>
      <p class="date">{date}</p>
    </div>
"#,
            tone = if comment.is_positive { "positive" } else { "negative" },
            text = escape_html(&comment.text),
            date = escape_html(&comment_date(comment)),
        ));
    }

    body.push_str("  </div>\n</div>\n");
}

pub fn render_summarize_page(state: &SummarizeState) -> String {
    let mut body = String::new();
    let label = if state.loading { "요약 중..." } else { "요약 실행" };
    body.push_str(&format!(
        r#"<h1>텍스트 요약</h1>
<div class="card">
  <form method="post" action="/summarize">
    <label for="text">요약할 텍스트</label>
    <textarea id="text" name="text" placeholder="요약할 텍스트를 입력하세요...">{text}</textarea>
    <button type="submit" class="wide-button"{disabled}>{label}</button>
  </form>
"#,
        text = escape_html(&state.text),
        disabled = disabled_attr(state.loading),
    ));

    if let Some(error) = &state.error {
        body.push_str(&format!("  <div class=\"error\">{}</div>\n", escape_html(error)));
    }

    if let Some(result) = &state.result {
        body.push_str(&format!(
            "  <h3>요약 결과</h3>\n  <div class=\"summary\">{}</div>\n",
            escape_html(&result.summary)
        ));
        if let Some(feedback) = state.feedback {
            body.push_str(&render_feedback_widget(feedback));
        }
    }

    body.push_str("</div>\n");
    render_layout("텍스트 요약", &body)
}

pub fn render_feedback_widget(state: CollectorState) -> String {
    if state == CollectorState::Submitted {
        return "  <div class=\"feedback done\">✓ 피드백이 기록되었습니다!</div>\n".to_string();
    }

    let submitting = state == CollectorState::Submitting;
    let disabled = disabled_attr(submitting);
    let mut widget = format!(
        r#"  <form class="feedback" method="post" action="/summarize/feedback">
    <p>이 요약이 도움이 되었나요?</p>
    <textarea name="text" placeholder="피드백을 남겨주세요 (선택사항)"{disabled}></textarea>
    <div class="choices">
      <button type="submit" name="is_positive" value="true"{disabled}>👍 좋아요</button>
      <button type="submit" name="is_positive" value="false"{disabled}>👎 아쉬워요</button>
    </div>
"#
    );
    if submitting {
        widget.push_str("    <p class=\"note\">피드백 처리 중...</p>\n");
    }
    widget.push_str("  </form>\n");
    widget
}

/// Korean long date (`2024년 1월 31일`), or the raw value when it does not parse.
pub fn comment_date(comment: &RecentComment) -> String {
    match comment.created_on() {
        Some(date) => format!("{}년 {}월 {}일", date.year(), date.month(), date.day()),
        None => comment.created_at.clone(),
    }
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn disabled_attr(disabled: bool) -> &'static str {
    if disabled { " disabled" } else { "" }
}

fn render_layout(title: &str, body: &str) -> String {
    LAYOUT_HTML
        .replace("{{TITLE}}", title)
        .replace("{{BODY}}", body)
}

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="ko">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    :root {
      --bg: #f9fafb;
      --ink: #111827;
      --muted: #4b5563;
      --card: #ffffff;
      --shadow: 0 1px 3px rgba(0, 0, 0, 0.08);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Pretendard", "Apple SD Gothic Neo", sans-serif;
    }

    nav {
      background: #fff;
      box-shadow: var(--shadow);
      display: flex;
      gap: 32px;
      padding: 0 24px;
      height: 64px;
      align-items: center;
    }

    nav a {
      color: var(--ink);
      text-decoration: none;
    }

    main {
      max-width: 1120px;
      margin: 0 auto;
      padding: 24px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-size: 1.5rem;
      margin: 0;
    }

    .card {
      background: var(--card);
      border-radius: 12px;
      box-shadow: var(--shadow);
      padding: 24px;
      display: grid;
      gap: 12px;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 24px;
    }

    .wide {
      grid-column: span 2;
    }

    .full {
      grid-column: 1 / -1;
    }

    .total {
      font-size: 2.25rem;
      font-weight: 700;
      text-align: center;
      margin: 0;
    }

    .chart {
      display: flex;
      align-items: center;
      gap: 32px;
    }

    .pie {
      width: 160px;
      height: 160px;
      border-radius: 50%;
    }

    .legend {
      list-style: none;
      padding: 0;
    }

    .swatch {
      display: inline-block;
      width: 12px;
      height: 12px;
      border-radius: 3px;
      margin-right: 8px;
    }

    .banner {
      background: #eff6ff;
      border: 1px solid #bfdbfe;
      border-radius: 12px;
      padding: 24px;
      text-align: center;
      color: #1e40af;
    }

    .range {
      display: flex;
      align-items: flex-end;
      gap: 16px;
      background: #fff;
      padding: 16px;
      border-radius: 12px;
      box-shadow: var(--shadow);
    }

    .range label {
      display: grid;
      font-size: 0.875rem;
      color: var(--muted);
    }

    button {
      border: none;
      border-radius: 8px;
      padding: 10px 18px;
      background: #111827;
      color: #fff;
      cursor: pointer;
    }

    button.sample {
      background: linear-gradient(90deg, #3b82f6, #8b5cf6);
      padding: 12px 32px;
    }

    button[disabled] {
      opacity: 0.6;
      cursor: default;
    }

    .wide-button {
      width: 100%;
    }

    textarea {
      width: 100%;
      min-height: 160px;
      padding: 8px 12px;
      border: 1px solid #d1d5db;
      border-radius: 6px;
    }

    .error {
      background: #fef2f2;
      border: 1px solid #fecaca;
      color: #dc2626;
      padding: 16px;
      border-radius: 8px;
    }

    .note {
      font-size: 0.875rem;
      color: var(--muted);
      text-align: center;
    }

    .comment {
      padding: 12px;
      border-radius: 8px;
    }

    .comment p {
      margin: 0;
    }

    .comment.positive {
      background: #f0fdf4;
    }

    .comment.negative {
      background: #fef2f2;
    }

    .comment .date {
      font-size: 0.75rem;
      color: #6b7280;
      margin-top: 4px;
    }

    .summary {
      background: var(--bg);
      padding: 16px;
      border-radius: 8px;
      white-space: pre-wrap;
    }

    .feedback {
      border: 1px solid #e5e7eb;
      border-radius: 8px;
      padding: 16px;
      display: grid;
      gap: 12px;
      text-align: center;
    }

    .feedback textarea {
      min-height: 96px;
    }

    .feedback .choices {
      display: flex;
      justify-content: center;
      gap: 16px;
    }

    .feedback.done {
      background: #f0fdf4;
      border-color: #bbf7d0;
      color: #15803d;
    }

    @media (max-width: 720px) {
      .grid {
        grid-template-columns: 1fr;
      }

      .wide {
        grid-column: auto;
      }
    }
  </style>
</head>
<body>
  <nav>
    <a href="/">피드백 통계</a>
    <a href="/summarize">텍스트 요약</a>
  </nav>
  <main>
{{BODY}}
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeedbackStats, SummaryResult};
    use chrono::NaiveDate;

    fn sample_state(banner: bool, mode: DisplayMode) -> StatsState {
        StatsState {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            display: Some(StatsDisplay {
                mode,
                stats: FeedbackStats {
                    total_feedbacks: 10,
                    positive_rate: 0.6,
                    negative_rate: 0.4,
                    recent_comments: vec![RecentComment {
                        text: "<b>좋아요</b>".into(),
                        is_positive: true,
                        created_at: "2024-01-31T09:00:00".into(),
                    }],
                    start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
                },
            }),
            sample_banner: banner,
            loading: false,
            error: None,
        }
    }

    #[test]
    fn stats_page_shows_totals_and_slices() {
        let html = render_stats_page(&sample_state(true, DisplayMode::Sample));
        assert!(html.contains("<p class=\"total\">10</p>"));
        assert!(html.contains("긍정 60%"));
        assert!(html.contains("부정 40%"));
        assert!(html.contains("action=\"/stats/sample\""));
        assert!(!html.contains("action=\"/stats/query\""));
    }

    #[test]
    fn stats_page_escapes_comments_and_formats_dates() {
        let html = render_stats_page(&sample_state(false, DisplayMode::Live));
        assert!(html.contains("&lt;b&gt;좋아요&lt;/b&gt;"));
        assert!(html.contains("2024년 1월 31일"));
        assert!(html.contains("value=\"2024-01-01\""));
        assert!(!html.contains("실제 데이터는 저장되지 않습니다"));
    }

    #[test]
    fn sample_note_follows_explicit_demo() {
        let html = render_stats_page(&sample_state(false, DisplayMode::Sample));
        assert!(html.contains("실제 데이터는 저장되지 않습니다"));
    }

    #[test]
    fn loading_disables_query_button() {
        let mut state = sample_state(false, DisplayMode::Live);
        state.loading = true;
        let html = render_stats_page(&state);
        assert!(html.contains("<button type=\"submit\" disabled>로딩 중...</button>"));
    }

    #[test]
    fn summarize_page_keeps_newlines_and_shows_widget() {
        let state = SummarizeState {
            text: "원문".into(),
            result: Some(SummaryResult {
                summary: "첫째 줄\n둘째 줄".into(),
                saved: true,
                summary_id: None,
            }),
            loading: false,
            error: None,
            feedback: Some(CollectorState::Idle),
        };
        let html = render_summarize_page(&state);
        assert!(html.contains("첫째 줄\n둘째 줄"));
        assert!(html.contains("이 요약이 도움이 되었나요?"));
        assert!(html.contains(">원문</textarea>"));
    }

    #[test]
    fn feedback_widget_states() {
        assert!(render_feedback_widget(CollectorState::Submitted).contains("피드백이 기록되었습니다!"));
        let submitting = render_feedback_widget(CollectorState::Submitting);
        assert!(submitting.contains("피드백 처리 중..."));
        assert!(submitting.contains("value=\"true\" disabled"));
        assert!(!render_feedback_widget(CollectorState::Idle).contains("disabled"));
    }

    #[test]
    fn unparsable_dates_are_shown_raw() {
        let comment = RecentComment {
            text: String::new(),
            is_positive: false,
            created_at: "방금".into(),
        };
        assert_eq!(comment_date(&comment), "방금");
    }
}
