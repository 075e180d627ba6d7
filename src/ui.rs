use crate::github::endpoint;
use crate::grid::{DaySlot, Grid, build_grid};
use crate::stats::summarize;
use crate::widget::CalendarState;
use crate::window::WeekStart;
use chrono::NaiveDate;

const GENERIC_ERROR: &str = "Something went wrong while loading contributions.";

/// Page shell: shows the loading placeholder, then swaps in the calendar
/// fragment from `/widget/{username}`.
pub fn render_page(username: &str, week_start: WeekStart, today: NaiveDate) -> String {
    let loading = render_calendar(username, &CalendarState::Loading, week_start, today);
    INDEX_HTML
        .replace("{{USERNAME}}", &escape_html(username))
        .replace("{{WIDGET_PATH}}", &escape_html(&widget_path(username)))
        .replace("{{LOADING}}", &loading)
}

fn widget_path(username: &str) -> String {
    endpoint("http://localhost/", &["widget", username])
        .map(|url| url.path().to_string())
        .unwrap_or_else(|_| "/widget".to_string())
}

/// HTML fragment for one calendar state.
pub fn render_calendar(
    username: &str,
    state: &CalendarState,
    week_start: WeekStart,
    today: NaiveDate,
) -> String {
    match state {
        CalendarState::Loading => {
            r#"<div class="calendar-status loading" aria-busy="true">Loading contributions&hellip;</div>"#
                .to_string()
        }
        CalendarState::Failed(message) => {
            let message = if message.trim().is_empty() {
                GENERIC_ERROR
            } else {
                message.as_str()
            };
            format!(
                r#"<div class="calendar-status error" role="alert"><strong>Could not load contributions</strong><p>{}</p></div>"#,
                escape_html(message)
            )
        }
        CalendarState::Ready(days) => match build_grid(days, today, week_start) {
            Some(grid) => render_grid(username, days, &grid, week_start),
            None => r#"<div class="calendar-status empty">No contribution data available.</div>"#
                .to_string(),
        },
    }
}

fn render_grid(
    username: &str,
    days: &[crate::models::ContributionDay],
    grid: &Grid,
    week_start: WeekStart,
) -> String {
    let summary = summarize(days);
    let mut html = String::new();

    html.push_str(&format!(
        r#"<div class="calendar" data-user="{user}"><p class="calendar-summary">{total} contributions in the last {span} days &middot; longest streak {longest} &middot; current streak {current}</p>"#,
        user = escape_html(username),
        total = summary.total,
        span = summary.days,
        longest = summary.longest_streak,
        current = summary.current_streak,
    ));

    html.push_str(r#"<table class="calendar-grid"><thead><tr>"#);
    for label in weekday_labels(week_start) {
        html.push_str(&format!("<th scope=\"col\">{label}</th>"));
    }
    html.push_str("</tr></thead><tbody>");

    for row in &grid.rows {
        html.push_str("<tr>");
        for slot in row {
            match slot {
                DaySlot::Day { date, count, level } => html.push_str(&format!(
                    r#"<td class="day level-{level}" data-date="{date}" data-count="{count}" title="{count} on {date}"></td>"#,
                    date = date.format("%Y-%m-%d"),
                )),
                DaySlot::Empty => html.push_str(r#"<td class="day empty"></td>"#),
            }
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");

    html.push_str(r#"<div class="calendar-legend"><span>Less</span>"#);
    for level in 0..=4 {
        html.push_str(&format!(r#"<span class="day level-{level}"></span>"#));
    }
    html.push_str("<span>More</span></div></div>");
    html
}

fn weekday_labels(week_start: WeekStart) -> [&'static str; 7] {
    match week_start {
        WeekStart::Sunday => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
        WeekStart::Monday => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{USERNAME}} &middot; GitHub contributions</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --ink: #2b2a28;
      --muted: #5f5c57;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
      --level-0: #ebedf0;
      --level-1: #9be9a8;
      --level-2: #40c463;
      --level-3: #30a14e;
      --level-4: #216e39;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 20px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.6rem, 4vw, 2.4rem);
      margin: 0;
    }

    .calendar-summary {
      margin: 0 0 12px;
      color: var(--muted);
    }

    .calendar-grid {
      border-spacing: 3px;
    }

    .calendar-grid th {
      font-size: 0.7rem;
      font-weight: 500;
      color: var(--muted);
    }

    .day {
      width: 14px;
      height: 14px;
      border-radius: 3px;
    }

    .calendar-legend {
      display: flex;
      align-items: center;
      gap: 4px;
      margin-top: 10px;
      font-size: 0.75rem;
      color: var(--muted);
    }

    .calendar-legend .day {
      display: inline-block;
    }

    .level-0 { background: var(--level-0); }
    .level-1 { background: var(--level-1); }
    .level-2 { background: var(--level-2); }
    .level-3 { background: var(--level-3); }
    .level-4 { background: var(--level-4); }
    .day.empty { background: transparent; }

    .calendar-status {
      padding: 18px;
      border-radius: 16px;
      background: rgba(47, 72, 88, 0.06);
      color: var(--muted);
    }

    .calendar-status.error {
      background: rgba(255, 107, 74, 0.12);
      color: #9b2c12;
    }

    .calendar-status.error p {
      margin: 6px 0 0;
    }
  </style>
</head>
<body>
  <main class="app">
    <h1>{{USERNAME}}</h1>
    <section id="calendar" data-src="{{WIDGET_PATH}}">{{LOADING}}</section>
  </main>

  <script>
    const container = document.getElementById('calendar');

    const showError = (message) => {
      const panel = document.createElement('div');
      panel.className = 'calendar-status error';
      panel.setAttribute('role', 'alert');
      const title = document.createElement('strong');
      title.textContent = 'Could not load contributions';
      const text = document.createElement('p');
      text.textContent = message || 'Something went wrong while loading contributions.';
      panel.append(title, text);
      container.replaceChildren(panel);
    };

    const load = async () => {
      const res = await fetch(container.dataset.src);
      if (!res.ok) {
        throw new Error(await res.text());
      }
      container.innerHTML = await res.text();
    };

    load().catch((err) => showError(err.message));
  </script>
</body>
</html>
"#;
