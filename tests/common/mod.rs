#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const TOKEN: &str = "test-token";

/// Every request a stub saw, as "path?query".
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    fn push(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_matching(&self, needle: &str) -> usize {
        self.calls().iter().filter(|call| call.contains(needle)).count()
    }
}

pub async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub port");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL nothing listens on.
pub async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ---- GitHub stub -------------------------------------------------------

#[derive(Debug, Deserialize)]
struct EventsQuery {
    per_page: usize,
    page: u32,
}

/// Fake api.github.com. GraphQL behaviour depends on the requested login:
/// `ghost` yields an errors array, `down` a 503, `shuffled` weeks in reverse
/// order; anyone else gets one day per date in the window with
/// `count = day_of_month % 5`. The events feed depends on the username:
/// `limited` is rate limited, `missing` is a 404, `denied` a plain 403,
/// `flaky` a 502, `busy` always returns full pages, `paged` returns two full
/// pages and then one event, and everyone else gets three events on
/// 2024-01-09 and one on 2024-01-10.
pub async fn github_stub() -> (String, Recorder) {
    let recorder = Recorder::default();
    let app = Router::new()
        .route("/graphql", post(graphql))
        .route("/users/:username/events/public", get(events))
        .with_state(recorder.clone());
    (serve(app).await, recorder)
}

async fn graphql(State(recorder): State<Recorder>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let login = body["variables"]["login"].as_str().unwrap_or_default().to_string();
    recorder.push(format!("/graphql?login={login}"));

    let expected = format!("bearer {TOKEN}");
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some(expected.as_str());
    if !authorized {
        return (StatusCode::UNAUTHORIZED, "Bad credentials").into_response();
    }

    match login.as_str() {
        "ghost" => Json(json!({
            "data": { "user": null },
            "errors": [{ "type": "NOT_FOUND", "message": "Could not resolve to a User with the login of 'ghost'." }]
        }))
        .into_response(),
        "down" => (StatusCode::SERVICE_UNAVAILABLE, "upstream unavailable").into_response(),
        other => {
            let from = variable_date(&body, "from");
            let to = variable_date(&body, "to");
            let days: Vec<Value> = from
                .iter_days()
                .take_while(|day| *day <= to)
                .map(|day| {
                    json!({
                        "date": day.format("%Y-%m-%d").to_string(),
                        "contributionCount": chrono::Datelike::day(&day) % 5,
                    })
                })
                .collect();
            let mut weeks: Vec<Value> = days
                .chunks(7)
                .map(|chunk| json!({ "contributionDays": chunk }))
                .collect();
            if other == "shuffled" {
                weeks.reverse();
            }
            Json(json!({
                "data": { "user": { "contributionsCollection": { "contributionCalendar": { "weeks": weeks } } } }
            }))
            .into_response()
        }
    }
}

fn variable_date(body: &Value, name: &str) -> NaiveDate {
    let raw = body["variables"][name].as_str().unwrap();
    NaiveDate::parse_from_str(&raw[..10], "%Y-%m-%d").unwrap()
}

async fn events(
    State(recorder): State<Recorder>,
    Path(username): Path<String>,
    Query(query): Query<EventsQuery>,
    headers: HeaderMap,
) -> Response {
    recorder.push(format!("/users/{username}/events/public?page={}", query.page));
    assert_eq!(
        headers.get(header::ACCEPT).and_then(|value| value.to_str().ok()),
        Some("application/vnd.github.v3+json")
    );

    let event = |timestamp: &str| json!({ "type": "PushEvent", "created_at": timestamp });
    match username.as_str() {
        "limited" => (
            StatusCode::FORBIDDEN,
            [("x-ratelimit-remaining", "0"), ("x-ratelimit-reset", "1704888000")],
            "API rate limit exceeded",
        )
            .into_response(),
        "missing" => (StatusCode::NOT_FOUND, "Not Found").into_response(),
        "denied" => (
            StatusCode::FORBIDDEN,
            [("x-ratelimit-remaining", "42")],
            "Resource not accessible",
        )
            .into_response(),
        "flaky" => (StatusCode::BAD_GATEWAY, "bad gateway body").into_response(),
        "busy" => {
            let page: Vec<Value> = (0..query.per_page).map(|_| event("2024-01-08T10:00:00Z")).collect();
            Json(page).into_response()
        }
        "paged" => {
            let size = if query.page < 3 { query.per_page } else { 1 };
            let page: Vec<Value> = (0..size).map(|_| event("2024-01-05T10:00:00Z")).collect();
            Json(page).into_response()
        }
        _ => (
            [("x-ratelimit-remaining", "59")],
            Json(json!([
                event("2024-01-09T08:00:00Z"),
                event("2024-01-09T09:30:00Z"),
                event("2024-01-09T21:15:00Z"),
                event("2024-01-10T07:00:00Z"),
            ])),
        )
            .into_response(),
    }
}

// ---- proxy stub --------------------------------------------------------

/// Fake contributions proxy: `octocat` gets three unsorted days, `broken` a
/// 500, `garbled` a 200 that is not JSON, everyone else an empty list.
pub async fn proxy_stub() -> (String, Recorder) {
    let recorder = Recorder::default();
    let app = Router::new()
        .route("/api/contributions/:username", get(proxy_days))
        .with_state(recorder.clone());
    let base = serve(app).await;
    (format!("{base}/api/contributions"), recorder)
}

async fn proxy_days(
    State(recorder): State<Recorder>,
    Path(username): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut params: Vec<_> = query.iter().map(|(key, value)| format!("{key}={value}")).collect();
    params.sort();
    recorder.push(format!("/{username}?{}", params.join("&")));

    match username.as_str() {
        "octocat" => Json(json!({
            "days": [
                { "date": "2024-01-10", "count": 2 },
                { "date": "2024-01-08", "count": 8 },
                { "date": "2024-01-09", "count": 0 }
            ]
        }))
        .into_response(),
        "broken" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        "garbled" => "<html>not json</html>".into_response(),
        _ => Json(json!({ "days": [] })).into_response(),
    }
}
