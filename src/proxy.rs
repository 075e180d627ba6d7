//! The contributions endpoint: GraphQL behind a server-held token.

use crate::errors::AppError;
use crate::github::fetch_contribution_days;
use crate::models::{ContributionsQuery, DaysResponse, sort_days};
use crate::state::AppState;
use crate::window::{MAX_DAYS, WeekStart, WindowRequest, effective_days, resolve_window};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderValue, Uri, header},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, NaiveDate};
use tracing::{info, warn};

/// Segment the endpoint is mounted under; never taken as a username.
const MOUNT_SEGMENT: &str = "contributions";

pub async fn contributions(
    State(state): State<AppState>,
    Query(query): Query<ContributionsQuery>,
    uri: Uri,
) -> Result<Response, AppError> {
    serve(state, None, query, uri.path()).await
}

pub async fn contributions_at(
    State(state): State<AppState>,
    Path(rest): Path<String>,
    Query(query): Query<ContributionsQuery>,
    uri: Uri,
) -> Result<Response, AppError> {
    let rest = rest.trim_matches('/');
    let path_param = (!rest.is_empty() && !rest.contains('/')).then_some(rest);
    serve(state, path_param, query, uri.path()).await
}

async fn serve(
    state: AppState,
    path_param: Option<&str>,
    query: ContributionsQuery,
    uri_path: &str,
) -> Result<Response, AppError> {
    let username = resolve_username(path_param, &query, uri_path)
        .ok_or_else(|| AppError::bad_request("Missing username"))?;
    let request = parse_window_request(&query)?;
    let window = resolve_window(state.clock.today(), request);

    let token = state.proxy.github_token.as_deref().ok_or_else(|| {
        AppError::unconfigured("Server misconfigured: GITHUB_TOKEN is not set")
    })?;

    let mut days = fetch_contribution_days(
        &state.http,
        &state.proxy.github_api_url,
        token,
        &username,
        window,
    )
    .await
    .map_err(|err| {
        warn!(%username, "contribution query failed: {err}");
        AppError::from(err)
    })?;

    sort_days(&mut days);
    if let Some(requested) = request.days.map(effective_days) {
        keep_last(&mut days, requested);
    }
    info!(%username, from = %window.from, to = %window.to, days = days.len(), "served contributions");

    let mut response = Json(DaysResponse { days }).into_response();
    let cache_control = format!("public, max-age={}", state.proxy.cache_ttl_seconds);
    if let Ok(value) = HeaderValue::from_str(&cache_control) {
        response.headers_mut().insert(header::CACHE_CONTROL, value);
    }
    Ok(response)
}

/// Path parameter, then `?username=`, then `?user=`, then the last path
/// segment of the request.
pub fn resolve_username(
    path_param: Option<&str>,
    query: &ContributionsQuery,
    uri_path: &str,
) -> Option<String> {
    let trailing = uri_path
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .filter(|segment| *segment != MOUNT_SEGMENT);

    [
        path_param,
        query.username.as_deref(),
        query.user.as_deref(),
        trailing,
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .find(|candidate| !candidate.is_empty())
    .map(str::to_string)
}

pub fn parse_window_request(query: &ContributionsQuery) -> Result<WindowRequest, AppError> {
    let from = query.from.as_deref().map(|raw| parse_date("from", raw)).transpose()?;
    let to = query.to.as_deref().map(|raw| parse_date("to", raw)).transpose()?;
    let days = query
        .days
        .as_deref()
        .map(|raw| {
            raw.trim()
                .parse::<i64>()
                .ok()
                .filter(|days| *days <= MAX_DAYS)
                .ok_or_else(|| AppError::bad_request(format!("Invalid days: '{raw}'")))
        })
        .transpose()?;
    let week_start = query
        .week_start
        .as_deref()
        .map(|raw| raw.parse::<WeekStart>().map_err(|err| AppError::bad_request(err.to_string())))
        .transpose()?;

    Ok(WindowRequest {
        from,
        to,
        days,
        week_start,
    })
}

/// Accepts RFC 3339 instants or plain dates. Instants keep their own
/// calendar date; no time zone conversion happens.
fn parse_date(name: &str, raw: &str) -> Result<NaiveDate, AppError> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|instant| instant.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .map_err(|_| AppError::bad_request(format!("Invalid {name}: '{raw}'")))
}

/// Keeps only the most recent `count` entries of an ascending list.
pub fn keep_last<T>(items: &mut Vec<T>, count: i64) {
    let count = usize::try_from(count).unwrap_or(0);
    if items.len() > count {
        items.drain(..items.len() - count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn query(pairs: &[(&str, &str)]) -> ContributionsQuery {
        let mut query = ContributionsQuery::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "username" => query.username = value,
                "user" => query.user = value,
                "from" => query.from = value,
                "to" => query.to = value,
                "days" => query.days = value,
                "weekStart" => query.week_start = value,
                other => panic!("unknown key {other}"),
            }
        }
        query
    }

    #[test]
    fn username_priority_order() {
        let all = query(&[("username", "by-username"), ("user", "by-user")]);
        assert_eq!(
            resolve_username(Some("by-path"), &all, "/x/by-trailing").as_deref(),
            Some("by-path")
        );
        assert_eq!(
            resolve_username(None, &all, "/x/by-trailing").as_deref(),
            Some("by-username")
        );
        let user_only = query(&[("user", "by-user")]);
        assert_eq!(
            resolve_username(None, &user_only, "/x/by-trailing").as_deref(),
            Some("by-user")
        );
        assert_eq!(
            resolve_username(None, &query(&[]), "/api/contributions/users/by-trailing/").as_deref(),
            Some("by-trailing")
        );
    }

    #[test]
    fn mount_segment_is_not_a_username() {
        assert_eq!(resolve_username(None, &query(&[]), "/api/contributions"), None);
        assert_eq!(resolve_username(Some("  "), &query(&[("user", "")]), "/"), None);
    }

    #[test]
    fn window_params_parse_instants_and_dates() {
        let request = parse_window_request(&query(&[
            ("from", "2023-12-31T00:00:00.000Z"),
            ("to", "2024-01-10"),
            ("days", "10"),
            ("weekStart", "1"),
        ]))
        .unwrap();
        assert_eq!(request.from, NaiveDate::from_ymd_opt(2023, 12, 31));
        assert_eq!(request.to, NaiveDate::from_ymd_opt(2024, 1, 10));
        assert_eq!(request.days, Some(10));
        assert_eq!(request.week_start, Some(WeekStart::Monday));
    }

    #[test]
    fn bad_params_are_rejected() {
        for pairs in [
            [("days", "ten")],
            [("weekStart", "3")],
            [("from", "yesterday")],
            [("days", "1000000000")],
            [("days", "9223372036854775807")],
        ] {
            let err = parse_window_request(&query(&pairs)).unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn keep_last_returns_most_recent_entries() {
        let mut items: Vec<u32> = (1..=10).collect();
        keep_last(&mut items, 3);
        assert_eq!(items, vec![8, 9, 10]);

        let mut short = vec![1, 2];
        keep_last(&mut short, 5);
        assert_eq!(short, vec![1, 2]);
    }
}
