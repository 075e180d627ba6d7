//! Public events feed, used when the GraphQL proxy is unavailable.
//!
//! The feed reports events, not contributions: a push with twenty commits is
//! one event. Counts built here are an approximation of the real calendar.

use super::endpoint;
use crate::errors::CalendarError;
use crate::models::ContributionDay;
use crate::window::dates_inclusive;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, Response, StatusCode, header};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// Only the creation time matters; every other event field is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PublicEvent {
    pub created_at: DateTime<Utc>,
}

/// Walks `/users/{username}/events/public` one page at a time, stopping at
/// the first short or empty page, or after `max_pages`.
pub async fn fetch_public_events(
    http: &Client,
    api_url: &str,
    username: &str,
    per_page: u32,
    max_pages: u32,
) -> Result<Vec<PublicEvent>, CalendarError> {
    let url = endpoint(api_url, &["users", username, "events", "public"])?;
    let mut events = Vec::new();

    for page in 1..=max_pages {
        let response = http
            .get(url.clone())
            .header(header::ACCEPT, "application/vnd.github.v3+json")
            .query(&[("per_page", per_page), ("page", page)])
            .send()
            .await?;

        check_rate_limit(&response)?;
        let response = check_status(response, username).await?;

        let batch: Vec<PublicEvent> = response
            .json()
            .await
            .map_err(|err| CalendarError::MalformedResponse(err.to_string()))?;
        let fetched = batch.len();
        debug!(page, fetched, "fetched public events page");
        events.extend(batch);

        if fetched == 0 || fetched < per_page as usize {
            break;
        }
    }

    Ok(events)
}

fn check_rate_limit(response: &Response) -> Result<(), CalendarError> {
    let remaining = response
        .headers()
        .get(RATE_LIMIT_REMAINING)
        .and_then(|value| value.to_str().ok());
    if remaining.map(str::trim) != Some("0") {
        return Ok(());
    }

    let reset = response
        .headers()
        .get(RATE_LIMIT_RESET)
        .and_then(|value| value.to_str().ok())
        .and_then(format_reset);
    Err(CalendarError::RateLimited { reset })
}

/// Renders an `X-RateLimit-Reset` epoch as a readable UTC timestamp.
pub fn format_reset(epoch: &str) -> Option<String> {
    let seconds = epoch.trim().parse::<i64>().ok()?;
    let reset = DateTime::<Utc>::from_timestamp(seconds, 0)?;
    Some(reset.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}

async fn check_status(response: Response, username: &str) -> Result<Response, CalendarError> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::NOT_FOUND => Err(CalendarError::NotFound(username.to_string())),
        StatusCode::FORBIDDEN => {
            let body = response.text().await.unwrap_or_default();
            Err(CalendarError::Forbidden(body))
        }
        status => {
            let body = response.text().await.unwrap_or_default();
            Err(CalendarError::UpstreamHttp {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Counts events per UTC calendar date of their creation time.
pub fn aggregate_events(events: &[PublicEvent]) -> BTreeMap<NaiveDate, u64> {
    let mut counts = BTreeMap::new();
    for event in events {
        *counts.entry(event.created_at.date_naive()).or_insert(0) += 1;
    }
    counts
}

/// One entry per date from `start` through `today`, zero where nothing was
/// counted.
pub fn fill_days(
    counts: &BTreeMap<NaiveDate, u64>,
    start: NaiveDate,
    today: NaiveDate,
) -> Vec<ContributionDay> {
    dates_inclusive(start, today)
        .map(|date| ContributionDay {
            date,
            count: counts.get(&date).copied().unwrap_or(0),
        })
        .collect()
}
