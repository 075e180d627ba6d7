//! Thin clients for the two GitHub APIs the calendar reads from.

use crate::errors::CalendarError;

pub mod events;
pub mod graphql;

pub use events::{aggregate_events, fetch_public_events, fill_days};
pub use graphql::{fetch_contribution_days, flatten_weeks};

pub const USER_AGENT: &str = concat!("contrib_calendar/", env!("CARGO_PKG_VERSION"));

pub fn http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().user_agent(USER_AGENT).build()
}

/// Appends percent-encoded path segments to `base`.
pub fn endpoint(base: &str, segments: &[&str]) -> Result<reqwest::Url, CalendarError> {
    let mut url = reqwest::Url::parse(base)
        .map_err(|err| CalendarError::Config(format!("invalid base URL '{base}': {err}")))?;
    url.path_segments_mut()
        .map_err(|()| CalendarError::Config(format!("base URL '{base}' cannot take a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
