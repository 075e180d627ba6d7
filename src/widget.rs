//! Loads a user's calendar through the proxy, falling back to the public
//! events feed, and turns the outcome into HTML.

use crate::clock::Clock;
use crate::config::WidgetConfig;
use crate::errors::CalendarError;
use crate::github::{aggregate_events, endpoint, fetch_public_events, fill_days, graphql::instant};
use crate::models::{ContributionDay, DaysResponse, sort_days};
use crate::ui::render_calendar;
use crate::window::{DateWindow, WindowRequest, effective_days, resolve_window};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarState {
    Loading,
    Ready(Vec<ContributionDay>),
    Failed(String),
}

pub struct CalendarWidget {
    config: Arc<WidgetConfig>,
    http: reqwest::Client,
    clock: Arc<dyn Clock>,
}

impl CalendarWidget {
    pub fn new(config: Arc<WidgetConfig>, http: reqwest::Client, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            http,
            clock,
        }
    }

    pub fn window(&self) -> DateWindow {
        resolve_window(
            self.clock.today(),
            WindowRequest {
                days: Some(self.config.days_to_show),
                week_start: Some(self.config.week_start),
                ..WindowRequest::default()
            },
        )
    }

    /// Proxy first; on any proxy failure the public events feed.
    pub async fn load(&self, username: &str) -> Result<Vec<ContributionDay>, CalendarError> {
        let window = self.window();

        match self.fetch_from_proxy(username, window).await {
            Ok(days) => return Ok(days),
            Err(err) => warn!(%username, "proxy unavailable, falling back to public events: {err}"),
        }

        self.fetch_from_events(username, window).await.inspect_err(|err| {
            error!(%username, "failed to load contributions: {err}");
        })
    }

    pub async fn state(&self, username: &str) -> CalendarState {
        match self.load(username).await {
            Ok(days) => CalendarState::Ready(days),
            Err(err) => CalendarState::Failed(err.to_string()),
        }
    }

    pub async fn render(&self, username: &str) -> String {
        let state = self.state(username).await;
        render_calendar(username, &state, self.config.week_start, self.clock.today())
    }

    async fn fetch_from_proxy(
        &self,
        username: &str,
        window: DateWindow,
    ) -> Result<Vec<ContributionDay>, CalendarError> {
        let url = endpoint(&self.config.proxy_base_url, &[username])?;
        let from = instant(window.from);
        let to = instant(window.to);
        let days = effective_days(self.config.days_to_show).to_string();
        let week_start = self.config.week_start.to_string();
        let response = self
            .http
            .get(url)
            .query(&[
                ("username", username),
                ("from", from.as_str()),
                ("to", to.as_str()),
                ("days", days.as_str()),
                ("weekStart", week_start.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CalendarError::UpstreamHttp {
                status: status.as_u16(),
                body,
            });
        }

        let payload: DaysResponse = response
            .json()
            .await
            .map_err(|err| CalendarError::MalformedResponse(err.to_string()))?;
        if payload.days.is_empty() {
            return Err(CalendarError::MalformedResponse(
                "proxy returned no days".to_string(),
            ));
        }

        let mut days = payload.days;
        sort_days(&mut days);
        info!(%username, days = days.len(), "loaded contributions from proxy");
        Ok(days)
    }

    async fn fetch_from_events(
        &self,
        username: &str,
        window: DateWindow,
    ) -> Result<Vec<ContributionDay>, CalendarError> {
        let events = fetch_public_events(
            &self.http,
            &self.config.github_api_url,
            username,
            self.config.per_page,
            self.config.max_pages,
        )
        .await?;

        let counts = aggregate_events(&events);
        let days = fill_days(&counts, window.from, self.clock.today());
        info!(%username, events = events.len(), days = days.len(), "built contributions from public events");
        Ok(days)
    }
}
