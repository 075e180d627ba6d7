use crate::errors::CalendarError;
use crate::models::ContributionDay;
use crate::window::DateWindow;
use chrono::NaiveDate;
use reqwest::{Client, header};
use serde::Deserialize;
use serde_json::json;

const CONTRIBUTIONS_QUERY: &str = "query($login: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $login) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        weeks {
          contributionDays {
            date
            contributionCount
          }
        }
      }
    }
  }
}";

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    pub data: Option<ResponseData>,
    #[serde(default)]
    pub errors: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseData {
    pub user: Option<User>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Deserialize)]
pub struct ContributionCalendar {
    pub weeks: Vec<Week>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    pub contribution_days: Vec<CalendarDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub contribution_count: u64,
}

pub fn instant(date: NaiveDate) -> String {
    format!("{}T00:00:00Z", date.format("%Y-%m-%d"))
}

/// Runs the contribution calendar query for `login` over `window`.
/// The returned days are in the order GitHub sent them.
pub async fn fetch_contribution_days(
    http: &Client,
    api_url: &str,
    token: &str,
    login: &str,
    window: DateWindow,
) -> Result<Vec<ContributionDay>, CalendarError> {
    let body = json!({
        "query": CONTRIBUTIONS_QUERY,
        "variables": {
            "login": login,
            "from": instant(window.from),
            "to": instant(window.to),
        }
    });

    let response = http
        .post(format!("{api_url}/graphql"))
        .header(header::AUTHORIZATION, format!("bearer {token}"))
        .json(&body)
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

    let bytes = response.bytes().await?;
    let payload: GraphQlResponse = serde_json::from_slice(&bytes)
        .map_err(|err| CalendarError::MalformedResponse(err.to_string()))?;
    parse_days(payload)
}

fn parse_days(payload: GraphQlResponse) -> Result<Vec<ContributionDay>, CalendarError> {
    if let Some(errors) = payload.errors.filter(|errors| !errors.is_empty()) {
        return Err(CalendarError::UpstreamGraphQl(serde_json::Value::Array(errors)));
    }

    match payload.data.and_then(|data| data.user) {
        Some(user) => Ok(flatten_weeks(
            user.contributions_collection.contribution_calendar.weeks,
        )),
        None => Ok(Vec::new()),
    }
}

pub fn flatten_weeks(weeks: Vec<Week>) -> Vec<ContributionDay> {
    weeks
        .into_iter()
        .flat_map(|week| week.contribution_days)
        .map(|day| ContributionDay {
            date: day.date,
            count: day.contribution_count,
        })
        .collect()
}
