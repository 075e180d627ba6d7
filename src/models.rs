use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub count: u64,
}

/// Body of a successful proxy response.
#[derive(Debug, Serialize, Deserialize)]
pub struct DaysResponse {
    pub days: Vec<ContributionDay>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Query string accepted by the proxy. Every field stays a raw string so
/// that parse failures can be reported as 400s instead of extractor
/// rejections.
#[derive(Debug, Default, Deserialize)]
pub struct ContributionsQuery {
    pub username: Option<String>,
    pub user: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub days: Option<String>,
    #[serde(rename = "weekStart")]
    pub week_start: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub user: Option<String>,
}

/// Sorts ascending by date. The sort is stable, so an already sorted list is
/// left untouched.
pub fn sort_days(days: &mut [ContributionDay]) {
    days.sort_by_key(|day| day.date);
}
