//! Date window resolution shared by the proxy, the events fallback and the
//! grid renderer.

use chrono::{Datelike, Duration, Months, NaiveDate};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Day count used when a caller asks for zero or a negative number of days.
pub const DEFAULT_DAYS: i64 = 167;

/// Largest window, in days, a day count may ask for.
pub const MAX_DAYS: i64 = 3660;

/// First weekday of a rendered calendar row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn index(self) -> u32 {
        match self {
            WeekStart::Sunday => 0,
            WeekStart::Monday => 1,
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("weekStart must be 0 or 1, got '{0}'")]
pub struct InvalidWeekStart(pub String);

impl FromStr for WeekStart {
    type Err = InvalidWeekStart;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(WeekStart::Sunday),
            "1" => Ok(WeekStart::Monday),
            other => Err(InvalidWeekStart(other.to_string())),
        }
    }
}

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    pub fn len_days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WindowRequest {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub days: Option<i64>,
    pub week_start: Option<WeekStart>,
}

/// Replaces non-positive day counts with [`DEFAULT_DAYS`] and caps the rest
/// at [`MAX_DAYS`].
pub fn effective_days(days: i64) -> i64 {
    if days > 0 { days.min(MAX_DAYS) } else { DEFAULT_DAYS }
}

/// `date` minus `days`, saturating at the earliest representable date.
fn days_before(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|delta| date.checked_sub_signed(delta))
        .unwrap_or(NaiveDate::MIN)
}

/// Moves `date` back to the nearest `week_start` weekday (or leaves it when
/// it already is one).
pub fn align_to_week_start(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday();
    let shift = (weekday + 7 - week_start.index()) % 7;
    days_before(date, i64::from(shift))
}

pub fn resolve_window(today: NaiveDate, request: WindowRequest) -> DateWindow {
    let to = request.to.unwrap_or(today);

    let from = if let Some(from) = request.from {
        from.min(to)
    } else if let Some(days) = request.days {
        let start = days_before(to, effective_days(days) - 1);
        match request.week_start {
            Some(week_start) => align_to_week_start(start, week_start),
            None => start,
        }
    } else {
        to.checked_sub_months(Months::new(12))
            .unwrap_or_else(|| days_before(to, 365))
    };

    DateWindow { from, to }
}

pub fn dates_inclusive(from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    from.iter_days().take_while(move |date| *date <= to)
}
