//! Week-by-week layout of a contribution list.

use crate::level::level;
use crate::models::{ContributionDay, sort_days};
use crate::window::{WeekStart, align_to_week_start};
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySlot {
    Day { date: NaiveDate, count: u64, level: u8 },
    /// A date after today on the final row.
    Empty,
}

pub type WeekRow = [DaySlot; 7];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub rows: Vec<WeekRow>,
    pub max: u64,
}

/// Lays `days` out in rows of seven starting on `week_start`, ending with the
/// row that contains `today`. Returns `None` when there is nothing to show.
pub fn build_grid(days: &[ContributionDay], today: NaiveDate, week_start: WeekStart) -> Option<Grid> {
    let mut days = days.to_vec();
    sort_days(&mut days);
    let first = days.first()?.date;

    let max = days.iter().map(|day| day.count).max().unwrap_or(0);
    let counts: HashMap<NaiveDate, u64> = days.iter().map(|day| (day.date, day.count)).collect();

    let mut rows = Vec::new();
    let mut row_start = align_to_week_start(first, week_start);
    while row_start <= today {
        let row: WeekRow = std::array::from_fn(|offset| {
            let date = row_start + Duration::days(offset as i64);
            if date > today {
                DaySlot::Empty
            } else {
                let count = counts.get(&date).copied().unwrap_or(0);
                DaySlot::Day {
                    date,
                    count,
                    level: level(count, max),
                }
            }
        });
        rows.push(row);
        row_start += Duration::days(7);
    }

    Some(Grid { rows, max })
}
