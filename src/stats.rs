use crate::models::{ContributionDay, sort_days};
use chrono::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub total: u64,
    pub days: usize,
    pub active_days: usize,
    pub longest_streak: usize,
    pub current_streak: usize,
}

/// Totals and streaks over a day list. Dates missing from the list break a
/// streak the same way a zero-count day does. The current streak may end on
/// the day before the last listed date, so a quiet "today" does not reset it.
pub fn summarize(days: &[ContributionDay]) -> Summary {
    let mut days = days.to_vec();
    sort_days(&mut days);

    let mut summary = Summary {
        days: days.len(),
        ..Summary::default()
    };

    let mut run = 0usize;
    let mut previous = None;
    for day in &days {
        summary.total = summary.total.saturating_add(day.count);
        let contiguous = previous.is_some_and(|prev| day.date - prev == Duration::days(1));
        if day.count > 0 {
            summary.active_days += 1;
            run = if contiguous { run + 1 } else { 1 };
            summary.longest_streak = summary.longest_streak.max(run);
        } else {
            run = 0;
        }
        previous = Some(day.date);
    }

    summary.current_streak = match days.last() {
        Some(last) if last.count == 0 => {
            trailing_run(&days[..days.len() - 1], last.date - Duration::days(1))
        }
        Some(last) => trailing_run(&days, last.date),
        None => 0,
    };

    summary
}

fn trailing_run(days: &[ContributionDay], mut expected: chrono::NaiveDate) -> usize {
    let mut run = 0;
    for day in days.iter().rev() {
        if day.date != expected || day.count == 0 {
            break;
        }
        run += 1;
        expected -= Duration::days(1);
    }
    run
}
