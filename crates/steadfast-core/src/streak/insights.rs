//! Read-only projections of the streak record for the dashboard and the
//! progress screen.
//!
//! Calendar dates are interpreted at UTC midnight.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use super::data::{elapsed_days, StreakData, MS_PER_DAY};

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Whole days since `start_date`, direction ignored.
    pub total_days: u32,
    pub hours_reclaimed: u32,
    pub goal_days: u32,
    /// Progress towards `goal_days`, capped at 100.
    pub goal_progress_percent: f64,
}

impl DashboardSummary {
    pub fn build(
        data: &StreakData,
        now: DateTime<Utc>,
        hours_per_day: u32,
        goal_days: u32,
    ) -> Self {
        let total_days = if now >= data.start_date {
            elapsed_days(data.start_date, now)
        } else {
            elapsed_days(now, data.start_date)
        };
        let goal_progress_percent = if goal_days == 0 {
            100.0
        } else {
            (f64::from(data.current_streak) / f64::from(goal_days) * 100.0).min(100.0)
        };

        Self {
            current_streak: data.current_streak,
            longest_streak: data.longest_streak,
            total_days,
            hours_reclaimed: data.current_streak.saturating_mul(hours_per_day),
            goal_days,
            goal_progress_percent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub day: u32,
    pub is_clean: bool,
    pub is_today: bool,
}

/// Month grid, Sunday first.
#[derive(Debug, Clone, Serialize)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    /// `None` cells pad the first week up to the first weekday.
    pub cells: Vec<Option<CalendarDay>>,
}

impl MonthCalendar {
    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.cells.iter().flatten()
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells.iter().take_while(|c| c.is_none()).count()
    }
}

/// Build the calendar for the month containing `today`.
///
/// A day is clean when its midnight is at least one floored day after
/// `start_date` and it is not in the future.
pub fn month_calendar(start_date: DateTime<Utc>, today: NaiveDate) -> MonthCalendar {
    let first = today - Days::new(u64::from(today.day0()));
    let blanks = first.weekday().num_days_from_sunday() as usize;

    let mut cells: Vec<Option<CalendarDay>> = vec![None; blanks];
    for date in first.iter_days().take_while(|d| d.month() == today.month()) {
        let midnight = date.and_time(NaiveTime::MIN).and_utc();
        let days_since_start = (midnight - start_date)
            .num_milliseconds()
            .div_euclid(MS_PER_DAY);
        cells.push(Some(CalendarDay {
            day: date.day(),
            is_clean: days_since_start >= 0 && date.day() <= today.day(),
            is_today: date.day() == today.day(),
        }));
    }

    MonthCalendar {
        year: today.year(),
        month: today.month(),
        cells,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphPoint {
    /// Short weekday name, e.g. "Mon".
    pub label: String,
    pub date: NaiveDate,
    pub streak: u32,
}

/// Seven points ending at `today`, each backing the streak off by a day.
pub fn weekly_graph(current_streak: u32, today: NaiveDate) -> Vec<GraphPoint> {
    (0..7u32)
        .rev()
        .filter_map(|offset| {
            let date = today.checked_sub_days(Days::new(u64::from(offset)))?;
            Some(GraphPoint {
                label: date.format("%a").to_string(),
                date,
                streak: current_streak.saturating_sub(offset),
            })
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressSummary {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub start_date: DateTime<Utc>,
    pub days_since_start: u32,
    pub calendar: MonthCalendar,
    pub week: Vec<GraphPoint>,
}

impl ProgressSummary {
    pub fn build(data: &StreakData, now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        Self {
            current_streak: data.current_streak,
            longest_streak: data.longest_streak,
            start_date: data.start_date,
            days_since_start: elapsed_days(data.start_date, now),
            calendar: month_calendar(data.start_date, today),
            week: weekly_graph(data.current_streak, today),
        }
    }
}
