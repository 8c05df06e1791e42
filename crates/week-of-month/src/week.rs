//! Week-of-month labelling.
//!
//! Weeks run Monday through Sunday, and week 1 of a month is the week that
//! holds the month's first Thursday. When a month starts on a Friday, Saturday
//! or Sunday, its first few days therefore belong to the last week of the
//! previous month: 2021-05-01 (a Saturday) is week 5 of April 2021.
//!
//! # Functions
//!
//! - [`first_weekday_of_month`] — Monday-based weekday index of day 1 of a month
//! - [`first_day_of_each_week`] — Day numbers that open each week of a month
//! - [`week_of_month`] — Resolve a date to its `(year, month, week)` label
//! - [`week_of_month_ymd`] — Same, from a raw year/month/day triple
//! - [`parse_week_of_month`] — Same, from an ISO 8601 date or RFC 3339 datetime
//!
//! Every function is pure: no clock access, no shared state.

use std::fmt;

use chrono::{DateTime, Datelike, Days, NaiveDate};
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Result, WeekError};

/// Monday-based day of the week: Monday = 0 through Sunday = 6.
pub type WeekdayIndex = u32;

/// Latest weekday (Thursday) on which day 1 still opens week 1.
const LAST_WEEK_ONE_WEEKDAY: WeekdayIndex = 3;

/// Label given to days that fall before the month's first week boundary.
const ROLLBACK_WEEK: u32 = 5;

/// Exclusive upper bound on day numbers across all months.
const DAY_LIMIT: u32 = 32;

// ── WeekOfMonth ─────────────────────────────────────────────────────────────

/// A week-of-month label.
///
/// `year` and `month` name the month the week belongs to. They are the
/// previous month's when the date precedes its own month's first week.
/// Labels order chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct WeekOfMonth {
    /// Calendar year of the labeled month.
    pub year: i32,
    /// Labeled month (1-12).
    pub month: u32,
    /// Week within the labeled month (1-5).
    pub week: u32,
}

impl WeekOfMonth {
    /// Label for `date`. Same as [`week_of_month`].
    pub fn of<D: Datelike>(date: &D) -> Self {
        week_of_month(date)
    }

    /// The Monday that opens this week.
    ///
    /// Week 1 of a month starting Tuesday through Thursday opens on a Monday
    /// of the previous month.
    ///
    /// Returns `None` if the label does not exist for its month: a week number
    /// outside the month's boundaries, a fifth week whose boundary day is past
    /// the month's last day, or a month outside 1-12.
    pub fn first_day(&self) -> Option<NaiveDate> {
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1)?;
        let boundaries = first_day_of_each_week(first_weekday_of_month(&first));
        let index = usize::try_from(self.week.checked_sub(1)?).ok()?;
        let boundary = NaiveDate::from_ymd_opt(self.year, self.month, *boundaries.get(index)?)?;
        boundary.checked_sub_days(Days::new(u64::from(
            boundary.weekday().num_days_from_monday(),
        )))
    }
}

impl fmt::Display for WeekOfMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02} W{}", self.year, self.month, self.week)
    }
}

// ── first_weekday_of_month ──────────────────────────────────────────────────

/// Weekday index (Monday = 0 .. Sunday = 6) of day 1 of `date`'s month.
///
/// Only the calendar date is read, so a `DateTime` contributes its local date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use week_of_month::first_weekday_of_month;
///
/// // 2021-05-01 is a Saturday.
/// let date = NaiveDate::from_ymd_opt(2021, 5, 28).unwrap();
/// assert_eq!(first_weekday_of_month(&date), 5);
/// ```
pub fn first_weekday_of_month<D: Datelike>(date: &D) -> WeekdayIndex {
    // Day 1 is `day0` days before `date`.
    let sunday_based = (date.weekday().num_days_from_sunday() + 7 - date.day0() % 7) % 7;
    (sunday_based + 7 - 1) % 7
}

// ── first_day_of_each_week ──────────────────────────────────────────────────

/// Day numbers that open each week of a month whose day 1 falls on `fwd`.
///
/// Day 1 opens week 1 when the month starts Monday through Thursday.
/// Otherwise week 1 opens on the first Monday. Later weeks open every seven
/// days up to day 31, so the result has four or five ascending entries.
/// It is not clipped to the actual month length.
///
/// `fwd` is taken modulo 7.
///
/// # Examples
///
/// ```
/// use week_of_month::first_day_of_each_week;
///
/// assert_eq!(first_day_of_each_week(5), vec![3, 10, 17, 24, 31]);
/// assert_eq!(first_day_of_each_week(1), vec![1, 7, 14, 21, 28]);
/// ```
pub fn first_day_of_each_week(fwd: WeekdayIndex) -> Vec<u32> {
    let fwd = fwd % 7;
    let first_monday = 1 + (6 - fwd) + 1;

    let mut days = Vec::with_capacity(5);
    if fwd <= LAST_WEEK_ONE_WEEKDAY {
        days.push(1);
    }
    days.extend((first_monday..DAY_LIMIT).step_by(7));
    days
}

// ── week_of_month ───────────────────────────────────────────────────────────

/// Resolve a date to its week-of-month label.
///
/// A date before its month's first week boundary belongs to week 5 of the
/// previous month; January rolls back to December of the previous year.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use week_of_month::{week_of_month, WeekOfMonth};
///
/// let date = NaiveDate::from_ymd_opt(2021, 5, 1).unwrap();
/// assert_eq!(
///     week_of_month(&date),
///     WeekOfMonth { year: 2021, month: 4, week: 5 }
/// );
/// ```
pub fn week_of_month<D: Datelike>(date: &D) -> WeekOfMonth {
    let (year, month, day) = (date.year(), date.month(), date.day());
    let fwd = first_weekday_of_month(date);
    let boundaries = first_day_of_each_week(fwd);

    if boundaries.first().is_some_and(|&start| day < start) {
        let (prev_year, prev_month) = previous_month(year, month);
        debug!(
            year,
            month,
            day,
            first_weekday = fwd,
            "date precedes first week of its month, rolled back to {prev_year:04}-{prev_month:02}"
        );
        return WeekOfMonth {
            year: prev_year,
            month: prev_month,
            week: ROLLBACK_WEEK,
        };
    }

    let week = boundaries.iter().take_while(|&&start| start <= day).count() as u32;
    trace!(year, month, day, week, "resolved week of month");

    WeekOfMonth { year, month, week }
}

/// Resolve a raw year/month/day triple to its week-of-month label.
///
/// # Errors
///
/// Returns [`WeekError::InvalidDate`] if the triple is not a proleptic
/// Gregorian calendar date (month 13, February 30, ...).
pub fn week_of_month_ymd(year: i32, month: u32, day: u32) -> Result<WeekOfMonth> {
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        WeekError::InvalidDate(format!(
            "{year:04}-{month:02}-{day:02} is not a calendar date"
        ))
    })?;
    Ok(week_of_month(&date))
}

/// Parse a date string and resolve it to its week-of-month label.
///
/// Accepts an ISO 8601 date (`"2021-05-01"`) or an RFC 3339 datetime
/// (`"2021-05-01T23:30:00-05:00"`). A datetime contributes the date in its
/// own offset.
///
/// # Errors
///
/// Returns [`WeekError::InvalidDate`] if the string is neither.
pub fn parse_week_of_month(s: &str) -> Result<WeekOfMonth> {
    let s = s.trim();
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .ok_or_else(|| WeekError::InvalidDate(format!("'{s}'")))?;
    Ok(week_of_month(&date))
}

// ── Internal helpers ────────────────────────────────────────────────────────

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}
