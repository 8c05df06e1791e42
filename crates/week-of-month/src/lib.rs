//! # week-of-month
//!
//! Deterministic week-of-month labels for calendar dates.
//!
//! Weeks run Monday through Sunday, and week 1 of a month is the week that
//! contains the month's first Thursday, matching the ISO 8601 week-numbering
//! rule applied per month. Days that fall before a month's first week belong
//! to week 5 of the previous month.
//!
//! ## Modules
//!
//! - [`week`] — Weekday of day 1, week boundaries, and the week-of-month label
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```
//! use week_of_month::parse_week_of_month;
//!
//! let label = parse_week_of_month("2021-05-01").unwrap();
//! assert_eq!(label.to_string(), "2021-04 W5");
//! ```

pub mod error;
pub mod week;

pub use error::WeekError;
pub use week::{
    first_day_of_each_week, first_weekday_of_month, parse_week_of_month, week_of_month,
    week_of_month_ymd, WeekOfMonth, WeekdayIndex,
};
