//! Property tests for week-of-month labelling over arbitrary calendar dates.

use chrono::{Datelike, Days, NaiveDate};
use proptest::prelude::*;
use week_of_month::{
    first_day_of_each_week, first_weekday_of_month, parse_week_of_month, week_of_month,
    WeekOfMonth,
};

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (1600i32..2400, 1u32..=12, 1u32..=31)
        .prop_filter_map("not a calendar date", |(y, m, d)| {
            NaiveDate::from_ymd_opt(y, m, d)
        })
}

/// Two days of the same month, earlier first.
fn same_month_pair() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (any_date(), 1u32..=31).prop_filter_map("second day outside month", |(a, day)| {
        let b = a.with_day(day)?;
        Some(if a <= b { (a, b) } else { (b, a) })
    })
}

fn rolled_back(date: &NaiveDate, label: &WeekOfMonth) -> bool {
    label.month != date.month() || label.year != date.year()
}

proptest! {
    #[test]
    fn week_is_between_one_and_five(date in any_date()) {
        let label = week_of_month(&date);
        prop_assert!((1..=5).contains(&label.week), "{date} -> {label}");
        prop_assert!((1..=12).contains(&label.month), "{date} -> {label}");
    }

    #[test]
    fn labels_never_decrease_within_a_month((a, b) in same_month_pair()) {
        let (la, lb) = (week_of_month(&a), week_of_month(&b));
        prop_assert!(la <= lb, "{a} -> {la}, {b} -> {lb}");
        if !rolled_back(&a, &la) {
            prop_assert!(la.week <= lb.week);
        }
    }

    #[test]
    fn rollback_only_before_first_boundary(date in any_date()) {
        let label = week_of_month(&date);
        let boundaries = first_day_of_each_week(first_weekday_of_month(&date));
        if rolled_back(&date, &label) {
            prop_assert!(date.day() < boundaries[0]);
            prop_assert_eq!(label.week, 5);
            let prev = date.with_day(1).and_then(|d| d.pred_opt()).unwrap();
            prop_assert_eq!((label.year, label.month), (prev.year(), prev.month()));
        } else {
            prop_assert!(date.day() >= boundaries[0]);
        }
    }

    #[test]
    fn boundaries_are_ascending_within_month(fwd in 0u32..7) {
        let days = first_day_of_each_week(fwd);
        prop_assert!(days.len() == 4 || days.len() == 5, "{days:?}");
        prop_assert!((1..=7).contains(&days[0]));
        prop_assert!(days.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(days.iter().all(|&d| d <= 31));
    }

    #[test]
    fn first_weekday_agrees_with_day_one(date in any_date()) {
        let day_one = date.with_day(1).unwrap();
        prop_assert_eq!(
            first_weekday_of_month(&date),
            day_one.weekday().num_days_from_monday()
        );
    }

    #[test]
    fn labeled_week_opens_on_dates_monday(date in any_date()) {
        let label = week_of_month(&date);
        prop_assume!(!rolled_back(&date, &label));
        let monday = date
            .checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
            .unwrap();
        prop_assert_eq!(label.first_day(), Some(monday));
    }

    #[test]
    fn parsed_iso_date_matches(date in any_date()) {
        let parsed = parse_week_of_month(&date.format("%Y-%m-%d").to_string()).unwrap();
        prop_assert_eq!(parsed, week_of_month(&date));
    }
}
