//! Unit tests for time labels.
//!
//! Run with: cargo test --test time_format_test

use chrono::FixedOffset;
use temperature_chart::chart::{DisplayZone, TimeFormat, TimeFormatter, TimeWindow};

/// Monday 2026-01-05 00:00:00 UTC
const MONDAY: i64 = 1_767_571_200;

fn utc() -> TimeFormatter {
    TimeFormatter::new(DisplayZone::Utc)
}

#[test]
fn day_view_requires_both_bounds_within_a_day() {
    assert!(TimeWindow::between(0, 43_200).is_day_view());
    assert!(TimeWindow::between(0, 86_400).is_day_view());
    assert!(!TimeWindow::between(0, 86_401).is_day_view());
    assert!(!TimeWindow::new(Some(0), None).is_day_view());
    assert!(!TimeWindow::new(None, Some(100)).is_day_view());
    assert!(!TimeWindow::default().is_day_view());
}

#[test]
fn day_view_shows_time_of_day_only() {
    let window = TimeWindow::between(MONDAY, MONDAY + 86_400);
    let label = utc().format((MONDAY + 14 * 3600 + 30 * 60) * 1000, &window);
    assert_eq!(label, "14:30");
}

#[test]
fn multi_day_view_shows_weekday_and_date() {
    let window = TimeWindow::between(MONDAY, MONDAY + 7 * 86_400);
    let label = utc().format((MONDAY + 14 * 3600 + 30 * 60) * 1000, &window);
    assert_eq!(label, "Mon, Jan 5, 14:30");
}

#[test]
fn unbounded_window_uses_long_format() {
    let label = utc().format(0, &TimeWindow::default());
    assert_eq!(label, "Thu, Jan 1, 00:00");
}

#[test]
fn day_view_labels_never_contain_date_parts() {
    let window = TimeWindow::between(MONDAY, MONDAY + 86_400);
    let days = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
    let months = ["Jan", "Feb", "Dec"];

    for hour in 0..48 {
        let label = utc().format((MONDAY + hour * 1800) * 1000, &window);
        assert_eq!(label.len(), 5, "unexpected label {label}");
        assert!(days.iter().all(|d| !label.contains(d)));
        assert!(months.iter().all(|m| !label.contains(m)));
    }
}

#[test]
fn title_date_is_the_full_date() {
    assert_eq!(utc().title_date(MONDAY * 1000), "Monday, January 5, 2026");
}

#[test]
fn fixed_offset_shifts_the_wall_clock() {
    let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
    let formatter = TimeFormatter::new(DisplayZone::Fixed(plus_two));
    let label = formatter.format_as((MONDAY + 23 * 3600) * 1000, TimeFormat::DayAndTime);
    assert_eq!(label, "Tue, Jan 6, 01:00");
}

#[test]
fn start_of_day_respects_the_zone() {
    let ts = (MONDAY + 10 * 3600) * 1000;
    assert_eq!(DisplayZone::Utc.start_of_day_ms(ts), Some(MONDAY * 1000));

    let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();
    assert_eq!(
        DisplayZone::Fixed(minus_five).start_of_day_ms(ts),
        Some((MONDAY + 5 * 3600) * 1000)
    );
}

#[test]
fn out_of_range_timestamp_falls_back_to_raw_millis() {
    assert_eq!(utc().format_as(i64::MAX, TimeFormat::TimeOfDay), i64::MAX.to_string());
}
