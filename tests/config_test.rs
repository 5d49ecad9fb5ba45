//! Unit tests for environment value parsing.
//!
//! Run with: cargo test --test config_test

use chrono::FixedOffset;
use temperature_chart::chart::DisplayZone;
use temperature_chart::config::{parse_device_ids, parse_display_zone, ConfigError};

#[test]
fn named_zones() {
    assert_eq!(parse_display_zone("local").unwrap(), DisplayZone::Local);
    assert_eq!(parse_display_zone("").unwrap(), DisplayZone::Local);
    assert_eq!(parse_display_zone("UTC").unwrap(), DisplayZone::Utc);
    assert_eq!(parse_display_zone("z").unwrap(), DisplayZone::Utc);
}

#[test]
fn fixed_offsets() {
    assert_eq!(
        parse_display_zone("+02:00").unwrap(),
        DisplayZone::Fixed(FixedOffset::east_opt(7200).unwrap())
    );
    assert_eq!(
        parse_display_zone(" -05:30 ").unwrap(),
        DisplayZone::Fixed(FixedOffset::west_opt(5 * 3600 + 1800).unwrap())
    );
}

#[test]
fn bad_zones_name_the_variable() {
    for raw in ["Europe/Zurich", "+2", "+02:75", "+99:00"] {
        match parse_display_zone(raw) {
            Err(ConfigError::Invalid(var, _)) => assert_eq!(var, "DISPLAY_TIMEZONE"),
            other => panic!("{raw}: expected Invalid, got {other:?}"),
        }
    }
}

#[test]
fn device_id_lists() {
    assert_eq!(parse_device_ids("3, 1,7").unwrap(), vec![3, 1, 7]);
    assert_eq!(parse_device_ids("").unwrap(), Vec::<i64>::new());
    assert_eq!(parse_device_ids("4,,").unwrap(), vec![4]);
    assert!(matches!(
        parse_device_ids("1,two"),
        Err(ConfigError::Invalid("INITIAL_DEVICE_IDS", _))
    ));
}

#[test]
fn offset_parts_must_be_two_unsigned_digits() {
    for raw in ["+-05:00", "+05:-30", "-+01:00", "+5:30", "+24:00", "+05: 30"] {
        assert!(
            matches!(parse_display_zone(raw), Err(ConfigError::Invalid(_, _))),
            "{raw} should be rejected"
        );
    }
    assert_eq!(
        parse_display_zone("+23:59").unwrap(),
        DisplayZone::Fixed(FixedOffset::east_opt(23 * 3600 + 59 * 60).unwrap())
    );
}
