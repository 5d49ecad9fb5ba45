//! Unit tests for chart specification building and the ECharts adapter.
//!
//! Run with: cargo test --test chart_builder_test

use temperature_chart::chart::builder::{BASE_TITLE, DAY_BREAKS_NAME};
use chrono::FixedOffset;
use temperature_chart::chart::echarts::to_echarts;
use temperature_chart::chart::spec::LineDash;
use temperature_chart::chart::{
    ChartBuilder, DeviceSelection, DisplayZone, Series, TimeFormat, TimeFormatter, TimeWindow,
};

/// Monday 2026-01-05 00:00:00 UTC
const MONDAY: i64 = 1_767_571_200;

fn builder() -> ChartBuilder {
    ChartBuilder::new(TimeFormatter::new(DisplayZone::Utc))
}

fn kitchen() -> Series {
    Series::from_pairs("Kitchen", &[(MONDAY + 3600, 20.5), (MONDAY + 7200, 21.0)])
}

fn bedroom() -> Series {
    Series::from_pairs("Bedroom", &[(MONDAY + 3600, 18.0)])
}

#[test]
fn converts_seconds_to_millis_and_hides_symbols() {
    let series = kitchen();
    let spec = builder().build(&[&series], &TimeWindow::default(), &DeviceSelection::AllWithToggle);

    assert_eq!(spec.series.len(), 1);
    let trace = &spec.series[0];
    assert_eq!(trace.name, "Kitchen");
    assert!(!trace.show_symbol);
    assert_eq!(trace.points[0].ts_ms, (MONDAY + 3600) * 1000);
    assert_eq!(trace.points[1].value, 21.0);
    assert!(spec.replace);
}

#[test]
fn single_series_legend_is_not_toggleable() {
    let series = kitchen();
    let spec = builder().build(&[&series], &TimeWindow::default(), &DeviceSelection::AllWithToggle);
    assert!(!spec.legend.toggleable);
    assert_eq!(spec.legend.items, vec!["Kitchen".to_string()]);
}

#[test]
fn multi_series_legend_is_toggleable_in_visible_order() {
    let (a, b) = (kitchen(), bedroom());
    let spec = builder().build(&[&b, &a], &TimeWindow::default(), &DeviceSelection::AllWithToggle);
    assert!(spec.legend.toggleable);
    assert_eq!(spec.legend.items, vec!["Bedroom".to_string(), "Kitchen".to_string()]);
}

#[test]
fn title_reflects_device_selection() {
    let window = TimeWindow::between(MONDAY, MONDAY + 7 * 86_400);
    let b = builder();

    assert_eq!(b.title(&window, &DeviceSelection::AllWithToggle), BASE_TITLE);
    assert_eq!(
        b.title(&window, &DeviceSelection::ExplicitSet(vec![7])),
        "Temperature Time Series - Device 7"
    );
    assert_eq!(
        b.title(&window, &DeviceSelection::ExplicitSet(vec![7, 9])),
        "Temperature Time Series - Multiple Devices"
    );
}

#[test]
fn day_view_title_appends_the_start_date() {
    let window = TimeWindow::between(MONDAY + 3600, MONDAY + 3600 + 86_400);
    let title = builder().title(&window, &DeviceSelection::ExplicitSet(vec![7]));
    assert_eq!(title, "Temperature Time Series - Device 7 - Monday, January 5, 2026");
}

#[test]
fn explicit_single_device_spec() {
    let series = kitchen();
    let spec = builder().build(
        &[&series],
        &TimeWindow::default(),
        &DeviceSelection::ExplicitSet(vec![7]),
    );
    assert!(spec.title.contains("Device 7"));
    assert!(!spec.legend.toggleable);
}

#[test]
fn axis_labels_follow_the_window() {
    let series = kitchen();
    let day = builder().build(
        &[&series],
        &TimeWindow::between(MONDAY, MONDAY + 43_200),
        &DeviceSelection::AllWithToggle,
    );
    assert_eq!(day.x_axis.label_format, TimeFormat::TimeOfDay);
    assert_eq!(day.x_axis.label_rotation, 45);
    assert_eq!(day.y_axis.name, "Temperature (°C)");

    let week = builder().build(
        &[&series],
        &TimeWindow::between(MONDAY, MONDAY + 7 * 86_400),
        &DeviceSelection::AllWithToggle,
    );
    assert_eq!(week.x_axis.label_format, TimeFormat::DayAndTime);
    assert_eq!(week.tooltip.time_format, TimeFormat::DayAndTime);
}

#[test]
fn same_day_data_has_no_day_breaks() {
    let series = kitchen();
    let spec = builder().build(
        &[&series],
        &TimeWindow::between(MONDAY, MONDAY + 43_200),
        &DeviceSelection::AllWithToggle,
    );
    assert!(spec.day_breaks.is_none());
}

#[test]
fn multi_day_data_gets_a_dotted_overlay() {
    let a = Series::from_pairs("A", &[(MONDAY + 3600, 20.0)]);
    let b = Series::from_pairs("B", &[(MONDAY + 2 * 86_400 + 3600, 21.0)]);
    let spec = builder().build(&[&a, &b], &TimeWindow::default(), &DeviceSelection::AllWithToggle);

    let overlay = spec.day_breaks.expect("day breaks expected");
    assert_eq!(overlay.name, DAY_BREAKS_NAME);
    assert_eq!(
        overlay.markers_ms,
        vec![(MONDAY + 86_400) * 1000, (MONDAY + 2 * 86_400) * 1000]
    );
    assert_eq!(overlay.line.dash, LineDash::Dotted);
    assert_eq!(overlay.line.color, "#bbb");
    assert_eq!(overlay.line.width, 1);
    assert!(!overlay.show_label);
    assert!(!spec.legend.items.contains(&DAY_BREAKS_NAME.to_string()));
}

#[test]
fn building_twice_gives_identical_specs() {
    let (a, b) = (kitchen(), bedroom());
    let window = TimeWindow::between(MONDAY, MONDAY + 86_400);
    let selection = DeviceSelection::AllWithToggle;
    assert_eq!(
        builder().build(&[&a, &b], &window, &selection),
        builder().build(&[&a, &b], &window, &selection)
    );
}

#[test]
fn empty_selection_builds_an_empty_chart() {
    let spec = builder().build(&[], &TimeWindow::default(), &DeviceSelection::AllWithToggle);
    assert!(spec.series.is_empty());
    assert!(spec.day_breaks.is_none());
    assert!(!spec.legend.toggleable);
}

#[test]
fn tooltip_lists_time_then_each_series() {
    let series = kitchen();
    let b = builder();
    let spec = b.build(
        &[&series],
        &TimeWindow::between(MONDAY, MONDAY + 86_400),
        &DeviceSelection::AllWithToggle,
    );
    let lines = spec.tooltip.lines(
        b.formatter(),
        (MONDAY + 3600) * 1000,
        &[("Kitchen", 20.5), ("Bedroom", 18.0)],
    );
    assert_eq!(lines, vec!["01:00", "Kitchen: 20.5 °C", "Bedroom: 18 °C"]);
}

#[test]
fn echarts_option_carries_overlay_and_replace_flag() {
    let a = Series::from_pairs("A", &[(MONDAY + 3600, 20.0)]);
    let b = Series::from_pairs("B", &[(MONDAY + 86_400 + 3600, 21.0)]);
    let spec = builder().build(&[&a, &b], &TimeWindow::default(), &DeviceSelection::AllWithToggle);
    let config = to_echarts(&spec, DisplayZone::Utc);

    assert!(config.not_merge);
    assert_eq!(config.value_unit, "°C");
    assert_eq!(config.tooltip_time_template, "{ee}, {MMM} {d}, {HH}:{mm}");

    let option = &config.option;
    assert_eq!(option["useUTC"], true);
    assert_eq!(config.utc_offset, "+00:00");
    assert_eq!(option["xAxis"]["type"], "time");
    assert_eq!(option["xAxis"]["axisLabel"]["rotate"], 45);
    assert_eq!(option["legend"]["selectedMode"], true);
    assert_eq!(option["grid"]["top"], 200);

    let series = option["series"].as_array().unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series[0]["data"][0][0], (MONDAY + 3600) * 1000);
    assert_eq!(series[0]["showSymbol"], false);

    let overlay = &series[2];
    assert_eq!(overlay["name"], DAY_BREAKS_NAME);
    assert_eq!(overlay["data"].as_array().unwrap().len(), 0);
    assert_eq!(overlay["markLine"]["data"][0]["xAxis"], (MONDAY + 86_400) * 1000);
    assert_eq!(overlay["markLine"]["lineStyle"]["type"], "dotted");
}

#[test]
fn echarts_option_is_drawn_in_the_display_zone() {
    let tokyo = DisplayZone::Fixed(FixedOffset::east_opt(9 * 3600).unwrap());
    let builder = ChartBuilder::new(TimeFormatter::new(tokyo));
    // 14:00 UTC on Monday is 23:00 in Tokyo; 16:00 UTC is 01:00 on Tuesday.
    let a = Series::from_pairs("A", &[(MONDAY + 14 * 3600, 20.0)]);
    let b = Series::from_pairs("B", &[(MONDAY + 16 * 3600, 21.0)]);
    let spec = builder.build(&[&a, &b], &TimeWindow::default(), &DeviceSelection::AllWithToggle);

    let tokyo_midnight_ms = (MONDAY + 15 * 3600) * 1000;
    assert_eq!(spec.day_breaks.as_ref().unwrap().markers_ms, vec![tokyo_midnight_ms]);
    assert_eq!(spec.series[0].points[0].ts_ms, (MONDAY + 14 * 3600) * 1000);

    let config = to_echarts(&spec, tokyo);
    let option = &config.option;
    assert_eq!(option["useUTC"], true);
    assert_eq!(config.utc_offset, "+09:00");

    let shift = 9 * 3600 * 1000;
    let series = option["series"].as_array().unwrap();
    assert_eq!(series[0]["data"][0][0], (MONDAY + 14 * 3600) * 1000 + shift);
    // The day-break line sits at 00:00 on the UTC-read axis.
    let marker = series[2]["markLine"]["data"][0]["xAxis"].as_i64().unwrap();
    assert_eq!(marker, tokyo_midnight_ms + shift);
    assert_eq!(marker.rem_euclid(86_400_000), 0);
}

#[test]
fn negative_offsets_are_labelled() {
    let zone = DisplayZone::Fixed(FixedOffset::west_opt(5 * 3600 + 1800).unwrap());
    let series = kitchen();
    let spec = builder().build(&[&series], &TimeWindow::default(), &DeviceSelection::AllWithToggle);
    let config = to_echarts(&spec, zone);
    assert_eq!(config.utc_offset, "-05:30");
    assert_eq!(
        config.option["series"][0]["data"][0][0],
        (MONDAY + 3600 - 5 * 3600 - 1800) * 1000
    );
}
