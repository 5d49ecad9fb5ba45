//! Human-readable time labels for axis ticks, tooltips, CSV rows and titles.
//!
//! Labels adapt to the active window: a day view shows only the time of day,
//! anything longer brings the weekday and date back.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::chart::model::TimeWindow;

/// Zone used for "local" wall-clock rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayZone {
    /// The host's zone, DST-aware.
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl DisplayZone {
    /// Resolve an epoch-millisecond timestamp in this zone.
    #[must_use]
    pub fn datetime(self, ts_ms: i64) -> Option<DateTime<FixedOffset>> {
        match self {
            Self::Local => Local
                .timestamp_millis_opt(ts_ms)
                .single()
                .map(|dt| dt.with_timezone(&dt.offset().fix())),
            Self::Utc => Utc
                .timestamp_millis_opt(ts_ms)
                .single()
                .map(|dt| dt.with_timezone(&dt.offset().fix())),
            Self::Fixed(offset) => offset.timestamp_millis_opt(ts_ms).single(),
        }
    }

    /// Offset from UTC at `ts_ms`, in milliseconds. DST-aware for [`DisplayZone::Local`].
    #[must_use]
    pub fn offset_ms(self, ts_ms: i64) -> i64 {
        self.datetime(ts_ms)
            .map_or(0, |dt| i64::from(dt.offset().local_minus_utc()) * 1000)
    }

    /// `ts_ms` shifted so that reading it as UTC gives the wall-clock time in this zone.
    #[must_use]
    pub fn wall_clock_ms(self, ts_ms: i64) -> i64 {
        ts_ms + self.offset_ms(ts_ms)
    }

    /// Epoch milliseconds of local midnight on the day containing `ts_ms`.
    #[must_use]
    pub fn start_of_day_ms(self, ts_ms: i64) -> Option<i64> {
        let midnight = self.datetime(ts_ms)?.date_naive().and_hms_opt(0, 0, 0)?;
        self.resolve_local(&midnight)
    }

    fn resolve_local(self, naive: &NaiveDateTime) -> Option<i64> {
        match self {
            // Midnight can fall inside a DST gap; the first valid instant after it is used.
            Self::Local => Local
                .from_local_datetime(naive)
                .earliest()
                .or_else(|| {
                    Local
                        .from_local_datetime(&(*naive + TimeDelta::hours(1)))
                        .earliest()
                })
                .map(|dt| dt.timestamp_millis()),
            Self::Utc => Some(naive.and_utc().timestamp_millis()),
            Self::Fixed(offset) => offset
                .from_local_datetime(naive)
                .single()
                .map(|dt| dt.timestamp_millis()),
        }
    }
}

/// Label layout chosen from the window span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    /// `14:30`
    TimeOfDay,
    /// `Mon, Jan 5, 14:30`
    DayAndTime,
}

impl TimeFormat {
    #[must_use]
    pub fn for_window(window: &TimeWindow) -> Self {
        if window.is_day_view() {
            Self::TimeOfDay
        } else {
            Self::DayAndTime
        }
    }

    #[must_use]
    pub fn strftime(self) -> &'static str {
        match self {
            Self::TimeOfDay => "%H:%M",
            Self::DayAndTime => "%a, %b %-d, %H:%M",
        }
    }
}

const TITLE_DATE_FORMAT: &str = "%A, %B %-d, %Y";

#[derive(Debug, Clone, Copy, Default)]
pub struct TimeFormatter {
    zone: DisplayZone,
}

impl TimeFormatter {
    #[must_use]
    pub fn new(zone: DisplayZone) -> Self {
        Self { zone }
    }

    #[must_use]
    pub fn zone(&self) -> DisplayZone {
        self.zone
    }

    /// Label for `ts_ms` given the active window.
    #[must_use]
    pub fn format(&self, ts_ms: i64, window: &TimeWindow) -> String {
        self.format_as(ts_ms, TimeFormat::for_window(window))
    }

    #[must_use]
    pub fn format_as(&self, ts_ms: i64, format: TimeFormat) -> String {
        self.render(ts_ms, format.strftime())
    }

    /// Full date for chart titles, e.g. `Monday, January 5, 2026`.
    #[must_use]
    pub fn title_date(&self, ts_ms: i64) -> String {
        self.render(ts_ms, TITLE_DATE_FORMAT)
    }

    fn render(&self, ts_ms: i64, pattern: &str) -> String {
        match self.zone.datetime(ts_ms) {
            Some(dt) => dt.format(pattern).to_string(),
            None => ts_ms.to_string(),
        }
    }
}
