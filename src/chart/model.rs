use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Seconds in one day; also the day-view threshold for a window span.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// A single reading: `[timestamp_seconds, value]` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSample", into = "RawSample")]
pub struct Sample {
    pub timestamp: i64,
    pub value: f64,
}

impl Sample {
    #[must_use]
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Timestamps may arrive as floats like 1593038703.8
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawSample(f64, f64);

impl From<RawSample> for Sample {
    fn from(raw: RawSample) -> Self {
        Self {
            timestamp: raw.0 as i64,
            value: raw.1,
        }
    }
}

impl From<Sample> for RawSample {
    fn from(sample: Sample) -> Self {
        Self(sample.timestamp as f64, sample.value)
    }
}

/// One device's readings. `name` is the legend key and CSV column header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    #[serde(rename = "data", default)]
    pub samples: Vec<Sample>,
}

impl Series {
    #[must_use]
    pub fn new(name: impl Into<String>, samples: Vec<Sample>) -> Self {
        Self {
            name: name.into(),
            samples,
        }
    }

    /// Build a series from `(timestamp_seconds, value)` pairs.
    #[must_use]
    pub fn from_pairs(name: impl Into<String>, pairs: &[(i64, f64)]) -> Self {
        Self::new(
            name,
            pairs.iter().map(|&(ts, v)| Sample::new(ts, v)).collect(),
        )
    }

    /// Value of the first sample whose timestamp equals `timestamp`.
    #[must_use]
    pub fn value_at(&self, timestamp: i64) -> Option<f64> {
        self.samples
            .iter()
            .find(|s| s.timestamp == timestamp)
            .map(|s| s.value)
    }
}

/// Requested time range in epoch seconds. `None` bounds defer to the backend default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TimeWindow {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl TimeWindow {
    #[must_use]
    pub fn new(start: Option<i64>, end: Option<i64>) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn between(start: i64, end: i64) -> Self {
        Self::new(Some(start), Some(end))
    }

    /// True when both bounds are set and the span is at most one day.
    #[must_use]
    pub fn is_day_view(&self) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => end - start <= SECONDS_PER_DAY,
            _ => false,
        }
    }
}

/// Preset window buttons. Each one ends at the wall-clock time it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WindowPreset {
    Day,
    Week,
    Month,
}

impl WindowPreset {
    #[must_use]
    pub fn span_seconds(self) -> i64 {
        match self {
            Self::Day => SECONDS_PER_DAY,
            Self::Week => 7 * SECONDS_PER_DAY,
            Self::Month => 30 * SECONDS_PER_DAY,
        }
    }

    #[must_use]
    pub fn window_ending_at(self, now: i64) -> TimeWindow {
        TimeWindow::between(now - self.span_seconds(), now)
    }
}

/// Which devices were requested from the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "mode", content = "device_ids", rename_all = "snake_case")]
pub enum DeviceSelection {
    /// No device filter; visibility is driven by per-series toggles.
    #[default]
    AllWithToggle,
    /// The backend was asked for these ids only; every returned series is shown.
    ExplicitSet(Vec<i64>),
}

impl DeviceSelection {
    #[must_use]
    pub fn device_ids(&self) -> &[i64] {
        match self {
            Self::AllWithToggle => &[],
            Self::ExplicitSet(ids) => ids,
        }
    }

    #[must_use]
    pub fn uses_toggles(&self) -> bool {
        matches!(self, Self::AllWithToggle)
    }

    /// Selection after the "add device" action. Already-present ids are kept as is.
    #[must_use]
    pub fn with_device(&self, device_id: i64) -> Self {
        let mut ids = self.device_ids().to_vec();
        if !ids.contains(&device_id) {
            ids.push(device_id);
        }
        Self::ExplicitSet(ids)
    }
}
