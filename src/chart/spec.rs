//! Library-neutral chart description.
//!
//! A [`ChartSpec`] says what to draw, not how: it carries no charting-library
//! types. Adapters such as [`crate::chart::echarts`] translate it for a
//! concrete engine. A spec always replaces the previous one in full.

use serde::{Serialize, Serializer};
use utoipa::ToSchema;

use crate::chart::time_format::{TimeFormat, TimeFormatter};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChartSpec {
    pub title: String,
    pub tooltip: TooltipSpec,
    pub legend: LegendSpec,
    pub x_axis: TimeAxisSpec,
    pub y_axis: ValueAxisSpec,
    pub grid: GridSpec,
    pub series: Vec<LineTrace>,
    /// Dotted vertical markers at local midnights; `None` when the data spans a single day.
    pub day_breaks: Option<DayBreakOverlay>,
    /// The render target must discard its previous configuration.
    pub replace: bool,
}

/// Hover readout: a time label, then one `name: value unit` line per series.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TooltipSpec {
    pub time_format: TimeFormat,
    pub value_unit: String,
}

impl TooltipSpec {
    /// Lines shown for a hovered instant. `entries` come in the order the
    /// engine reports them, which is the order of the visible series.
    #[must_use]
    pub fn lines(
        &self,
        formatter: &TimeFormatter,
        ts_ms: i64,
        entries: &[(&str, f64)],
    ) -> Vec<String> {
        let mut lines = Vec::with_capacity(entries.len() + 1);
        lines.push(formatter.format_as(ts_ms, self.time_format));
        for (name, value) in entries {
            lines.push(format!("{name}: {value} {}", self.value_unit));
        }
        lines
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LegendSpec {
    pub items: Vec<String>,
    /// Clicking a legend item hides its series. Off for a lone series.
    pub toggleable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TimeAxisSpec {
    pub name: String,
    pub label_rotation: i32,
    pub label_format: TimeFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ValueAxisSpec {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct GridSpec {
    pub top: u32,
    pub left: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            top: 200,
            left: 100,
            right: 100,
            bottom: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LineTrace {
    pub name: String,
    pub show_symbol: bool,
    /// `[timestamp_ms, value]` pairs
    #[schema(value_type = Vec<Vec<f64>>)]
    pub points: Vec<TracePoint>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracePoint {
    pub ts_ms: i64,
    pub value: f64,
}

impl Serialize for TracePoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.ts_ms, self.value).serialize(serializer)
    }
}

/// Zero-data overlay carrying the day-boundary lines. Never listed in the legend.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DayBreakOverlay {
    pub name: String,
    pub markers_ms: Vec<i64>,
    pub line: LineStyle,
    pub show_label: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LineStyle {
    pub dash: LineDash,
    pub color: String,
    pub width: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LineDash {
    Solid,
    Dotted,
}

impl LineDash {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dotted => "dotted",
        }
    }
}
