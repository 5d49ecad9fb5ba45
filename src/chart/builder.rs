use crate::chart::day_boundary;
use crate::chart::model::{DeviceSelection, Series, TimeWindow};
use crate::chart::spec::{
    ChartSpec, DayBreakOverlay, GridSpec, LegendSpec, LineDash, LineStyle, LineTrace,
    TimeAxisSpec, TooltipSpec, TracePoint, ValueAxisSpec,
};
use crate::chart::time_format::{TimeFormat, TimeFormatter};

pub const BASE_TITLE: &str = "Temperature Time Series";
pub const DAY_BREAKS_NAME: &str = "Day Breaks";
pub const VALUE_UNIT: &str = "°C";

const X_AXIS_NAME: &str = "Time";
const Y_AXIS_NAME: &str = "Temperature (°C)";
const X_LABEL_ROTATION: i32 = 45;
const DAY_BREAK_COLOR: &str = "#bbb";

/// Composes [`ChartSpec`]s. Holds nothing but the time formatter, so the same
/// inputs always give the same spec.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartBuilder {
    formatter: TimeFormatter,
}

impl ChartBuilder {
    #[must_use]
    pub fn new(formatter: TimeFormatter) -> Self {
        Self { formatter }
    }

    #[must_use]
    pub fn formatter(&self) -> &TimeFormatter {
        &self.formatter
    }

    #[must_use]
    pub fn build(
        &self,
        visible: &[&Series],
        window: &TimeWindow,
        selection: &DeviceSelection,
    ) -> ChartSpec {
        let series: Vec<LineTrace> = visible.iter().map(|s| line_trace(s)).collect();

        let markers = day_boundary::boundaries_for(
            self.formatter.zone(),
            series.iter().flat_map(|t| t.points.iter().map(|p| p.ts_ms)),
        );
        let day_breaks = (!markers.is_empty()).then(|| DayBreakOverlay {
            name: DAY_BREAKS_NAME.to_string(),
            markers_ms: markers,
            line: LineStyle {
                dash: LineDash::Dotted,
                color: DAY_BREAK_COLOR.to_string(),
                width: 1,
            },
            show_label: false,
        });

        let time_format = TimeFormat::for_window(window);

        ChartSpec {
            title: self.title(window, selection),
            tooltip: TooltipSpec {
                time_format,
                value_unit: VALUE_UNIT.to_string(),
            },
            legend: LegendSpec {
                items: series.iter().map(|t| t.name.clone()).collect(),
                toggleable: series.len() > 1,
            },
            x_axis: TimeAxisSpec {
                name: X_AXIS_NAME.to_string(),
                label_rotation: X_LABEL_ROTATION,
                label_format: time_format,
            },
            y_axis: ValueAxisSpec {
                name: Y_AXIS_NAME.to_string(),
            },
            grid: GridSpec::default(),
            series,
            day_breaks,
            replace: true,
        }
    }

    /// Chart title; day views get the date of `window.start` appended.
    #[must_use]
    pub fn title(&self, window: &TimeWindow, selection: &DeviceSelection) -> String {
        let mut title = match selection.device_ids() {
            [] => BASE_TITLE.to_string(),
            [id] => format!("{BASE_TITLE} - Device {id}"),
            _ => format!("{BASE_TITLE} - Multiple Devices"),
        };

        if window.is_day_view() {
            if let Some(start) = window.start {
                title.push_str(" - ");
                title.push_str(&self.formatter.title_date(start.saturating_mul(1000)));
            }
        }
        title
    }
}

fn line_trace(series: &Series) -> LineTrace {
    LineTrace {
        name: series.name.clone(),
        show_symbol: false,
        points: series
            .samples
            .iter()
            .map(|s| TracePoint {
                ts_ms: s.timestamp.saturating_mul(1000),
                value: s.value,
            })
            .collect(),
    }
}
