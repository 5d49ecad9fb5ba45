//! ECharts adapter for [`ChartSpec`].
//!
//! ECharts cannot receive functions over JSON, so time labels travel as
//! ECharts time templates and the page installs the tooltip formatter from
//! [`EChartsConfig::tooltip_time_template`].
//!
//! ECharts only knows the browser's zone and UTC. Every timestamp in the
//! option is therefore shifted to the display zone's wall clock and the option
//! sets `useUTC`, so ticks and tooltips read the same as titles, day breaks
//! and CSV rows whatever zone the browser is in.

use serde::Serialize;
use serde_json::{json, Value};
use utoipa::ToSchema;

use crate::chart::spec::ChartSpec;
use crate::chart::time_format::{DisplayZone, TimeFormat};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EChartsConfig {
    #[schema(value_type = Object)]
    pub option: Value,
    /// Passed as `setOption(option, notMerge)`.
    pub not_merge: bool,
    pub tooltip_time_template: String,
    pub value_unit: String,
    /// Offset of the display zone at the latest plotted instant, e.g. `+09:00`.
    pub utc_offset: String,
}

/// ECharts time template matching a [`TimeFormat`].
#[must_use]
pub fn time_template(format: TimeFormat) -> &'static str {
    match format {
        TimeFormat::TimeOfDay => "{HH}:{mm}",
        TimeFormat::DayAndTime => "{ee}, {MMM} {d}, {HH}:{mm}",
    }
}

#[must_use]
pub fn to_echarts(spec: &ChartSpec, zone: DisplayZone) -> EChartsConfig {
    let mut series: Vec<Value> = spec
        .series
        .iter()
        .map(|trace| {
            let data: Vec<(i64, f64)> = trace
                .points
                .iter()
                .map(|p| (zone.wall_clock_ms(p.ts_ms), p.value))
                .collect();
            json!({
                "name": trace.name,
                "type": "line",
                "showSymbol": trace.show_symbol,
                "data": data,
            })
        })
        .collect();

    if let Some(breaks) = &spec.day_breaks {
        let line_style = json!({
            "type": breaks.line.dash.as_str(),
            "color": breaks.line.color,
            "width": breaks.line.width,
        });
        let marks: Vec<Value> = breaks
            .markers_ms
            .iter()
            .map(|ts| {
                json!({
                    "xAxis": zone.wall_clock_ms(*ts),
                    "lineStyle": line_style,
                    "label": { "show": breaks.show_label },
                })
            })
            .collect();

        series.push(json!({
            "name": breaks.name,
            "type": "line",
            "showSymbol": false,
            "showLine": false,
            "data": [],
            "markLine": {
                "symbol": "none",
                "data": marks,
                "lineStyle": line_style,
                "label": { "show": breaks.show_label },
            },
        }));
    }

    let option = json!({
        "useUTC": true,
        "title": { "text": spec.title, "top": 0 },
        "tooltip": { "trigger": "axis" },
        "legend": {
            "data": spec.legend.items,
            "top": 40,
            "selectedMode": spec.legend.toggleable,
        },
        "grid": {
            "top": spec.grid.top,
            "left": spec.grid.left,
            "right": spec.grid.right,
            "bottom": spec.grid.bottom,
        },
        "xAxis": {
            "type": "time",
            "name": spec.x_axis.name,
            "axisLabel": {
                "rotate": spec.x_axis.label_rotation,
                "formatter": time_template(spec.x_axis.label_format),
            },
        },
        "yAxis": {
            "type": "value",
            "name": spec.y_axis.name,
        },
        "series": series,
    });

    EChartsConfig {
        option,
        not_merge: spec.replace,
        tooltip_time_template: time_template(spec.tooltip.time_format).to_string(),
        value_unit: spec.tooltip.value_unit.clone(),
        utc_offset: utc_offset(spec, zone),
    }
}

fn utc_offset(spec: &ChartSpec, zone: DisplayZone) -> String {
    let latest = spec
        .series
        .iter()
        .flat_map(|trace| trace.points.iter().map(|p| p.ts_ms))
        .max()
        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis());
    let seconds = zone.offset_ms(latest) / 1000;
    let sign = if seconds < 0 { '-' } else { '+' };
    let seconds = seconds.abs();
    format!("{sign}{:02}:{:02}", seconds / 3600, seconds % 3600 / 60)
}
