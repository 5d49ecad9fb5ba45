//! Time-series presentation and export.
//!
//! Raw per-device samples flow through [`store::SeriesStore`], are filtered by
//! [`selector::visible_series`], and end up either as a [`spec::ChartSpec`]
//! from [`builder::ChartBuilder`] or as CSV text from [`csv_export::export_csv`].

pub mod builder;
pub mod csv_export;
pub mod day_boundary;
pub mod echarts;
pub mod model;
pub mod selector;
pub mod spec;
pub mod store;
pub mod time_format;

pub use builder::ChartBuilder;
pub use model::{DeviceSelection, Sample, Series, TimeWindow, WindowPreset};
pub use spec::ChartSpec;
pub use store::{ChartState, SeriesStore};
pub use time_format::{DisplayZone, TimeFormat, TimeFormatter};
