use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::chart::echarts::{self, EChartsConfig};
use crate::chart::model::{DeviceSelection, TimeWindow, WindowPreset};
use crate::chart::selector::visible_series;
use crate::chart::spec::ChartSpec;
use crate::chart::store::ChartState;
use crate::common::AppState;
use crate::error::AppResult;

#[derive(Debug, Serialize, ToSchema)]
pub struct SeriesSummary {
    pub index: usize,
    pub name: String,
    /// Always true for an explicit device selection.
    pub visible: bool,
    pub samples: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChartStateResponse {
    pub window: TimeWindow,
    pub selection: DeviceSelection,
    /// Whether per-series toggles apply
    pub toggles_enabled: bool,
    pub series: Vec<SeriesSummary>,
    pub record_count: usize,
    pub generation: u64,
}

impl From<&ChartState> for ChartStateResponse {
    fn from(state: &ChartState) -> Self {
        let toggles_enabled = state.selection().uses_toggles();
        let series = state
            .series()
            .iter()
            .enumerate()
            .map(|(index, s)| SeriesSummary {
                index,
                name: s.name.clone(),
                visible: !toggles_enabled || state.toggles().get(index).copied().unwrap_or(true),
                samples: s.samples.len(),
            })
            .collect();

        Self {
            window: state.window(),
            selection: state.selection().clone(),
            toggles_enabled,
            series,
            record_count: state.record_count(),
            generation: state.generation(),
        }
    }
}

/// Build the library-neutral spec for the current session state.
pub async fn current_spec(state: &AppState) -> ChartSpec {
    let snapshot = state.store.snapshot().await;
    state.builder.build(
        &visible_series(&snapshot),
        &snapshot.window(),
        snapshot.selection(),
    )
}

/// Chart specification for the current state
#[utoipa::path(
    get,
    path = "/api/chart",
    responses(
        (status = 200, description = "Chart specification", body = ChartSpec),
    ),
    tag = "chart"
)]
pub async fn get_chart(State(state): State<AppState>) -> Json<ChartSpec> {
    Json(current_spec(&state).await)
}

/// ECharts option for the current state
#[utoipa::path(
    get,
    path = "/api/chart/option",
    responses(
        (status = 200, description = "ECharts configuration", body = EChartsConfig),
    ),
    tag = "chart"
)]
pub async fn get_chart_option(State(state): State<AppState>) -> Json<EChartsConfig> {
    let spec = current_spec(&state).await;
    Json(echarts::to_echarts(&spec, state.formatter().zone()))
}

/// Loaded series, toggles, window and selection
#[utoipa::path(
    get,
    path = "/api/chart/state",
    responses(
        (status = 200, description = "Session state", body = ChartStateResponse),
    ),
    tag = "chart"
)]
pub async fn get_chart_state(State(state): State<AppState>) -> Json<ChartStateResponse> {
    let snapshot = state.store.snapshot().await;
    Json(ChartStateResponse::from(snapshot.as_ref()))
}

/// Refetch with the most recently requested window and selection
///
/// Also drops the cached device list so the picker sees new devices.
#[utoipa::path(
    post,
    path = "/api/chart/reload",
    responses(
        (status = 200, description = "Series reloaded", body = ChartStateResponse),
        (status = 502, description = "Temperature API unavailable"),
    ),
    tag = "chart"
)]
pub async fn reload(State(state): State<AppState>) -> AppResult<Json<ChartStateResponse>> {
    state.devices.invalidate().await;
    let snapshot = state.store.reload().await?;
    Ok(Json(ChartStateResponse::from(snapshot.as_ref())))
}

/// Switch to a preset window ending now
#[utoipa::path(
    post,
    path = "/api/chart/window/{preset}",
    params(
        ("preset" = WindowPreset, Path, description = "day, week or month"),
    ),
    responses(
        (status = 200, description = "Window applied", body = ChartStateResponse),
        (status = 400, description = "Unknown preset"),
        (status = 502, description = "Temperature API unavailable"),
    ),
    tag = "chart"
)]
pub async fn apply_preset(
    State(state): State<AppState>,
    Path(preset): Path<WindowPreset>,
) -> AppResult<Json<ChartStateResponse>> {
    let now = chrono::Utc::now().timestamp();
    tracing::info!(?preset, now, "Applying window preset");
    let snapshot = state.store.apply_preset(preset, now).await?;
    Ok(Json(ChartStateResponse::from(snapshot.as_ref())))
}

/// Switch to a custom window
#[utoipa::path(
    post,
    path = "/api/chart/window",
    request_body = TimeWindow,
    responses(
        (status = 200, description = "Window applied", body = ChartStateResponse),
        (status = 400, description = "end is not after start"),
        (status = 502, description = "Temperature API unavailable"),
    ),
    tag = "chart"
)]
pub async fn set_window(
    State(state): State<AppState>,
    Json(window): Json<TimeWindow>,
) -> AppResult<Json<ChartStateResponse>> {
    let snapshot = state.store.set_window(window).await?;
    Ok(Json(ChartStateResponse::from(snapshot.as_ref())))
}

/// Add a device to the chart
#[utoipa::path(
    post,
    path = "/api/chart/devices/{device_id}",
    params(
        ("device_id" = i64, Path, description = "Backend device id"),
    ),
    responses(
        (status = 200, description = "Device added", body = ChartStateResponse),
        (status = 502, description = "Temperature API unavailable"),
    ),
    tag = "chart"
)]
pub async fn add_device(
    State(state): State<AppState>,
    Path(device_id): Path<i64>,
) -> AppResult<Json<ChartStateResponse>> {
    let snapshot = state.store.add_device(device_id).await?;
    Ok(Json(ChartStateResponse::from(snapshot.as_ref())))
}

/// Show or hide one series
#[utoipa::path(
    post,
    path = "/api/chart/series/{index}/toggle",
    params(
        ("index" = usize, Path, description = "Series position in fetch order"),
    ),
    responses(
        (status = 200, description = "Toggle flipped", body = ChartStateResponse),
        (status = 400, description = "Devices are selected explicitly"),
        (status = 404, description = "No series at this index"),
    ),
    tag = "chart"
)]
pub async fn toggle_series(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> AppResult<Json<ChartStateResponse>> {
    let snapshot = state.store.toggle(index).await?;
    Ok(Json(ChartStateResponse::from(snapshot.as_ref())))
}
