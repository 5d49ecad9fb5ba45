use axum::{extract::State, Json};

use crate::common::AppState;
use crate::services::devices::DeviceOption;

/// Devices that can still be added to the chart
///
/// Excludes devices already selected and sorts by name. Degrades to an empty
/// list when the temperature API cannot be reached.
#[utoipa::path(
    get,
    path = "/api/chart/devices",
    responses(
        (status = 200, description = "Picker options", body = Vec<DeviceOption>),
    ),
    tag = "devices"
)]
pub async fn list_device_options(State(state): State<AppState>) -> Json<Vec<DeviceOption>> {
    let snapshot = state.store.snapshot().await;
    Json(state.devices.options(snapshot.selection().device_ids()).await)
}
