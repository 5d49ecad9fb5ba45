use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::common::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Generation of the loaded chart data; 0 until the first successful load.
    pub generation: u64,
    pub series: usize,
}

/// Liveness and chart session summary
///
/// Always 200 while the service runs. The temperature API is not contacted,
/// so an unreachable backend shows up as a generation that stops advancing.
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse),
    ),
    tag = "health"
)]
pub async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    let snapshot = state.store.snapshot().await;
    Json(HealthResponse {
        status: "ok",
        generation: snapshot.generation(),
        series: snapshot.series().len(),
    })
}
