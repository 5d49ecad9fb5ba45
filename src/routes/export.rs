use axum::{
    extract::State,
    http::header,
    response::Response,
};

use crate::chart::csv_export::{self, CSV_CONTENT_TYPE, CSV_FILE_NAME};
use crate::chart::selector::visible_series;
use crate::common::AppState;
use crate::error::{AppError, AppResult};

/// Download the visible series as CSV
///
/// One row per distinct timestamp across the visible series; missing values
/// are empty cells.
#[utoipa::path(
    get,
    path = "/api/chart/export.csv",
    responses(
        (status = 200, description = "CSV attachment", content_type = "text/csv", body = String),
        (status = 422, description = "No visible series to export"),
    ),
    tag = "export"
)]
pub async fn export_csv(State(state): State<AppState>) -> AppResult<Response> {
    let snapshot = state.store.snapshot().await;
    let visible = visible_series(&snapshot);
    let csv = csv_export::export_csv(state.formatter(), &visible, &snapshot.window())?;

    tracing::info!(
        series = visible.len(),
        bytes = csv.len(),
        "csv_export"
    );

    Response::builder()
        .header(
            header::CONTENT_TYPE,
            format!("{CSV_CONTENT_TYPE}; charset=utf-8"),
        )
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{CSV_FILE_NAME}\""),
        )
        .body(axum::body::Body::from(csv))
        .map_err(|e| AppError::Internal(e.to_string()))
}
