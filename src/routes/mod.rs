pub mod chart;
pub mod dashboard;
pub mod devices;
pub mod export;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        chart::get_chart,
        chart::get_chart_option,
        chart::get_chart_state,
        chart::reload,
        chart::apply_preset,
        chart::set_window,
        chart::add_device,
        chart::toggle_series,
        devices::list_device_options,
        export::export_csv,
    ),
    components(
        schemas(
            crate::chart::spec::ChartSpec,
            crate::chart::echarts::EChartsConfig,
            crate::chart::model::TimeWindow,
            crate::chart::model::DeviceSelection,
            crate::chart::model::WindowPreset,
            chart::ChartStateResponse,
            chart::SeriesSummary,
            health::HealthResponse,
            crate::services::devices::DeviceOption,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "chart", description = "Chart session: window, devices, toggles and chart specification"),
        (name = "devices", description = "Device picker"),
        (name = "export", description = "CSV export"),
    ),
    info(
        title = "Temperature Chart API",
        description = "Time-series chart and CSV export for temperature sensor readings",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let chart_routes = Router::new()
        .route("/chart", get(chart::get_chart))
        .route("/chart/option", get(chart::get_chart_option))
        .route("/chart/state", get(chart::get_chart_state))
        .route("/chart/reload", post(chart::reload))
        .route("/chart/window", post(chart::set_window))
        .route("/chart/window/{preset}", post(chart::apply_preset))
        .route(
            "/chart/devices",
            get(devices::list_device_options),
        )
        .route("/chart/devices/{device_id}", post(chart::add_device))
        .route("/chart/series/{index}/toggle", post(chart::toggle_series))
        .route("/chart/export.csv", get(export::export_csv))
        .layer(RequestBodyLimitLayer::new(64 * 1024));

    // Health check routes
    let health_routes = Router::new().route("/healthz", get(health::healthz));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    Router::new()
        .route("/", get(dashboard::dashboard))
        .nest("/api", chart_routes)
        .merge(health_routes)
        .merge(docs_routes)
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
