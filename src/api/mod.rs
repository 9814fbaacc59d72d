//! API module for the watcher dashboard service

pub mod routes;
pub mod types;

use crate::server::AppState;
use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create all API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/public/w/:token/dashboard",
            get(routes::dashboard::watcher_dashboard),
        )
}

/// Create OpenAPI documentation routes
pub fn docs_routes() -> Router<AppState> {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::health_check,
        routes::dashboard::watcher_dashboard,
    ),
    components(schemas(
        types::DashboardResponse,
        types::WorkerEntry,
        types::DashboardAggregates,
        types::HealthCheckResponse,
        crate::persistence::WorkerStatus,
    )),
    tags(
        (name = "dashboard", description = "Public watcher dashboard"),
        (name = "health", description = "Health and monitoring"),
    ),
    info(
        title = "Hashwatch API",
        version = "0.1.0",
        description = "Read-only mining dashboard served to capability-token holders",
        license(
            name = "MIT",
        ),
    ),
)]
struct ApiDoc;
