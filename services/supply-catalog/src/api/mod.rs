//! HTTP 接口层

mod entities;
mod health;
mod params;

pub use entities::{entity_routes, related_entity_routes};
pub use health::{HealthResponse, ReadinessResponse, ServiceCheck};

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use catalog_errors::AppResult;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

use crate::application::{CatalogService, CompanyService};
use crate::domain::repositories::InitOutcome;

/// 组装完整路由
pub fn router(catalog: CatalogService, metrics: Option<PrometheusHandle>) -> Router {
    let company = Router::new()
        .route("/company/init", post(initialize_company))
        .route("/ready", get(health::readiness_check))
        .with_state(catalog.company);

    let observability = Router::new()
        .route("/metrics", get(health::render_metrics))
        .with_state(metrics);

    Router::new()
        .nest("/products", related_entity_routes(catalog.products))
        .nest("/materials", related_entity_routes(catalog.materials))
        .nest("/suppliers", entity_routes(catalog.suppliers))
        .nest("/certs", entity_routes(catalog.certs))
        .merge(company)
        .merge(observability)
        .route("/health", get(health::health_check))
        .layer(TraceLayer::new_for_http())
}

/// 首次创建返回 201，重复调用返回 200
async fn initialize_company(
    State(company): State<CompanyService>,
) -> AppResult<(StatusCode, Json<String>)> {
    let status = match company.initialize().await? {
        InitOutcome::Created => StatusCode::CREATED,
        InitOutcome::AlreadyExists => StatusCode::OK,
    };
    Ok((status, Json(company.name().as_str().to_string())))
}
