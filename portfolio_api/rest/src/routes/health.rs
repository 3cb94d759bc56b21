use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use portfolio_core_health_contracts::HealthFeatureService;

use crate::models::health::ApiHealthStatus;

pub const PATH: &str = "/health";

pub fn router(service: Arc<impl HealthFeatureService>) -> Router<()> {
    Router::new()
        .route(PATH, routing::get(health))
        .with_state(service)
}

async fn health(service: State<Arc<impl HealthFeatureService>>) -> Response {
    let status = service.get_status().await;

    let code = if status.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (code, Json(ApiHealthStatus::from(status))).into_response()
}
