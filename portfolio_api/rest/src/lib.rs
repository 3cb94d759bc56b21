use std::{net::SocketAddr, sync::Arc};

use axum::{
    http::{HeaderValue, Method},
    Router,
};
use portfolio_core_contact_contracts::ContactFeatureService;
use portfolio_core_health_contracts::HealthFeatureService;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

mod middlewares;
mod models;
mod routes;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone)]
pub struct RestServer<Health, Contact> {
    health: Health,
    contact: Contact,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
    /// Origins allowed to call the api from a browser. Any origin is allowed
    /// if empty.
    pub allowed_origins: Vec<String>,
    /// Include the cause of internal errors in responses.
    pub expose_error_details: bool,
}

impl<Health, Contact> RestServer<Health, Contact>
where
    Health: HealthFeatureService,
    Contact: ContactFeatureService,
{
    pub fn new(health: Health, contact: Contact, config: RestServerConfig) -> Self {
        Self {
            health,
            contact,
            config,
        }
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.config.addr;
        let router = self.router();

        info!("Starting HTTP server on {addr}");
        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router).await.map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let cors = cors_layer(&self.config.allowed_origins);

        let router = Router::new()
            .merge(routes::health::router(Arc::new(self.health)))
            .merge(routes::contact::router(
                Arc::new(self.contact),
                self.config.expose_error_details,
            ))
            .layer(cors);

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins = allowed_origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|_| warn!(%origin, "Ignoring invalid allowed origin"))
                .ok()
        })
        .collect::<Vec<_>>();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
}
