use std::sync::Arc;

use anyhow::Context;
use portfolio_api_rest::RestServerConfig;
use portfolio_config::Config;
use portfolio_core_contact_impl::{
    ContactDelivery, ContactEmailConfig, ContactFeatureConfig, ContactFeatureServiceImpl,
};
use portfolio_core_health_impl::{HealthFeatureConfig, HealthFeatureServiceImpl};
use portfolio_templates_impl::TemplateServiceImpl;
use types::{Email, RestServer};

pub mod types;

/// Wires the services of the application together.
#[derive(Debug, Clone)]
pub struct Provider {
    email: Email,
    config: ConfigProvider,
}

impl Provider {
    pub fn new(config: ConfigProvider, email: Email) -> Self {
        Self { email, config }
    }

    pub fn rest_server(self) -> anyhow::Result<RestServer> {
        let template = TemplateServiceImpl::new().context("Failed to load email templates")?;

        let contact = ContactFeatureServiceImpl::new(
            template,
            self.email.clone(),
            self.config.contact_feature_config,
        );
        let health = HealthFeatureServiceImpl::new(self.email, self.config.health_feature_config);

        Ok(RestServer::new(
            health,
            contact,
            self.config.rest_server_config,
        ))
    }
}

/// Service configurations derived from the [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    pub rest_server_config: RestServerConfig,
    pub contact_feature_config: ContactFeatureConfig,
    pub health_feature_config: HealthFeatureConfig,
}

impl ConfigProvider {
    pub fn new(config: &Config) -> Self {
        // API
        let rest_server_config = RestServerConfig {
            addr: config.http.address,
            allowed_origins: config.http.allowed_origins.clone(),
            expose_error_details: config.mode.is_development(),
        };

        // Core
        let delivery = match config.email.credentials() {
            Some((user, _)) => ContactDelivery::Email(Arc::new(ContactEmailConfig {
                owner_email: user.clone(),
                owner_name: config.email.owner_name().into(),
            })),
            None => ContactDelivery::Demo,
        };

        let health_feature_config = HealthFeatureConfig {
            cache_ttl: *config.health.cache_ttl,
            email_enabled: matches!(delivery, ContactDelivery::Email(_)),
        };

        let contact_feature_config = ContactFeatureConfig { delivery };

        Self {
            rest_server_config,
            contact_feature_config,
            health_feature_config,
        }
    }

    pub fn email_enabled(&self) -> bool {
        self.health_feature_config.email_enabled
    }
}
