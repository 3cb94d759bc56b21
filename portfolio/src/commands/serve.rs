use portfolio_config::Config;
use portfolio_email_contracts::EmailService;
use tracing::{info, warn};

use crate::{
    email,
    environment::{ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let email = email::connect(&config.email)?;

    let config_provider = ConfigProvider::new(&config);
    if config_provider.email_enabled() {
        info!("Connecting to smtp server");
        if let Err(err) = email.ping().await {
            warn!("Smtp server is not reachable, contact messages cannot be delivered: {err:#}");
        }
    } else {
        warn!(
            "Email credentials are not configured, contact messages will only be logged (demo \
             mode)"
        );
    }

    let server = Provider::new(config_provider, email).rest_server()?;
    server.serve().await
}
