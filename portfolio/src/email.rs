use anyhow::Context;
use portfolio_config::EmailConfig;
use portfolio_email_impl::{EmailServiceImpl, SmtpRelay};
use tracing::debug;

/// Create the smtp transport.
///
/// An explicit `smtp_url` takes precedence over the configured mail service.
/// No connection is established until the first email is sent.
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    if let Some(smtp_url) = &config.smtp_url {
        debug!("Using configured smtp url");
        return EmailServiceImpl::from_url(smtp_url).context("Failed to configure smtp transport");
    }

    let relay = SmtpRelay::resolve(&config.service);
    debug!(host = %relay.host, security = ?relay.security, "Using smtp relay");

    let credentials = config
        .credentials()
        .map(|(user, password)| (user.as_str().to_owned(), password.to_owned()));

    EmailServiceImpl::relay(&relay, credentials).context("Failed to configure smtp transport")
}
