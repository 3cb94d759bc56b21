use anyhow::{ensure, Context};
use clap::Subcommand;
use portfolio_config::Config;
use portfolio_email_contracts::{ContentType, Email, EmailService};
use portfolio_models::email_address::EmailAddressWithName;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddressWithName },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let sender = config
        .email
        .user
        .clone()
        .context("No sender address configured (email.user)")?;

    let email_service = email::connect(&config.email)?;

    let ok = email_service
        .send(Email {
            from: sender.with_name(config.email.owner_name().into()),
            recipient,
            subject: "Email Deliverability Test".into(),
            body: "Email deliverability seems to be working!".into(),
            content_type: ContentType::Text,
            reply_to: None,
        })
        .await?;

    ensure!(ok, "Failed to send email");

    Ok(())
}
