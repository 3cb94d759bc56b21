use std::sync::Arc;

use portfolio_core_contact_contracts::{
    ContactDispatchError, ContactFeatureService, ContactOutcome, ContactSendMessageError,
};
use portfolio_email_contracts::{Email, EmailService};
use portfolio_models::{contact::ContactSubmission, email_address::EmailAddress};
use portfolio_templates_contracts::TemplateService;
use tracing::{error, info};

use crate::compose::{compose, ContactNotifications};

pub mod compose;


#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Template, Email> {
    template: Template,
    email: Email,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    pub delivery: ContactDelivery,
}

/// How contact messages reach the owner.
#[derive(Debug, Clone)]
pub enum ContactDelivery {
    /// Send the owner notification and the sender acknowledgment via email.
    Email(Arc<ContactEmailConfig>),
    /// No email credentials are configured. Messages are accepted and logged,
    /// but never sent.
    Demo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmailConfig {
    /// Mailbox of the owner, used as sender of both emails and as recipient
    /// of the notification.
    pub owner_email: EmailAddress,
    /// Display name used to sign the acknowledgment.
    pub owner_name: String,
}

impl<Template, Email> ContactFeatureServiceImpl<Template, Email> {
    pub fn new(template: Template, email: Email, config: ContactFeatureConfig) -> Self {
        Self {
            template,
            email,
            config,
        }
    }
}

impl<TemplateS, EmailS> ContactFeatureService for ContactFeatureServiceImpl<TemplateS, EmailS>
where
    TemplateS: TemplateService,
    EmailS: EmailService,
{
    async fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<ContactOutcome, ContactSendMessageError> {
        let message = submission
            .validate()
            .map_err(ContactSendMessageError::Invalid)?;

        let config = match &self.config.delivery {
            ContactDelivery::Email(config) => config,
            ContactDelivery::Demo => {
                info!(
                    name = %message.author.name.as_str(),
                    email = %message.author.email,
                    subject = %message.subject.as_str(),
                    "Received contact message while email delivery is not configured"
                );
                return Ok(ContactOutcome::Demo);
            }
        };

        let notifications = compose(&self.template, &message, config)
            .inspect_err(|err| error!("Failed to compose contact notifications: {err:#}"))?;

        self.dispatch(notifications)
            .await
            .inspect_err(|err| error!("{err}"))?;

        Ok(ContactOutcome::Delivered)
    }
}

impl<TemplateS, EmailS> ContactFeatureServiceImpl<TemplateS, EmailS>
where
    EmailS: EmailService,
{
    /// Send the owner notification, then the sender acknowledgment.
    ///
    /// The acknowledgment is attempted even if the notification failed.
    async fn dispatch(&self, notifications: ContactNotifications) -> Result<(), ContactDispatchError> {
        let owner = self.deliver(notifications.owner).await;
        let sender = self.deliver(notifications.sender).await;

        match (owner, sender) {
            (Ok(()), Ok(())) => Ok(()),
            (Err(owner), Ok(())) => Err(ContactDispatchError::Owner(owner)),
            (Ok(()), Err(sender)) => Err(ContactDispatchError::Sender(sender)),
            (Err(owner), Err(sender)) => Err(ContactDispatchError::Both { owner, sender }),
        }
    }

    async fn deliver(&self, email: Email) -> Result<(), String> {
        match self.email.send(email).await {
            Ok(true) => Ok(()),
            Ok(false) => Err("The smtp server did not accept the message".into()),
            Err(err) => Err(format!("{err:#}")),
        }
    }
}
