use portfolio_email_contracts::{ContentType, Email};
use portfolio_models::contact::ContactMessage;
use portfolio_templates_contracts::{
    OwnerNotificationTemplate, SenderAcknowledgmentTemplate, TemplateService,
};

use crate::ContactEmailConfig;

pub const CONTACT_FORM_NAME: &str = "Portfolio Contact Form";
pub const OWNER_SUBJECT_PREFIX: &str = "Portfolio Contact: ";
pub const SENDER_SUBJECT: &str = "Thank you for contacting me!";

/// The two emails sent for a contact message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactNotifications {
    pub owner: Email,
    pub sender: Email,
}

pub fn compose(
    template: &impl TemplateService,
    message: &ContactMessage,
    config: &ContactEmailConfig,
) -> anyhow::Result<ContactNotifications> {
    let author_name = message.author.name.clone().into_inner();
    let author_email = message.author.email.clone();

    let owner = Email {
        from: config.owner_email.clone().with_name(CONTACT_FORM_NAME.into()),
        recipient: config.owner_email.clone().with_name(config.owner_name.clone()),
        subject: format!("{OWNER_SUBJECT_PREFIX}{}", *message.subject),
        body: template.render(&OwnerNotificationTemplate {
            name: author_name.clone(),
            email: author_email.as_str().into(),
            subject: message.subject.clone().into_inner(),
            message: message.content.clone().into_inner(),
        })?,
        content_type: ContentType::Html,
        reply_to: Some(author_email.clone().with_name(author_name.clone())),
    };

    let sender = Email {
        from: config.owner_email.clone().with_name(config.owner_name.clone()),
        recipient: author_email.with_name(author_name.clone()),
        subject: SENDER_SUBJECT.into(),
        body: template.render(&SenderAcknowledgmentTemplate {
            name: author_name,
            message: message.content.clone().into_inner(),
            owner_name: config.owner_name.clone(),
        })?,
        content_type: ContentType::Html,
        reply_to: None,
    };

    Ok(ContactNotifications { owner, sender })
}
