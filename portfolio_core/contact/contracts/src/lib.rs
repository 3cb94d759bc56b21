use std::future::Future;

use portfolio_models::contact::{ContactSubmission, ContactViolation};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validate a contact form submission and forward it to the site owner.
    ///
    /// If email delivery is configured, a notification is sent to the owner
    /// and an acknowledgment to the author of the message. Otherwise the
    /// submission is only logged.
    fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<ContactOutcome, ContactSendMessageError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Both emails have been accepted by the mail transport.
    Delivered,
    /// Email delivery is not configured, the message has only been logged.
    Demo,
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error("Invalid contact form submission.")]
    Invalid(Vec<ContactViolation>),
    #[error(transparent)]
    Dispatch(#[from] ContactDispatchError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result of the two delivery steps if at least one of them failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactDispatchError {
    #[error("Failed to deliver the owner notification: {0}")]
    Owner(String),
    #[error("Failed to deliver the sender acknowledgment: {0}")]
    Sender(String),
    #[error(
        "Failed to deliver the owner notification ({owner}) and the sender acknowledgment \
         ({sender})"
    )]
    Both { owner: String, sender: String },
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_send_message(
        mut self,
        submission: ContactSubmission,
        result: Result<ContactOutcome, ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
