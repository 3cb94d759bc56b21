use std::sync::LazyLock;

use portfolio_models::{
    contact::{ContactMessage, ContactMessageAuthor, ContactSubmission},
    email_address::EmailAddress,
};

pub const OWNER_NAME: &str = "Jane Doe";

pub static OWNER_EMAIL: LazyLock<EmailAddress> =
    LazyLock::new(|| "owner@example.com".parse().unwrap());

pub static SUBMISSION: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    name: " Max Mustermann ".into(),
    email: "Max.Mustermann@Example.de".into(),
    subject: "Collaboration".into(),
    message: "Hello World! Let's build something together.".into(),
});

/// [`SUBMISSION`] after validation.
pub static MESSAGE: LazyLock<ContactMessage> = LazyLock::new(|| ContactMessage {
    author: ContactMessageAuthor {
        name: "Max Mustermann".try_into().unwrap(),
        email: "max.mustermann@example.de".parse().unwrap(),
    },
    subject: "Collaboration".try_into().unwrap(),
    content: "Hello World! Let's build something together."
        .try_into()
        .unwrap(),
});

/// Every field of this submission is invalid.
pub static INVALID_SUBMISSION: LazyLock<ContactSubmission> =
    LazyLock::new(|| ContactSubmission {
        name: "A".into(),
        email: "bad-email".into(),
        subject: "Hi".into(),
        message: "short".into(),
    });
