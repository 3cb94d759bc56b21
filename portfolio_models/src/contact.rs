use nutype::nutype;
use serde::{Deserialize, Serialize};

use crate::email_address::EmailAddress;

/// A contact form submission as received from a visitor, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub author: ContactMessageAuthor,
    pub subject: ContactMessageSubject,
    pub content: ContactMessageContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageAuthor {
    pub name: ContactMessageAuthorName,
    pub email: EmailAddress,
}

#[nutype(
    sanitize(trim),
    validate(len_char_min = 2, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize)
)]
pub struct ContactMessageAuthorName(String);

#[nutype(
    sanitize(trim),
    validate(len_char_min = 3, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize)
)]
pub struct ContactMessageSubject(String);

#[nutype(
    sanitize(trim),
    validate(len_char_min = 10, len_char_max = 8192),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize)
)]
pub struct ContactMessageContent(String);

impl ContactMessageAuthorName {
    pub const MIN_LEN: usize = 2;
    pub const MAX_LEN: usize = 256;
}

impl ContactMessageSubject {
    pub const MIN_LEN: usize = 3;
    pub const MAX_LEN: usize = 256;
}

impl ContactMessageContent {
    pub const MIN_LEN: usize = 10;
    pub const MAX_LEN: usize = 8192;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Subject => "Subject",
            Self::Message => "Message",
        }
    }
}

/// A single field of a submission which failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactViolation {
    pub field: ContactField,
    pub message: String,
}

impl ContactViolation {
    fn too_short(field: ContactField, min: usize) -> Self {
        Self {
            field,
            message: format!("{} must be at least {min} characters", field.label()),
        }
    }

    fn too_long(field: ContactField, max: usize) -> Self {
        Self {
            field,
            message: format!("{} must be at most {max} characters", field.label()),
        }
    }

    fn invalid_email() -> Self {
        Self {
            field: ContactField::Email,
            message: "Invalid email address".into(),
        }
    }
}

impl ContactSubmission {
    /// Validate every field of the submission.
    ///
    /// Either all fields are valid and the normalized message is returned, or
    /// one violation per invalid field is reported.
    pub fn validate(self) -> Result<ContactMessage, Vec<ContactViolation>> {
        let mut violations = Vec::new();

        let name = ContactMessageAuthorName::try_new(self.name)
            .map_err(|err| {
                violations.push(match err {
                    ContactMessageAuthorNameError::LenCharMaxViolated => ContactViolation::too_long(
                        ContactField::Name,
                        ContactMessageAuthorName::MAX_LEN,
                    ),
                    _ => ContactViolation::too_short(
                        ContactField::Name,
                        ContactMessageAuthorName::MIN_LEN,
                    ),
                })
            })
            .ok();

        let email = EmailAddress::parse_normalized(&self.email)
            .map_err(|_| violations.push(ContactViolation::invalid_email()))
            .ok();

        let subject = ContactMessageSubject::try_new(self.subject)
            .map_err(|err| {
                violations.push(match err {
                    ContactMessageSubjectError::LenCharMaxViolated => ContactViolation::too_long(
                        ContactField::Subject,
                        ContactMessageSubject::MAX_LEN,
                    ),
                    _ => ContactViolation::too_short(
                        ContactField::Subject,
                        ContactMessageSubject::MIN_LEN,
                    ),
                })
            })
            .ok();

        let content = ContactMessageContent::try_new(self.message)
            .map_err(|err| {
                violations.push(match err {
                    ContactMessageContentError::LenCharMaxViolated => ContactViolation::too_long(
                        ContactField::Message,
                        ContactMessageContent::MAX_LEN,
                    ),
                    _ => ContactViolation::too_short(
                        ContactField::Message,
                        ContactMessageContent::MIN_LEN,
                    ),
                })
            })
            .ok();

        match (name, email, subject, content) {
            (Some(name), Some(email), Some(subject), Some(content)) => Ok(ContactMessage {
                author: ContactMessageAuthor { name, email },
                subject,
                content,
            }),
            _ => Err(violations),
        }
    }
}
