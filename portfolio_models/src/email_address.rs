use std::str::FromStr;

use lettre::address::AddressError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(pub lettre::Address);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddressWithName(pub lettre::message::Mailbox);

const GMAIL_DOMAINS: &[&str] = &["gmail.com", "googlemail.com"];

const PLUS_TAG_DOMAINS: &[&str] = &[
    // outlook
    "hotmail.com",
    "hotmail.co.uk",
    "hotmail.de",
    "hotmail.fr",
    "live.com",
    "live.co.uk",
    "live.de",
    "msn.com",
    "outlook.com",
    "outlook.de",
    "outlook.fr",
    // icloud
    "icloud.com",
    "me.com",
    "mac.com",
];

const DASH_TAG_DOMAINS: &[&str] = &[
    "yahoo.com",
    "yahoo.co.uk",
    "yahoo.de",
    "yahoo.fr",
    "ymail.com",
    "rocketmail.com",
];

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }

    pub fn with_name(self, name: String) -> EmailAddressWithName {
        EmailAddressWithName(lettre::message::Mailbox {
            name: Some(name),
            email: self.0,
        })
    }

    /// Parse an address submitted by a user and bring it into its canonical
    /// form.
    ///
    /// The address is trimmed and lowercased. For providers which ignore
    /// sub-addressing the tag is dropped (`+tag` for Gmail, Outlook and iCloud,
    /// `-tag` for Yahoo) and Gmail additionally ignores dots in the local
    /// part. Applying this function to its own output yields the same address.
    pub fn parse_normalized(s: &str) -> Result<Self, AddressError> {
        let address = lettre::Address::from_str(s.trim())?;
        let user = address.user().to_lowercase();
        let domain = address.domain().to_lowercase();

        // addresses without a top level domain are not deliverable from the
        // public internet
        if !domain.contains('.') {
            return Err(AddressError::InvalidDomain);
        }

        let (user, domain) = if GMAIL_DOMAINS.contains(&domain.as_str()) {
            (strip_tag(&user, '+').replace('.', ""), "gmail.com".into())
        } else if PLUS_TAG_DOMAINS.contains(&domain.as_str()) {
            (strip_tag(&user, '+').into(), domain)
        } else if DASH_TAG_DOMAINS.contains(&domain.as_str()) {
            (strip_tag(&user, '-').into(), domain)
        } else {
            (user, domain)
        };

        lettre::Address::new(user, domain).map(Self)
    }
}

fn strip_tag(user: &str, separator: char) -> &str {
    user.split_once(separator).map_or(user, |(base, _)| base)
}

impl EmailAddressWithName {
    pub fn into_email_address(self) -> EmailAddress {
        EmailAddress(self.0.email)
    }

    pub fn email(&self) -> &str {
        self.0.email.as_ref()
    }

    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }
}

impl From<EmailAddress> for EmailAddressWithName {
    fn from(value: EmailAddress) -> Self {
        Self(lettre::message::Mailbox::new(None, value.0))
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::fmt::Display for EmailAddressWithName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EmailAddress {
    type Err = <lettre::Address as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl FromStr for EmailAddressWithName {
    type Err = <lettre::message::Mailbox as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = <Self as FromStr>::Err;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}
