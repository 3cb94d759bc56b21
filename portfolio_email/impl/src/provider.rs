/// How the connection to a relay is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpSecurity {
    /// Implicit TLS on port 465.
    Tls,
    /// Plain connection upgraded with STARTTLS on port 587.
    StartTls,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpRelay {
    pub host: String,
    pub security: SmtpSecurity,
}

const WELL_KNOWN: &[(&[&str], &str, SmtpSecurity)] = &[
    (&["gmail", "googlemail"], "smtp.gmail.com", SmtpSecurity::Tls),
    (
        &["outlook", "hotmail", "live", "outlook365"],
        "smtp-mail.outlook.com",
        SmtpSecurity::StartTls,
    ),
    (&["office365"], "smtp.office365.com", SmtpSecurity::StartTls),
    (&["yahoo", "ymail"], "smtp.mail.yahoo.com", SmtpSecurity::Tls),
    (&["icloud", "me"], "smtp.mail.me.com", SmtpSecurity::StartTls),
    (&["zoho"], "smtp.zoho.com", SmtpSecurity::Tls),
    (&["fastmail"], "smtp.fastmail.com", SmtpSecurity::Tls),
    (&["sendgrid"], "smtp.sendgrid.net", SmtpSecurity::StartTls),
    (&["mailgun"], "smtp.mailgun.org", SmtpSecurity::StartTls),
];

impl SmtpRelay {
    /// Resolve a service name like `gmail` to its relay.
    ///
    /// Names are matched case insensitively. Anything that is not a well-known
    /// service is used as the hostname of a STARTTLS relay.
    pub fn resolve(service: &str) -> Self {
        let service = service.trim();
        let key = service.to_lowercase().replace([' ', '-', '_'], "");

        WELL_KNOWN
            .iter()
            .find(|(names, _, _)| names.contains(&key.as_str()))
            .map(|&(_, host, security)| Self {
                host: host.into(),
                security,
            })
            .unwrap_or_else(|| Self {
                host: service.into(),
                security: SmtpSecurity::StartTls,
            })
    }
}
