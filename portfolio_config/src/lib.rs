use std::{net::SocketAddr, path::Path, str::FromStr};

use anyhow::Context;
use config::{Environment, File, FileFormat};
use portfolio_models::{email_address::EmailAddress, Sensitive};
use serde::{Deserialize, Deserializer};

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of config files, loaded in order.
pub const CONFIG_PATHS_VAR: &str = "PORTFOLIO_CONFIG";

/// Prefix of environment variables overriding config values, e.g.
/// `PORTFOLIO_EMAIL__PASSWORD` for `email.password`.
pub const ENV_PREFIX: &str = "PORTFOLIO";

pub const DEFAULT_EMAIL_SERVICE: &str = "gmail";
pub const DEFAULT_OWNER_NAME: &str = "Portfolio";

/// Load the config files listed in `PORTFOLIO_CONFIG` (or the default config
/// file) and apply overrides from the environment.
pub fn load() -> anyhow::Result<Config> {
    let paths = match std::env::var_os(CONFIG_PATHS_VAR) {
        Some(paths) => std::env::split_paths(&paths).collect(),
        None => vec![DEFAULT_CONFIG_PATH.into()],
    };

    load_with(&paths, environment())
}

pub fn load_with(paths: &[impl AsRef<Path>], env: Environment) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .add_source(env)
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub mode: RuntimeMode,
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    #[default]
    Production,
    Development,
}

impl RuntimeMode {
    pub fn is_development(self) -> bool {
        self == Self::Development
    }
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub address: SocketAddr,
    /// A list in config files, comma separated in the environment.
    #[serde(default, deserialize_with = "list")]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    #[serde(default = "default_email_service")]
    pub service: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub smtp_url: Option<Sensitive<String>>,
    #[serde(default, deserialize_with = "non_empty")]
    pub user: Option<EmailAddress>,
    #[serde(default, deserialize_with = "non_empty")]
    pub password: Option<Sensitive<String>>,
    #[serde(default, deserialize_with = "non_empty")]
    pub owner_name: Option<String>,
}

impl EmailConfig {
    /// Sender address and password, if both are configured.
    ///
    /// Without credentials no email must ever be sent.
    pub fn credentials(&self) -> Option<(&EmailAddress, &str)> {
        self.user.as_ref().zip(self.password.as_deref().map(String::as_str))
    }

    pub fn owner_name(&self) -> &str {
        self.owner_name.as_deref().unwrap_or(DEFAULT_OWNER_NAME)
    }
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}

fn default_email_service() -> String {
    DEFAULT_EMAIL_SERVICE.into()
}

/// Treat missing and empty values the same way.
fn non_empty<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    Option::<String>::deserialize(deserializer)?
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.trim().parse().map_err(serde::de::Error::custom))
        .transpose()
}

fn list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum List {
        Items(Vec<String>),
        Joined(String),
    }

    Ok(match List::deserialize(deserializer)? {
        List::Items(items) => items,
        List::Joined(joined) => joined
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(Into::into)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn load_default(env: &[(&str, &str)]) -> Config {
        let env = env
            .iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect::<HashMap<_, _>>();
        load_with(&[Path::new(DEFAULT_CONFIG_PATH)], environment().source(Some(env))).unwrap()
    }

    #[test]
    fn load_default_config() {
        let config = load_default(&[]);

        assert_eq!(config.mode, RuntimeMode::Production);
        assert_eq!(config.http.address.port(), 5000);
        assert!(config.http.allowed_origins.is_empty());
        assert_eq!(config.email.service, DEFAULT_EMAIL_SERVICE);
        assert_eq!(config.email.credentials(), None);
        assert_eq!(config.email.owner_name(), DEFAULT_OWNER_NAME);
        assert_eq!(config.health.cache_ttl.as_secs(), 10);
    }

    #[test]
    fn environment_overrides() {
        let config = load_default(&[
            ("PORTFOLIO_MODE", "development"),
            ("PORTFOLIO_HTTP__ADDRESS", "127.0.0.1:8080"),
            (
                "PORTFOLIO_HTTP__ALLOWED_ORIGINS",
                "https://example.com,http://localhost:5173",
            ),
            ("PORTFOLIO_EMAIL__SERVICE", "outlook"),
            ("PORTFOLIO_EMAIL__USER", "Owner@Example.com"),
            ("PORTFOLIO_EMAIL__PASSWORD", "app password"),
            ("PORTFOLIO_EMAIL__OWNER_NAME", "Jane Doe"),
        ]);

        assert!(config.mode.is_development());
        assert_eq!(config.http.address, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(
            config.http.allowed_origins,
            ["https://example.com", "http://localhost:5173"]
        );
        assert_eq!(config.email.service, "outlook");
        let (user, password) = config.email.credentials().unwrap();
        assert_eq!(user.as_str(), "Owner@Example.com");
        assert_eq!(password, "app password");
        assert_eq!(config.email.owner_name(), "Jane Doe");
    }

    #[test]
    fn credentials_require_user_and_password() {
        let config = load_default(&[("PORTFOLIO_EMAIL__USER", "owner@example.com")]);
        assert_eq!(config.email.credentials(), None);

        let config = load_default(&[("PORTFOLIO_EMAIL__PASSWORD", "secret")]);
        assert_eq!(config.email.credentials(), None);

        let config = load_default(&[
            ("PORTFOLIO_EMAIL__USER", "owner@example.com"),
            ("PORTFOLIO_EMAIL__PASSWORD", ""),
        ]);
        assert_eq!(config.email.credentials(), None);
    }

    #[test]
    fn secrets_are_not_printed() {
        let config = load_default(&[
            ("PORTFOLIO_EMAIL__USER", "owner@example.com"),
            ("PORTFOLIO_EMAIL__PASSWORD", "hunter2"),
        ]);
        assert!(!format!("{config:?}").contains("hunter2"));
    }

    #[test]
    fn invalid_sender_address() {
        let env = HashMap::from([("PORTFOLIO_EMAIL__USER".to_owned(), "not an email".to_owned())]);
        let result = load_with(&[Path::new(DEFAULT_CONFIG_PATH)], environment().source(Some(env)));
        assert!(result.is_err());
    }

    #[test]
    fn numeric_looking_values_are_kept_verbatim() {
        let config = load_default(&[
            ("PORTFOLIO_EMAIL__USER", "owner@example.com"),
            ("PORTFOLIO_EMAIL__PASSWORD", "007007"),
            ("PORTFOLIO_EMAIL__OWNER_NAME", "1e3"),
        ]);

        let (_, password) = config.email.credentials().unwrap();
        assert_eq!(password, "007007");
        assert_eq!(config.email.owner_name(), "1e3");
    }
}
