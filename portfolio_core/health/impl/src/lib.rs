use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use portfolio_core_health_contracts::{HealthFeatureService, HealthStatus};
use portfolio_email_contracts::EmailService;
use tokio::sync::RwLock;
use tracing::error;

#[derive(Debug, Clone)]
pub struct HealthFeatureServiceImpl<Email> {
    email: Email,
    config: HealthFeatureConfig,
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct HealthFeatureConfig {
    pub cache_ttl: Duration,
    /// Whether contact messages are delivered via email. If not, the smtp
    /// server is never pinged.
    pub email_enabled: bool,
}

#[derive(Debug, Default)]
struct State {
    cache: RwLock<Option<CachedStatus>>,
}

#[derive(Debug)]
struct CachedStatus {
    status: HealthStatus,
    timestamp: Instant,
}

impl CachedStatus {
    fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now < self.timestamp + ttl
    }
}

impl<Email> HealthFeatureServiceImpl<Email> {
    pub fn new(email: Email, config: HealthFeatureConfig) -> Self {
        Self {
            email,
            config,
            state: Default::default(),
        }
    }
}

impl<Email> HealthFeatureService for HealthFeatureServiceImpl<Email>
where
    Email: EmailService,
{
    async fn get_status(&self) -> HealthStatus {
        if !self.config.email_enabled {
            return HealthStatus { email: None };
        }

        let now = Instant::now();
        let cache_guard = self.state.cache.read().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| c.is_fresh(now, self.config.cache_ttl))
        {
            return cached.status;
        }
        drop(cache_guard);

        let mut cache_guard = self.state.cache.write().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| c.is_fresh(now, self.config.cache_ttl))
        {
            return cached.status;
        }

        let email = self
            .email
            .ping()
            .await
            .inspect_err(|err| error!("Failed to ping smtp server: {err:#}"))
            .is_ok();

        cache_guard
            .insert(CachedStatus {
                status: HealthStatus { email: Some(email) },
                timestamp: now,
            })
            .status
    }
}
