//! Process-wide HTTP session
//!
//! The session owns one adapter per combination of mount, TLS verification and
//! redirect handling. Adapters for URLs matching a mount prefix carry the
//! pooled retry stack; every other URL goes through a plain client.

use reqwest::Client;
use reqwest::redirect::Policy as RedirectPolicy;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use tower::ServiceBuilder;
use tower::util::BoxCloneService;
use tracing::{debug, warn};

use super::retry::{RetryAttempts, RetryPolicy};
use crate::config::{NetworkConfig, ValidationError, validate_network};
use crate::observability::Metrics;

/// Redirect hop limit used when redirects are followed
const MAX_REDIRECTS: usize = 30;

static GLOBAL: OnceLock<Arc<Session>> = OnceLock::new();

pub(crate) type HttpService = BoxCloneService<reqwest::Request, reqwest::Response, reqwest::Error>;

#[derive(Clone)]
pub(crate) struct Adapter {
    pub(crate) client: Client,
    pub(crate) service: HttpService,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct AdapterKey {
    mounted: bool,
    verify: bool,
    follow_redirects: bool,
}

pub struct Session {
    config: NetworkConfig,
    retry: Arc<RetryPolicy>,
    metrics: Arc<Metrics>,
    adapters: Mutex<HashMap<AdapterKey, Adapter>>,
}

impl Session {
    pub fn new(config: NetworkConfig) -> Result<Self, ValidationError> {
        validate_network(&config)?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: NetworkConfig) -> Self {
        Self {
            retry: Arc::new(RetryPolicy::from_config(&config.retry)),
            metrics: Arc::new(Metrics::new()),
            adapters: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Shared session, created with default network settings on first use
    pub fn global() -> Arc<Session> {
        GLOBAL
            .get_or_init(|| Arc::new(Session::from_validated(NetworkConfig::default())))
            .clone()
    }

    /// Configure the shared session before its first use
    pub fn install(config: NetworkConfig) -> Result<Arc<Session>, ValidationError> {
        let session = Arc::new(Session::new(config)?);
        if GLOBAL.set(session).is_err() {
            warn!("Shared session already initialised, keeping the existing one");
        }
        Ok(Session::global())
    }

    /// Close the shared session at process exit
    pub fn shutdown() {
        if let Some(session) = GLOBAL.get() {
            session.close();
        }
    }

    /// Drop every pooled connection; adapters are rebuilt on next use
    pub fn close(&self) {
        let mut adapters = self.adapters.lock().unwrap_or_else(|e| e.into_inner());
        let count = adapters.len();
        adapters.clear();
        debug!(adapters = count, "Session closed");
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Whether `url` is served by the pooled, retrying adapter
    pub fn is_mounted(&self, url: &str) -> bool {
        let url = url.to_ascii_lowercase();
        self.config
            .mounts
            .iter()
            .any(|prefix| url.starts_with(&prefix.to_ascii_lowercase()))
    }

    pub(crate) fn adapter(
        &self,
        url: &str,
        verify: bool,
        follow_redirects: bool,
    ) -> Result<Adapter, reqwest::Error> {
        let key = AdapterKey {
            mounted: self.is_mounted(url),
            verify,
            follow_redirects,
        };

        let mut adapters = self.adapters.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(adapter) = adapters.get(&key) {
            return Ok(adapter.clone());
        }

        let adapter = self.build_adapter(key)?;
        adapters.insert(key, adapter.clone());
        Ok(adapter)
    }

    fn build_adapter(&self, key: AdapterKey) -> Result<Adapter, reqwest::Error> {
        let redirect = if key.follow_redirects {
            RedirectPolicy::limited(MAX_REDIRECTS)
        } else {
            RedirectPolicy::none()
        };

        let mut builder = Client::builder()
            .redirect(redirect)
            .danger_accept_invalid_certs(!key.verify);

        let pool = &self.config.pool;
        if key.mounted {
            builder = builder.pool_max_idle_per_host(pool.max_connections);
        }
        let client = builder.build()?;

        let service = if !key.mounted {
            BoxCloneService::new(client.clone())
        } else {
            let policy = RetryAttempts::new(self.retry.clone(), self.metrics.clone());
            if pool.blocking_when_exhausted {
                BoxCloneService::new(
                    ServiceBuilder::new()
                        .retry(policy)
                        .concurrency_limit(pool.max_connections)
                        .service(client.clone()),
                )
            } else {
                BoxCloneService::new(ServiceBuilder::new().retry(policy).service(client.clone()))
            }
        };

        debug!(
            mounted = key.mounted,
            verify = key.verify,
            follow_redirects = key.follow_redirects,
            "Built HTTP adapter"
        );

        Ok(Adapter { client, service })
    }
}
