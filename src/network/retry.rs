//! Retry policy for the pooled adapter
//!
//! Connect failures (connection refused, DNS, connect timeout) are retried
//! until `max_attempts` is reached. Failures after the request may have been
//! written are only retried for idempotent or opted-in methods. A response
//! status is only retried when both the status and the request method are
//! opted in, so non-idempotent calls are never silently repeated.

use reqwest::{Method, Request, Response, StatusCode};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tower::retry::Policy;
use tracing::{debug, warn};

use crate::config::RetryConfig;
use crate::observability::Metrics;

/// Upper bound for a single backoff sleep
const MAX_BACKOFF: Duration = Duration::from_secs(120);

/// Immutable retry settings shared by every request of a session
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_factor: f64,
    retry_on_status: HashSet<StatusCode>,
    retry_methods: Option<HashSet<Method>>,
}

impl RetryPolicy {
    pub fn from_config(config: &RetryConfig) -> Self {
        let retry_on_status = config
            .retry_on_status
            .iter()
            .filter_map(|&code| StatusCode::from_u16(code).ok())
            .collect();

        let retry_methods = config.retry_methods.as_ref().map(|methods| {
            methods
                .iter()
                .filter_map(|m| Method::from_bytes(m.to_uppercase().as_bytes()).ok())
                .collect()
        });

        Self {
            max_attempts: config.max_attempts.max(1),
            backoff_factor: config.backoff_factor,
            retry_on_status,
            retry_methods,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay before retry `n` (1-based): `backoff_factor * 2^(n-1)` seconds
    pub fn backoff(&self, retry: u32) -> Duration {
        if retry == 0 {
            return Duration::ZERO;
        }
        let secs = self.backoff_factor * 2f64.powi(retry as i32 - 1);
        Duration::try_from_secs_f64(secs)
            .unwrap_or(MAX_BACKOFF)
            .min(MAX_BACKOFF)
    }

    fn is_opted_in(&self, method: &Method) -> bool {
        self.retry_methods
            .as_ref()
            .is_some_and(|methods| methods.contains(method))
    }

    pub fn is_retryable_status(&self, method: &Method, status: StatusCode) -> bool {
        self.is_opted_in(method) && self.retry_on_status.contains(&status)
    }

    /// Whether a transport failure may be retried for `method`
    ///
    /// Connect failures (refused, DNS, connect timeout) never reached the
    /// upstream and always retry. Once the request may have been written, a
    /// timeout waiting for the answer retries only for opted-in methods, and a
    /// dropped connection additionally for idempotent methods. POST and PATCH
    /// are therefore never re-sent unless listed in `retry_methods`.
    pub fn is_retryable_error(&self, method: &Method, error: &reqwest::Error) -> bool {
        if error.is_connect() {
            return true;
        }
        if error.status().is_some() {
            return false;
        }
        if error.is_timeout() {
            return self.is_opted_in(method);
        }
        error.is_request() && (is_idempotent(method) || self.is_opted_in(method))
    }
}

fn is_idempotent(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE | Method::PUT | Method::DELETE
    )
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

/// Per-request retry state handed to `tower::retry`
///
/// `tower` clones the policy for every call, so `attempt` counts the retries
/// of one request only.
#[derive(Clone)]
pub(crate) struct RetryAttempts {
    policy: Arc<RetryPolicy>,
    metrics: Arc<Metrics>,
    attempt: u32,
}

impl RetryAttempts {
    pub(crate) fn new(policy: Arc<RetryPolicy>, metrics: Arc<Metrics>) -> Self {
        Self {
            policy,
            metrics,
            attempt: 0,
        }
    }
}

impl Policy<Request, Response, reqwest::Error> for RetryAttempts {
    type Future = tokio::time::Sleep;

    fn retry(
        &mut self,
        req: &mut Request,
        result: &mut Result<Response, reqwest::Error>,
    ) -> Option<Self::Future> {
        let reason = match result {
            Ok(response) if self.policy.is_retryable_status(req.method(), response.status()) => {
                format!("status {}", response.status())
            }
            Ok(_) => return None,
            Err(error) if self.policy.is_retryable_error(req.method(), error) => error.to_string(),
            Err(_) => return None,
        };

        if self.attempt + 1 >= self.policy.max_attempts {
            debug!(
                url = %req.url(),
                attempts = self.attempt + 1,
                reason = %reason,
                "Retry budget exhausted"
            );
            return None;
        }

        self.attempt += 1;
        let delay = self.policy.backoff(self.attempt);
        self.metrics.request_retried();

        warn!(
            url = %req.url(),
            attempt = self.attempt,
            delay_ms = delay.as_millis() as u64,
            reason = %reason,
            "Request failed, retrying"
        );

        Some(tokio::time::sleep(delay))
    }

    fn clone_request(&mut self, req: &Request) -> Option<Request> {
        req.try_clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.backoff(0), Duration::ZERO);
        assert_eq!(policy.backoff(1), Duration::from_millis(100));
        assert_eq!(policy.backoff(2), Duration::from_millis(200));
        assert_eq!(policy.backoff(3), Duration::from_millis(400));
    }

    #[test]
    fn test_backoff_capped() {
        let policy = RetryPolicy::from_config(&RetryConfig {
            backoff_factor: 10.0,
            ..RetryConfig::default()
        });

        assert_eq!(policy.backoff(10), MAX_BACKOFF);
    }

    #[test]
    fn test_default_never_retries_status() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.max_attempts(), 3);
        assert!(!policy.is_retryable_status(&Method::GET, StatusCode::SERVICE_UNAVAILABLE));
        assert!(!policy.is_retryable_status(&Method::POST, StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn test_opted_in_methods_retry_listed_statuses() {
        let policy = RetryPolicy::from_config(&RetryConfig {
            retry_methods: Some(vec!["get".to_string()]),
            ..RetryConfig::default()
        });

        assert!(policy.is_retryable_status(&Method::GET, StatusCode::BAD_GATEWAY));
        assert!(!policy.is_retryable_status(&Method::GET, StatusCode::NOT_FOUND));
        assert!(!policy.is_retryable_status(&Method::POST, StatusCode::BAD_GATEWAY));
    }

    #[tokio::test]
    async fn test_attempts_stop_at_budget() {
        let policy = Arc::new(RetryPolicy::default());
        let metrics = Arc::new(Metrics::new());
        let mut attempts = RetryAttempts::new(policy, metrics.clone());

        // Nothing listens on port 1, so every send fails to connect
        let client = reqwest::Client::new();
        let mut request = client.get("http://127.0.0.1:1/").build().unwrap();
        let error = client.execute(request.try_clone().unwrap()).await.unwrap_err();
        assert!(RetryPolicy::default().is_retryable_error(&Method::POST, &error));

        let mut result = Err(error);
        assert!(attempts.retry(&mut request, &mut result).is_some());
        assert!(attempts.retry(&mut request, &mut result).is_some());
        assert!(attempts.retry(&mut request, &mut result).is_none());
        assert_eq!(metrics.snapshot().requests_retried, 2);
    }

    #[tokio::test]
    async fn test_dropped_connection_retries_by_method() {
        // Accepts, reads the request head, then closes without answering
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        tokio::spawn(async move {
            use tokio::io::AsyncReadExt;
            while let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;
            }
        });

        let client = reqwest::Client::new();
        let error = client.post(&url).body("x").send().await.unwrap_err();
        assert!(!error.is_connect());

        let policy = RetryPolicy::default();
        assert!(policy.is_retryable_error(&Method::GET, &error));
        assert!(!policy.is_retryable_error(&Method::POST, &error));
        assert!(!policy.is_retryable_error(&Method::PATCH, &error));

        let opted_in = RetryPolicy::from_config(&RetryConfig {
            retry_methods: Some(vec!["POST".to_string()]),
            ..RetryConfig::default()
        });
        assert!(opted_in.is_retryable_error(&Method::POST, &error));
    }

    #[tokio::test]
    async fn test_read_timeout_needs_opt_in() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        tokio::spawn(async move {
            let mut open = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                open.push(stream);
            }
        });

        let client = reqwest::Client::new();
        let error = client
            .get(&url)
            .timeout(Duration::from_millis(100))
            .send()
            .await
            .unwrap_err();
        assert!(error.is_timeout());

        assert!(!RetryPolicy::default().is_retryable_error(&Method::GET, &error));
        let opted_in = RetryPolicy::from_config(&RetryConfig {
            retry_methods: Some(vec!["GET".to_string()]),
            ..RetryConfig::default()
        });
        assert!(opted_in.is_retryable_error(&Method::GET, &error));
    }
}
