//! Transport seam: the shared, connection-pooling executor of requests.
//!
//! The dispatcher only ever talks to a [`Transport`], so tests can swap in
//! stubs and applications can wrap the real client. The production
//! implementation is a pooled `reqwest::Client` configured by
//! [`TransportConfig`].

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Error, Result};

/// The `do(request) -> (response, error)`-shaped collaborator every call
/// goes through. One long-lived instance is shared by all calls.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute the request and return the raw response.
    async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response>;
}

#[async_trait]
impl Transport for reqwest::Client {
    async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response> {
        reqwest::Client::execute(self, request)
            .await
            .map_err(Error::from)
    }
}

/// Connection-pool and timeout settings for the default transport.
///
/// Defaults: 20 s overall request timeout, 30 s connect timeout, 30 s TCP
/// keep-alive, 90 s pool idle timeout, 100 idle connections per host.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Absolute deadline for the entire request lifecycle.
    pub overall_timeout: Duration,
    /// Deadline for establishing a connection (DNS + TCP + TLS).
    pub connect_timeout: Duration,
    /// TCP keep-alive probe interval.
    pub tcp_keepalive: Duration,
    /// How long an idle pooled connection is kept around.
    pub pool_idle_timeout: Duration,
    /// Maximum idle connections kept per host.
    pub max_idle_per_host: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            overall_timeout: Duration::from_secs(20),
            connect_timeout: Duration::from_secs(30),
            tcp_keepalive: Duration::from_secs(30),
            pool_idle_timeout: Duration::from_secs(90),
            max_idle_per_host: 100,
        }
    }
}

impl TransportConfig {
    /// Create a config with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overall request timeout.
    pub fn overall_timeout(mut self, timeout: Duration) -> Self {
        self.overall_timeout = timeout;
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the TCP keep-alive interval.
    pub fn tcp_keepalive(mut self, interval: Duration) -> Self {
        self.tcp_keepalive = interval;
        self
    }

    /// Set the pool idle timeout.
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set the maximum idle connections per host.
    pub fn max_idle_per_host(mut self, max: usize) -> Self {
        self.max_idle_per_host = max;
        self
    }

    /// Build the pooled client.
    pub fn build(self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.overall_timeout)
            .connect_timeout(self.connect_timeout)
            .tcp_keepalive(self.tcp_keepalive)
            .pool_idle_timeout(self.pool_idle_timeout)
            .pool_max_idle_per_host(self.max_idle_per_host)
            .build()
            .map_err(Error::from)
    }
}
