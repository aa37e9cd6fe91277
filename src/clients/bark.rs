use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::BarkConfig;
use crate::endpoint::EndpointBuilder;
use crate::errors::{BarkResult, ConfigurationError};
use crate::request::{validate, NotificationRequest};
use crate::response::{classify, GatewayResponse};
use crate::transport::{HttpTransport, PreparedRequest, Transport, TransportStrategy};

/// Public gateway used when no server URL is configured
pub const DEFAULT_SERVER_URL: &str = "https://api.day.app";

/// Upper bound for a single HTTP attempt
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_USER_AGENT: &str = concat!("bark-client/", env!("CARGO_PKG_VERSION"));

/// Configuration for the bark client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub key: String,
    pub server_url: String,
    pub timeout: Duration,
    pub user_agent: Option<String>,
}

impl ClientConfig {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
        }
    }

    /// Point at a self-hosted gateway; an empty URL keeps the default
    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        let server_url = server_url.into();
        if !server_url.is_empty() {
            self.server_url = server_url;
        }
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

impl From<&BarkConfig> for ClientConfig {
    fn from(config: &BarkConfig) -> Self {
        Self::new(config.key.clone())
            .with_server_url(config.server_url.clone())
            .with_timeout(Duration::from_secs(config.timeout_secs))
    }
}

/// Async client for the Bark gateway.
///
/// Holds only immutable configuration plus a shared transport, so one instance
/// (or its clones) can serve concurrent sends. Every send makes exactly one
/// HTTP attempt; retries are left to the caller.
#[derive(Clone)]
pub struct BarkClient {
    config: Arc<ClientConfig>,
    endpoint: EndpointBuilder,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for BarkClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BarkClient")
            .field("server_url", &self.config.server_url)
            .field("timeout", &self.config.timeout)
            .finish_non_exhaustive()
    }
}

impl BarkClient {
    /// Create a client using the default reqwest transport.
    ///
    /// Fails with [`ConfigurationError::EmptyKey`] before anything else is set up
    /// when the key is empty. No network access happens here.
    pub fn new(config: ClientConfig) -> BarkResult<Self> {
        if config.key.is_empty() {
            return Err(ConfigurationError::EmptyKey.into());
        }

        let transport = HttpTransport::new(config.timeout, config.user_agent.as_deref())?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client that dispatches through a caller-supplied transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> BarkResult<Self> {
        let endpoint = EndpointBuilder::new(&config.server_url, &config.key)?;

        Ok(Self {
            config: Arc::new(config),
            endpoint,
            transport,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send using the GET form (fields in path and query string)
    pub async fn send(&self, request: &NotificationRequest) -> BarkResult<GatewayResponse> {
        self.send_with(TransportStrategy::Get, request).await
    }

    /// Send using the POST form (JSON body)
    pub async fn send_post(&self, request: &NotificationRequest) -> BarkResult<GatewayResponse> {
        self.send_with(TransportStrategy::Post, request).await
    }

    /// Send a plain title + body notification over GET
    pub async fn send_simple(&self, title: &str, body: &str) -> BarkResult<GatewayResponse> {
        let request = NotificationRequest::builder(body).title(title).build();
        self.send(&request).await
    }

    /// Validate and shape a request without dispatching it
    pub fn prepare(
        &self,
        strategy: TransportStrategy,
        request: &NotificationRequest,
    ) -> BarkResult<PreparedRequest> {
        validate(request)?;
        strategy.prepare(&self.endpoint, request)
    }

    /// Validate, shape, dispatch once and classify
    pub async fn send_with(
        &self,
        strategy: TransportStrategy,
        request: &NotificationRequest,
    ) -> BarkResult<GatewayResponse> {
        let prepared = match self.prepare(strategy, request) {
            Ok(prepared) => prepared,
            Err(e) => {
                debug!(%strategy, error = %e, "notification rejected before dispatch");
                return Err(e);
            }
        };

        debug!(%strategy, has_title = request.title().is_some(), "dispatching notification");
        let start = Instant::now();
        let result = classify(self.transport.execute(prepared).await);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(response) => info!(
                %strategy,
                code = response.code,
                elapsed_ms,
                "notification accepted"
            ),
            Err(e) => warn!(
                %strategy,
                category = e.category(),
                status = ?e.status_code(),
                elapsed_ms,
                error = %e,
                "notification failed"
            ),
        }

        result
    }
}

/// Synchronous wrapper around [`BarkClient`] for blocking callers.
///
/// Owns a single-threaded tokio runtime; must not be used from inside another
/// async runtime.
pub struct BlockingBarkClient {
    inner: BarkClient,
    runtime: tokio::runtime::Runtime,
}

impl BlockingBarkClient {
    pub fn new(config: ClientConfig) -> BarkResult<Self> {
        if config.key.is_empty() {
            return Err(ConfigurationError::EmptyKey.into());
        }
        Self::from_async(BarkClient::new(config)?)
    }

    /// Wrap an existing async client
    pub fn from_async(inner: BarkClient) -> BarkResult<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|source| ConfigurationError::Runtime { source })?;

        Ok(Self { inner, runtime })
    }

    pub fn config(&self) -> &ClientConfig {
        self.inner.config()
    }

    /// Send using the GET form (blocking)
    pub fn send(&self, request: &NotificationRequest) -> BarkResult<GatewayResponse> {
        self.runtime.block_on(self.inner.send(request))
    }

    /// Send using the POST form (blocking)
    pub fn send_post(&self, request: &NotificationRequest) -> BarkResult<GatewayResponse> {
        self.runtime.block_on(self.inner.send_post(request))
    }

    pub fn send_with(
        &self,
        strategy: TransportStrategy,
        request: &NotificationRequest,
    ) -> BarkResult<GatewayResponse> {
        self.runtime.block_on(self.inner.send_with(strategy, request))
    }
}
