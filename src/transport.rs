//! Request shaping and HTTP dispatch.
//!
//! [`TransportStrategy`] turns a validated request into a [`PreparedRequest`]
//! (GET with path + query, or POST with a JSON body). A [`Transport`] performs
//! exactly one HTTP exchange for a prepared request; [`HttpTransport`] is the
//! reqwest-backed implementation used by default.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::endpoint::EndpointBuilder;
use crate::errors::{BarkResult, ConfigurationError, ValidationError};
use crate::request::NotificationRequest;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// How a notification is encoded over HTTP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportStrategy {
    /// Fields in the URL path and query string
    #[default]
    Get,
    /// Whole request as a JSON document posted to `{server}/{key}`
    Post,
}

impl TransportStrategy {
    pub fn method(&self) -> Method {
        match self {
            TransportStrategy::Get => Method::GET,
            TransportStrategy::Post => Method::POST,
        }
    }

    /// Shape an already-validated request for this strategy
    pub fn prepare(
        &self,
        endpoint: &EndpointBuilder,
        request: &NotificationRequest,
    ) -> BarkResult<PreparedRequest> {
        match self {
            TransportStrategy::Get => Ok(PreparedRequest {
                method: Method::GET,
                url: endpoint.get_url(request)?,
                json_body: None,
            }),
            TransportStrategy::Post => {
                let body = serde_json::to_string(request)
                    .map_err(|source| ValidationError::Encoding { source })?;
                Ok(PreparedRequest {
                    method: Method::POST,
                    url: endpoint.device_url().clone(),
                    json_body: Some(body),
                })
            }
        }
    }
}

impl fmt::Display for TransportStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method().as_str())
    }
}

/// A fully shaped HTTP request, ready for one dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub json_body: Option<String>,
}

impl PreparedRequest {
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if self.json_body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        }
        headers
    }
}

/// Status and body text of one HTTP exchange, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Performs exactly one HTTP attempt for a prepared request.
///
/// Implementations report timeouts, connection failures and other I/O faults as
/// [`BarkError::Network`](crate::errors::BarkError::Network) and must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: PreparedRequest) -> BarkResult<RawResponse>;
}

/// reqwest-backed transport with a per-attempt timeout
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration, user_agent: Option<&str>) -> Result<Self, ConfigurationError> {
        let mut client_builder = Client::builder()
            .timeout(timeout)
            .tcp_keepalive(Duration::from_secs(60))
            .pool_idle_timeout(Duration::from_secs(90));

        if let Some(user_agent) = user_agent {
            client_builder = client_builder.user_agent(user_agent);
        }

        let client = client_builder
            .build()
            .map_err(|source| ConfigurationError::HttpClient { source })?;

        Ok(Self { client })
    }

    /// Wrap an existing reqwest client, sharing its connection pool
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: PreparedRequest) -> BarkResult<RawResponse> {
        let headers = request.headers();
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(headers);

        if let Some(body) = request.json_body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(RawResponse { status, body })
    }
}
