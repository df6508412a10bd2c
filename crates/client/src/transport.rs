//! HTTP transport seam
//!
//! The executor talks to the network only through [`Transport`], so tests and
//! embedding applications can supply their own implementation.
//! [`ReqwestTransport`] is the default.

use crate::error::{ApiResult, Error};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Method};
use std::fmt;
use std::time::Duration;

/// User agent for outgoing requests
const USER_AGENT_VALUE: &str = concat!("beanstream-client/", env!("CARGO_PKG_VERSION"));

/// HTTP methods used by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Method name as it appears on the wire
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Whether requests with this method may carry a JSON body
    #[must_use]
    pub fn carries_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }

    fn to_reqwest(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
            Self::Delete => Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully prepared outbound request
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute URL
    pub url: String,
    /// Headers to send
    pub headers: HeaderMap,
    /// JSON body text, only for POST/PUT
    pub body: Option<String>,
}

/// Status and body of a received response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Body text, `None` when the response had none
    pub body: Option<String>,
}

impl RawResponse {
    /// Create a response value
    pub fn new(status: u16, body: Option<String>) -> Self {
        Self { status, body }
    }
}

/// Sends one request and returns the response, or a transport error when
/// no response was obtained.
///
/// Implementations must not retry and must not classify status codes;
/// every received response, 2xx or not, is returned as `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform exactly one round trip
    async fn send(&self, request: OutboundRequest) -> ApiResult<RawResponse>;
}

/// [`Transport`] backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: Client,
}

impl ReqwestTransport {
    /// Create a transport with reqwest's default settings
    pub fn new() -> ApiResult<Self> {
        Self::build(None)
    }

    /// Create a transport with an overall request timeout
    pub fn with_timeout(timeout: Duration) -> ApiResult<Self> {
        Self::build(Some(timeout))
    }

    /// Wrap an existing reqwest client
    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self { inner: client }
    }

    fn build(timeout: Option<Duration>) -> ApiResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let mut builder = Client::builder().default_headers(default_headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let inner = builder.build().map_err(Error::transport)?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: OutboundRequest) -> ApiResult<RawResponse> {
        let mut builder = self
            .inner
            .request(request.method.to_reqwest(), &request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        Ok(RawResponse::new(status, (!text.is_empty()).then_some(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_names() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
        assert_eq!(HttpMethod::Put.to_reqwest(), Method::PUT);
    }

    #[test]
    fn test_only_post_and_put_carry_body() {
        assert!(HttpMethod::Post.carries_body());
        assert!(HttpMethod::Put.carries_body());
        assert!(!HttpMethod::Get.carries_body());
        assert!(!HttpMethod::Delete.carries_body());
    }

    #[test]
    fn test_transport_creation() {
        assert!(ReqwestTransport::new().is_ok());
        assert!(ReqwestTransport::with_timeout(Duration::from_secs(5)).is_ok());
    }
}
