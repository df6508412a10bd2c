//! Transaction executor
//!
//! Turns `(method, url, payload)` into one authenticated HTTP call and
//! returns the raw success body, or the unified [`Error`].

use crate::classify::classify_response;
use crate::credentials::{AuthToken, Credentials};
use crate::error::{ApiResult, Error};
use crate::observer::RequestObserver;
use crate::transport::{HttpMethod, OutboundRequest, Transport};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};

/// Executes requests against the service with one set of credentials
///
/// Cloning is cheap and clones share the transport. The encoded credential
/// is fixed at construction; build a new executor to change it.
#[derive(Clone)]
pub struct TransactionExecutor {
    transport: Arc<dyn Transport>,
    authorization: HeaderValue,
    observer: Option<Arc<dyn RequestObserver>>,
}

impl TransactionExecutor {
    /// Create an executor, encoding the credentials once
    pub fn new(credentials: &Credentials, transport: Arc<dyn Transport>) -> ApiResult<Self> {
        let authorization = authorization_header(&credentials.encode())?;
        Ok(Self {
            transport,
            authorization,
            observer: None,
        })
    }

    /// Attach an observer that sees payloads and response bodies
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Execute one request and return the raw response body
    ///
    /// A payload is accepted only for POST and PUT; supplying one with GET or
    /// DELETE is a validation error and nothing is sent. POST/PUT without a
    /// payload send no body.
    #[instrument(skip(self, method, payload), fields(method = %method))]
    pub async fn execute<P: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        url: &str,
        payload: Option<&P>,
    ) -> ApiResult<String> {
        if payload.is_some() && !method.carries_body() {
            return Err(Error::validation(format!(
                "{method} requests cannot carry a payload"
            )));
        }

        let body = payload
            .map(|p| serde_json::to_string(p).map_err(Error::Encoding))
            .transpose()?;

        if let Some(observer) = &self.observer {
            observer.on_request(method, url, body.as_deref());
        }

        let request = OutboundRequest {
            method,
            url: url.to_string(),
            headers: self.headers(),
            body,
        };

        let start = Instant::now();
        debug!("Dispatching request");

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, elapsed_ms = start.elapsed().as_millis(), "Request failed without response");
                return Err(e);
            }
        };

        debug!(
            status = response.status,
            elapsed_ms = start.elapsed().as_millis(),
            "Response received"
        );

        if let Some(observer) = &self.observer {
            observer.on_response(response.status, response.body.as_deref());
        }

        classify_response(response).inspect_err(|e| {
            warn!(status = ?e.status(), error = %e, "Request rejected by service");
        })
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.authorization.clone());
        headers
    }
}

fn authorization_header(token: &AuthToken) -> ApiResult<HeaderValue> {
    let mut value = HeaderValue::from_str(&token.header_value())
        .map_err(|_| Error::config("encoded credentials are not a valid header value"))?;
    value.set_sensitive(true);
    Ok(value)
}
