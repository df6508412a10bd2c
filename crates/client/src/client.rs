//! Main API client implementation

use crate::config::Configuration;
use crate::endpoints::{PaymentsApi, ProfilesApi};
use crate::error::ApiResult;
use crate::executor::TransactionExecutor;
use crate::observer::RequestObserver;
use crate::transport::{ReqwestTransport, Transport};
use std::sync::Arc;

/// Beanstream API client
///
/// Holds one configuration and one transport, and hands out facades that
/// encode their passcode when created. To switch merchant, passcode, or
/// platform, build a new client with [`BeanstreamClient::with_config`].
#[derive(Clone)]
pub struct BeanstreamClient {
    config: Arc<Configuration>,
    transport: Arc<dyn Transport>,
    observer: Option<Arc<dyn RequestObserver>>,
}

impl BeanstreamClient {
    /// Create a new client with configuration from the environment
    pub fn from_env() -> ApiResult<Self> {
        Self::new(Configuration::from_env()?)
    }

    /// Create a new client with the default reqwest transport
    pub fn new(config: Configuration) -> ApiResult<Self> {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()?))
    }

    /// Create a new client over a caller-supplied transport
    pub fn with_transport(config: Configuration, transport: Arc<dyn Transport>) -> ApiResult<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            transport,
            observer: None,
        })
    }

    /// A new client with different configuration, sharing the transport
    pub fn with_config(&self, config: Configuration) -> ApiResult<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            transport: Arc::clone(&self.transport),
            observer: self.observer.clone(),
        })
    }

    /// Attach an observer to every facade created from now on
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access payment endpoints
    pub fn payments(&self) -> ApiResult<PaymentsApi> {
        let executor = self.executor(TransactionExecutor::new(
            &self.config.payments_credentials(),
            Arc::clone(&self.transport),
        )?);
        Ok(PaymentsApi::from_parts(executor, &self.config))
    }

    /// Access payment profile endpoints; needs a profiles passcode
    pub fn profiles(&self) -> ApiResult<ProfilesApi> {
        let executor = self.executor(TransactionExecutor::new(
            &self.config.profiles_credentials()?,
            Arc::clone(&self.transport),
        )?);
        Ok(ProfilesApi::from_parts(executor, &self.config))
    }

    fn executor(&self, executor: TransactionExecutor) -> TransactionExecutor {
        match &self.observer {
            Some(observer) => executor.with_observer(Arc::clone(observer)),
            None => executor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::observer::TracingObserver;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_creation() {
        let config = Configuration::new(300_200_578, "pay");
        let client = BeanstreamClient::new(config).unwrap();

        assert!(client.payments().is_ok());
        assert!(matches!(client.profiles(), Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(BeanstreamClient::new(Configuration::new(0, "pay")).is_err());
    }

    #[tokio::test]
    async fn test_with_config_rederives_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/profiles/AB12"))
            .and(header("authorization", "Passcode NDI6bmV3"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"code":1,"message":"ok"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let old = Configuration::new(42, "pay")
            .with_profiles_passcode("old")
            .with_base_url(server.uri());
        let client = BeanstreamClient::new(old.clone())
            .unwrap()
            .with_observer(Arc::new(TracingObserver));
        let client = client.with_config(old.with_profiles_passcode("new")).unwrap();

        let response = client.profiles().unwrap().delete_profile("AB12").await.unwrap();
        assert_eq!(response.code, 1);
    }
}
