//! Payments API endpoints
//!
//! Card purchases and pre-authorizations against `/payments`.

use super::decode;
use crate::config::Configuration;
use crate::error::ApiResult;
use crate::executor::TransactionExecutor;
use crate::models::{CardPaymentRequest, PaymentResponse};
use crate::transport::{HttpMethod, Transport};
use crate::urls::Endpoints;
use std::sync::Arc;
use tracing::instrument;

/// Payments API interface
#[derive(Clone)]
pub struct PaymentsApi {
    executor: TransactionExecutor,
    endpoints: Endpoints,
    merchant_id: u32,
}

impl PaymentsApi {
    /// Create a payments interface using the payments passcode
    pub fn new(config: &Configuration, transport: Arc<dyn Transport>) -> ApiResult<Self> {
        config.validate()?;
        Ok(Self {
            executor: TransactionExecutor::new(&config.payments_credentials(), transport)?,
            endpoints: Endpoints::new(config),
            merchant_id: config.merchant_id,
        })
    }

    pub(crate) fn from_parts(executor: TransactionExecutor, config: &Configuration) -> Self {
        Self {
            executor,
            endpoints: Endpoints::new(config),
            merchant_id: config.merchant_id,
        }
    }

    /// Charge a card
    ///
    /// POST /payments
    #[instrument(skip(self, request), fields(order_number = ?request.order_number))]
    pub async fn make_payment(&self, request: CardPaymentRequest) -> ApiResult<PaymentResponse> {
        self.submit(request, true).await
    }

    /// Authorize a card without capturing the funds
    ///
    /// POST /payments
    #[instrument(skip(self, request), fields(order_number = ?request.order_number))]
    pub async fn pre_auth(&self, request: CardPaymentRequest) -> ApiResult<PaymentResponse> {
        self.submit(request, false).await
    }

    async fn submit(
        &self,
        mut request: CardPaymentRequest,
        complete: bool,
    ) -> ApiResult<PaymentResponse> {
        request.merchant_id = self.merchant_id.to_string();
        request.card.complete = Some(complete);

        let body = self
            .executor
            .execute(HttpMethod::Post, &self.endpoints.payments(), Some(&request))
            .await?;
        decode(&body)
    }
}
