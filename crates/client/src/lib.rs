//! Client for the Beanstream payments REST API
//!
//! This crate submits card payments, manages stored payment profiles, and
//! reads profile cards. Every call goes through one pipeline:
//!
//! - **Credentials**: `Passcode base64(merchant_id:passcode)`, encoded once per facade
//! - **Executor**: one authenticated JSON request per call, no retries
//! - **Classifier**: 2xx returns the body, anything else becomes an error
//! - **Errors**: a single [`Error`] type; only responses carry a status
//!
//! # Example
//!
//! ```rust,no_run
//! use beanstream_client::{BeanstreamClient, Configuration};
//! use beanstream_client::models::{Card, CardPaymentRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Configuration::new(300_200_578, "4BaD82D9197b4cc4b70a221911eE9f70");
//!     let client = BeanstreamClient::new(config)?;
//!
//!     let card = Card::new("John Doe", "4030000010001234", "12", "28").with_cvd("123");
//!     let payment = client
//!         .payments()?
//!         .make_payment(CardPaymentRequest::new(10.00, card))
//!         .await?;
//!     println!("Payment {} approved: {}", payment.id, payment.is_approved());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod classify;
pub mod client;
pub mod config;
pub mod credentials;
pub mod endpoints;
pub mod error;
pub mod executor;
pub mod models;
pub mod observer;
pub mod transport;
pub mod urls;
pub mod validation;

pub use client::BeanstreamClient;
pub use config::Configuration;
pub use error::{ApiErrorBody, ApiResult, Error};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::BeanstreamClient;
    pub use crate::config::Configuration;
    pub use crate::credentials::Credentials;
    pub use crate::endpoints::{PaymentsApi, ProfileExtras, ProfileSource, ProfilesApi};
    pub use crate::error::{ApiErrorBody, ApiResult, Error};
    pub use crate::executor::TransactionExecutor;
    pub use crate::observer::{RequestObserver, TracingObserver};
    pub use crate::transport::{HttpMethod, ReqwestTransport, Transport};
}
