//! Typed facades over the transaction executor
//!
//! | Module | Service area | Passcode |
//! |--------|--------------|----------|
//! | `payments` | `/payments` | payments |
//! | `profiles` | `/profiles` | profiles |

pub mod payments;
pub mod profiles;

pub use payments::PaymentsApi;
pub use profiles::{ProfileExtras, ProfileSource, ProfilesApi};

use crate::error::{ApiResult, Error};
use serde::de::DeserializeOwned;

/// Decode a success body into the facade's result type
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    serde_json::from_str(body).map_err(Error::Decode)
}
