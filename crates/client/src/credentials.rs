//! Passcode credential encoding
//!
//! The service authenticates every call with
//! `Authorization: Passcode base64("{merchant_id}:{passcode}")`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;

/// Authorization scheme used by the service
pub const PASSCODE_SCHEME: &str = "Passcode";

/// Merchant credentials for one API area
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    merchant_id: u32,
    passcode: String,
}

impl Credentials {
    /// Create credentials from a merchant ID and API passcode
    pub fn new(merchant_id: u32, passcode: impl Into<String>) -> Self {
        Self {
            merchant_id,
            passcode: passcode.into(),
        }
    }

    /// Merchant ID
    #[must_use]
    pub fn merchant_id(&self) -> u32 {
        self.merchant_id
    }

    /// Encode into an authorization token
    #[must_use]
    pub fn encode(&self) -> AuthToken {
        AuthToken(encode(self.merchant_id, &self.passcode))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("merchant_id", &self.merchant_id)
            .field("passcode", &"<redacted>")
            .finish()
    }
}

/// Base64 of the UTF-8 bytes of `"{merchant_id}:{passcode}"`
#[must_use]
pub fn encode(merchant_id: u32, passcode: &str) -> String {
    STANDARD.encode(format!("{merchant_id}:{passcode}"))
}

/// An encoded credential, ready for the `Authorization` header
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// The bare base64 token
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full `Authorization` header value
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("{PASSCODE_SCHEME} {}", self.0)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}
