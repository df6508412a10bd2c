//! Configuration for the Beanstream client
//!
//! A [`Configuration`] is a plain value. The `with_*` methods consume it and
//! return a new one; anything built from the old value keeps using the old
//! credentials until it is rebuilt.

use crate::credentials::Credentials;
use crate::error::{ApiResult, Error};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::Path;

/// Default platform subdomain
pub const DEFAULT_PLATFORM: &str = "www";

/// Default API version
pub const DEFAULT_VERSION: &str = "v1";

/// Client configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Merchant ID
    pub merchant_id: u32,
    /// Passcode for the payments API
    pub payments_passcode: String,
    /// Passcode for the payment profiles API
    #[serde(default)]
    pub profiles_passcode: Option<String>,
    /// Passcode for the reporting API
    #[serde(default)]
    pub reporting_passcode: Option<String>,
    /// Platform subdomain (`www`, or a regional/test platform)
    #[serde(default = "default_platform")]
    pub platform: String,
    /// API version path segment
    #[serde(default = "default_version")]
    pub version: String,
    /// Replaces `https://{platform}.beanstream.com/api/{version}` when set
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_platform() -> String {
    DEFAULT_PLATFORM.to_string()
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |p: &Option<String>| p.as_ref().map(|_| "<redacted>");
        f.debug_struct("Configuration")
            .field("merchant_id", &self.merchant_id)
            .field("payments_passcode", &"<redacted>")
            .field("profiles_passcode", &redact(&self.profiles_passcode))
            .field("reporting_passcode", &redact(&self.reporting_passcode))
            .field("platform", &self.platform)
            .field("version", &self.version)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Configuration {
    /// Create a configuration for the payments API
    pub fn new(merchant_id: u32, payments_passcode: impl Into<String>) -> Self {
        Self {
            merchant_id,
            payments_passcode: payments_passcode.into(),
            profiles_passcode: None,
            reporting_passcode: None,
            platform: default_platform(),
            version: default_version(),
            base_url: None,
        }
    }

    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `BEANSTREAM_MERCHANT_ID` (required)
    /// - `BEANSTREAM_PAYMENTS_PASSCODE` (required)
    /// - `BEANSTREAM_PROFILES_PASSCODE`
    /// - `BEANSTREAM_REPORTING_PASSCODE`
    /// - `BEANSTREAM_PLATFORM`: defaults to `www`
    /// - `BEANSTREAM_API_VERSION`: defaults to `v1`
    /// - `BEANSTREAM_BASE_URL`: overrides the derived API root
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> ApiResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| Error::config(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> ApiResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ApiResult<Self> {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::config(format!("missing environment variable: {key}")))
        };

        let merchant_id = require("BEANSTREAM_MERCHANT_ID")?
            .trim()
            .parse::<u32>()
            .map_err(|e| Error::config(format!("BEANSTREAM_MERCHANT_ID is not a number: {e}")))?;

        let config = Self {
            merchant_id,
            payments_passcode: require("BEANSTREAM_PAYMENTS_PASSCODE")?,
            profiles_passcode: lookup("BEANSTREAM_PROFILES_PASSCODE"),
            reporting_passcode: lookup("BEANSTREAM_REPORTING_PASSCODE"),
            platform: lookup("BEANSTREAM_PLATFORM").unwrap_or_else(default_platform),
            version: lookup("BEANSTREAM_API_VERSION").unwrap_or_else(default_version),
            base_url: lookup("BEANSTREAM_BASE_URL"),
        };

        config.validate()?;
        Ok(config)
    }

    /// Builder-style method to set the profiles passcode
    #[must_use]
    pub fn with_profiles_passcode(mut self, passcode: impl Into<String>) -> Self {
        self.profiles_passcode = Some(passcode.into());
        self
    }

    /// Builder-style method to set the reporting passcode
    #[must_use]
    pub fn with_reporting_passcode(mut self, passcode: impl Into<String>) -> Self {
        self.reporting_passcode = Some(passcode.into());
        self
    }

    /// Builder-style method to set the platform
    #[must_use]
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Builder-style method to set the API version
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Builder-style method to override the API root URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Credentials for the payments API
    #[must_use]
    pub fn payments_credentials(&self) -> Credentials {
        Credentials::new(self.merchant_id, &self.payments_passcode)
    }

    /// Credentials for the payment profiles API
    pub fn profiles_credentials(&self) -> ApiResult<Credentials> {
        self.profiles_passcode
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| Credentials::new(self.merchant_id, p))
            .ok_or_else(|| Error::config("profiles passcode is not configured"))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.merchant_id == 0 {
            return Err(Error::config("merchant_id cannot be zero"));
        }

        if self.payments_passcode.is_empty() {
            return Err(Error::config("payments_passcode cannot be empty"));
        }

        if self.platform.is_empty() {
            return Err(Error::config("platform cannot be empty"));
        }

        if self.version.is_empty() {
            return Err(Error::config("version cannot be empty"));
        }

        if let Some(ref url) = self.base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(Error::config("base_url must start with http:// or https://"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Configuration::new(300_200_578, "secret");
        assert_eq!(config.platform, "www");
        assert_eq!(config.version, "v1");
        assert!(config.profiles_passcode.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_returns_new_value() {
        let base = Configuration::new(1, "a");
        let changed = base.clone().with_platform("tls12").with_profiles_passcode("b");

        assert_eq!(base.platform, "www");
        assert_eq!(changed.platform, "tls12");
        assert_eq!(changed.profiles_passcode.as_deref(), Some("b"));
    }

    #[test]
    fn test_from_lookup() {
        let config = Configuration::from_lookup(lookup_from(&[
            ("BEANSTREAM_MERCHANT_ID", "300200578"),
            ("BEANSTREAM_PAYMENTS_PASSCODE", "pay"),
            ("BEANSTREAM_PROFILES_PASSCODE", "prof"),
            ("BEANSTREAM_API_VERSION", "v1.1"),
        ]))
        .unwrap();

        assert_eq!(config.merchant_id, 300_200_578);
        assert_eq!(config.profiles_passcode.as_deref(), Some("prof"));
        assert_eq!(config.version, "v1.1");
        assert_eq!(config.platform, "www");
    }

    #[test]
    fn test_from_lookup_missing_and_malformed() {
        let err = Configuration::from_lookup(lookup_from(&[("BEANSTREAM_MERCHANT_ID", "1")]))
            .unwrap_err();
        assert!(err.message().contains("BEANSTREAM_PAYMENTS_PASSCODE"));

        let err = Configuration::from_lookup(lookup_from(&[
            ("BEANSTREAM_MERCHANT_ID", "abc"),
            ("BEANSTREAM_PAYMENTS_PASSCODE", "pay"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_toml() {
        let config = Configuration::from_toml_str(
            r#"
            merchant_id = 300200578
            payments_passcode = "pay"
            profiles_passcode = "prof"
            base_url = "http://localhost:8080/api/v1"
            "#,
        )
        .unwrap();

        assert_eq!(config.merchant_id, 300_200_578);
        assert_eq!(config.version, "v1");
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080/api/v1"));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "merchant_id = 42\npayments_passcode = \"pw\"").unwrap();

        let config = Configuration::load(file.path()).unwrap();
        assert_eq!(config.payments_credentials(), Credentials::new(42, "pw"));
    }

    #[test]
    fn test_validation() {
        assert!(Configuration::new(0, "a").validate().is_err());
        assert!(Configuration::new(1, "").validate().is_err());
        assert!(Configuration::new(1, "a").with_version("").validate().is_err());
        assert!(
            Configuration::new(1, "a")
                .with_base_url("ftp://example.com")
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_profiles_credentials_required() {
        let config = Configuration::new(1, "a");
        assert!(config.profiles_credentials().is_err());

        let config = config.with_profiles_passcode("p");
        assert_eq!(config.profiles_credentials().unwrap().merchant_id(), 1);
    }

    #[test]
    fn test_debug_redacts_passcodes() {
        let config = Configuration::new(1, "pay-secret").with_profiles_passcode("prof-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("pay-secret"));
        assert!(!rendered.contains("prof-secret"));
    }
}
