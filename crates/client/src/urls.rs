//! Endpoint URLs derived from a [`Configuration`]

use crate::config::Configuration;

/// URL builder for one configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    root: String,
}

impl Endpoints {
    /// Derive the API root from the configuration
    #[must_use]
    pub fn new(config: &Configuration) -> Self {
        let root = match config.base_url {
            Some(ref url) => url.trim_end_matches('/').to_string(),
            None => format!(
                "https://{}.beanstream.com/api/{}",
                config.platform, config.version
            ),
        };
        Self { root }
    }

    /// API root, without a trailing slash
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// `{root}/payments`
    #[must_use]
    pub fn payments(&self) -> String {
        format!("{}/payments", self.root)
    }

    /// `{root}/profiles`
    #[must_use]
    pub fn profiles(&self) -> String {
        format!("{}/profiles", self.root)
    }

    /// `{root}/profiles/{profile_id}`
    #[must_use]
    pub fn profile(&self, profile_id: &str) -> String {
        format!("{}/profiles/{profile_id}", self.root)
    }

    /// `{root}/profiles/{profile_id}/cards`
    #[must_use]
    pub fn profile_cards(&self, profile_id: &str) -> String {
        format!("{}/profiles/{profile_id}/cards", self.root)
    }

    /// `{root}/profiles/{profile_id}/cards/{card_id}`
    #[must_use]
    pub fn profile_card(&self, profile_id: &str, card_id: &str) -> String {
        format!("{}/profiles/{profile_id}/cards/{card_id}", self.root)
    }
}
