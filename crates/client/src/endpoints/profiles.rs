//! Payment profile endpoints
//!
//! A profile stores a customer's billing details and one or more cards. It
//! can be created from a card or from a single-use token; in the token case
//! the profile may hold no card at all.

use super::decode;
use crate::config::Configuration;
use crate::error::{ApiResult, Error};
use crate::executor::TransactionExecutor;
use crate::models::{
    Address, Card, CustomFields, PaymentProfile, ProfileCardsResponse, ProfileRequest,
    ProfileResponse, ProfileUpdate, Token,
};
use crate::transport::{HttpMethod, Transport};
use crate::urls::Endpoints;
use crate::validation::{
    validate_billing, validate_card, validate_card_id, validate_profile_id,
    validate_profile_request,
};
use std::sync::Arc;
use tracing::instrument;

/// What a new profile is created from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSource {
    /// A full card
    Card(Card),
    /// A single-use token
    Token(Token),
}

/// Optional profile attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileExtras {
    /// Custom reference fields
    pub custom: Option<CustomFields>,
    /// Profile language
    pub language: Option<String>,
    /// Comments
    pub comments: Option<String>,
}

/// Payment profiles API interface
#[derive(Clone)]
pub struct ProfilesApi {
    executor: TransactionExecutor,
    endpoints: Endpoints,
}

impl ProfilesApi {
    /// Create a profiles interface using the profiles passcode
    pub fn new(config: &Configuration, transport: Arc<dyn Transport>) -> ApiResult<Self> {
        config.validate()?;
        let credentials = config.profiles_credentials()?;
        Ok(Self {
            executor: TransactionExecutor::new(&credentials, transport)?,
            endpoints: Endpoints::new(config),
        })
    }

    pub(crate) fn from_parts(executor: TransactionExecutor, config: &Configuration) -> Self {
        Self {
            executor,
            endpoints: Endpoints::new(config),
        }
    }

    /// Create a profile
    ///
    /// POST /profiles
    #[instrument(skip_all)]
    pub async fn create_profile(
        &self,
        source: ProfileSource,
        billing: Option<Address>,
        extras: ProfileExtras,
    ) -> ApiResult<ProfileResponse> {
        let (card, token) = match source {
            ProfileSource::Card(card) => (Some(card), None),
            ProfileSource::Token(token) => (None, Some(token)),
        };
        let request = ProfileRequest {
            card,
            token,
            billing,
            custom: extras.custom,
            language: extras.language,
            comments: extras.comments,
        };
        validate_profile_request(&request)?;

        self.send(HttpMethod::Post, &self.endpoints.profiles(), Some(&request))
            .await
    }

    /// Fetch a profile; required before updating it
    ///
    /// GET /profiles/{id}
    #[instrument(skip(self))]
    pub async fn get_profile(&self, profile_id: &str) -> ApiResult<PaymentProfile> {
        validate_profile_id(profile_id)?;
        self.send(HttpMethod::Get, &self.endpoints.profile(profile_id), None::<&()>)
            .await
    }

    /// Delete a profile
    ///
    /// DELETE /profiles/{id}
    #[instrument(skip(self))]
    pub async fn delete_profile(&self, profile_id: &str) -> ApiResult<ProfileResponse> {
        validate_profile_id(profile_id)?;
        self.send(HttpMethod::Delete, &self.endpoints.profile(profile_id), None::<&()>)
            .await
    }

    /// Update billing, custom fields, language, and comments of a profile
    ///
    /// PUT /profiles/{id}
    #[instrument(skip_all, fields(profile_id = %profile.id))]
    pub async fn update_profile(&self, profile: &PaymentProfile) -> ApiResult<ProfileResponse> {
        validate_profile_id(&profile.id)?;
        if profile.billing.is_none() {
            return Err(Error::validation("profile billing address is missing"));
        }
        validate_billing(profile.billing.as_ref())?;

        let update = ProfileUpdate::from(profile);
        self.send(HttpMethod::Put, &self.endpoints.profile(&profile.id), Some(&update))
            .await
    }

    /// All cards on a profile
    ///
    /// GET /profiles/{id}/cards
    #[instrument(skip(self))]
    pub async fn get_cards(&self, profile_id: &str) -> ApiResult<Vec<Card>> {
        validate_profile_id(profile_id)?;
        let response: ProfileCardsResponse = self
            .send(HttpMethod::Get, &self.endpoints.profile_cards(profile_id), None::<&()>)
            .await?;
        Ok(response.cards)
    }

    /// One card on a profile; card IDs are 1-based indexes into [`Self::get_cards`]
    ///
    /// GET /profiles/{id}/cards/{card_id}
    #[instrument(skip(self))]
    pub async fn get_card(&self, profile_id: &str, card_id: &str) -> ApiResult<Option<Card>> {
        validate_profile_id(profile_id)?;
        validate_card_id(card_id)?;
        let response: ProfileCardsResponse = self
            .send(
                HttpMethod::Get,
                &self.endpoints.profile_card(profile_id, card_id),
                None::<&()>,
            )
            .await?;
        Ok(response.cards.into_iter().next())
    }

    /// Replace a stored card; `card.id` selects which one
    ///
    /// PUT /profiles/{id}/cards/{card_id}
    #[instrument(skip(self, card))]
    pub async fn update_card(&self, profile_id: &str, card: &Card) -> ApiResult<ProfileResponse> {
        validate_profile_id(profile_id)?;
        let card_id = card
            .id
            .as_deref()
            .ok_or_else(|| Error::validation("card id is empty"))?;
        validate_card_id(card_id)?;
        validate_card(card)?;

        let url = self.endpoints.profile_card(profile_id, card_id);
        self.send(HttpMethod::Put, &url, Some(&card.without_id()))
            .await
    }

    /// Append a card to a profile
    ///
    /// The merchant account's card limit applies (one card by default).
    ///
    /// POST /profiles/{id}/cards
    #[instrument(skip(self, card))]
    pub async fn add_card(&self, profile_id: &str, card: &Card) -> ApiResult<ProfileResponse> {
        validate_profile_id(profile_id)?;
        validate_card(card)?;
        self.send(HttpMethod::Post, &self.endpoints.profile_cards(profile_id), Some(card))
            .await
    }

    /// Remove a card from a profile
    ///
    /// DELETE /profiles/{id}/cards/{card_id}
    #[instrument(skip(self))]
    pub async fn remove_card(&self, profile_id: &str, card_id: &str) -> ApiResult<ProfileResponse> {
        validate_profile_id(profile_id)?;
        validate_card_id(card_id)?;
        self.send(
            HttpMethod::Delete,
            &self.endpoints.profile_card(profile_id, card_id),
            None::<&()>,
        )
        .await
    }

    async fn send<T, P>(&self, method: HttpMethod, url: &str, payload: Option<&P>) -> ApiResult<T>
    where
        T: serde::de::DeserializeOwned,
        P: serde::Serialize + ?Sized,
    {
        let body = self.executor.execute(method, url, payload).await?;
        decode(&body)
    }
}
