//! Client-side request checks
//!
//! These run before any request is built and fail with
//! [`Error::Validation`].

use crate::error::{ApiResult, Error};
use crate::models::{Address, Card, ProfileRequest, Token};

fn require(value: &str, message: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        Err(Error::validation(message))
    } else {
        Ok(())
    }
}

/// IDs become single path segments, so only `[A-Za-z0-9_-]` is allowed
fn require_segment(value: &str, name: &str) -> ApiResult<()> {
    require(value, &format!("{name} is empty"))?;
    if value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "{name} contains invalid characters: {value:?}"
        )))
    }
}

/// Profile IDs must be non-empty and path-safe
pub fn validate_profile_id(profile_id: &str) -> ApiResult<()> {
    require_segment(profile_id, "profile id")
}

/// Card IDs must be non-empty and path-safe
pub fn validate_card_id(card_id: &str) -> ApiResult<()> {
    require_segment(card_id, "card id")
}

/// Cards need a name, number, and expiry
pub fn validate_card(card: &Card) -> ApiResult<()> {
    require(&card.name, "card name is empty")?;
    require(&card.number, "card number is empty")?;
    require(&card.expiry_month, "card expiry month is empty")?;
    require(&card.expiry_year, "card expiry year is empty")
}

/// Tokens need a name and code
pub fn validate_token(token: &Token) -> ApiResult<()> {
    require(&token.name, "token name is empty")?;
    require(&token.code, "token code is empty")
}

/// Billing addresses, when given, need name, street, city, and country
pub fn validate_billing(billing: Option<&Address>) -> ApiResult<()> {
    let Some(billing) = billing else {
        return Ok(());
    };
    require(&billing.name, "billing name is empty")?;
    require(&billing.address_line1, "billing address line 1 is empty")?;
    require(&billing.city, "billing city is empty")?;
    require(&billing.country, "billing country is empty")
}

/// Exactly one of card or token, each valid, plus a valid billing address
pub fn validate_profile_request(request: &ProfileRequest) -> ApiResult<()> {
    match (&request.card, &request.token) {
        (Some(card), None) => validate_card(card)?,
        (None, Some(token)) => validate_token(token)?,
        (Some(_), Some(_)) => {
            return Err(Error::validation("profile needs a card or a token, not both"));
        }
        (None, None) => return Err(Error::validation("profile needs a card or a token")),
    }
    validate_billing(request.billing.as_ref())
}
