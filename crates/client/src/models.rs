//! Request and response types
//!
//! Field names follow the service's snake_case JSON. Optional fields are
//! left out of serialized requests.

use serde::{Deserialize, Serialize};

/// A payment card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Card index on a profile (1-based); only set for stored cards
    #[serde(rename = "card_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Cardholder name
    #[serde(default)]
    pub name: String,
    /// Card number (masked in responses)
    #[serde(default)]
    pub number: String,
    /// Two-digit expiry month
    #[serde(default)]
    pub expiry_month: String,
    /// Two-digit expiry year
    #[serde(default)]
    pub expiry_year: String,
    /// Card verification digits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvd: Option<String>,
    /// `true` for a purchase, `false` for a pre-authorization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete: Option<bool>,
    /// Card brand code (VI, MC, AM, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    /// Debit/credit indicator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
}

impl Card {
    /// Create a card from its required fields
    pub fn new(
        name: impl Into<String>,
        number: impl Into<String>,
        expiry_month: impl Into<String>,
        expiry_year: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
            expiry_month: expiry_month.into(),
            expiry_year: expiry_year.into(),
            ..Self::default()
        }
    }

    /// Builder-style method to set the CVD
    #[must_use]
    pub fn with_cvd(mut self, cvd: impl Into<String>) -> Self {
        self.cvd = Some(cvd.into());
        self
    }

    /// Copy of this card without its profile index
    #[must_use]
    pub fn without_id(&self) -> Self {
        Self {
            id: None,
            ..self.clone()
        }
    }
}

/// Billing or shipping address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Name on the address
    #[serde(default)]
    pub name: String,
    /// First address line
    #[serde(default)]
    pub address_line1: String,
    /// Second address line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    /// City
    #[serde(default)]
    pub city: String,
    /// Province or state code
    #[serde(default)]
    pub province: String,
    /// ISO country code
    #[serde(default)]
    pub country: String,
    /// Postal or ZIP code
    #[serde(default)]
    pub postal_code: String,
    /// Phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
}

/// Single-use token from the hosted tokenization script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Cardholder name
    pub name: String,
    /// Token value
    pub code: String,
    /// `true` for a purchase, `false` for a pre-authorization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete: Option<bool>,
}

impl Token {
    /// Create a token
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            complete: None,
        }
    }
}

/// Merchant-defined reference fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFields {
    /// Custom field 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref1: Option<String>,
    /// Custom field 2
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref2: Option<String>,
    /// Custom field 3
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref3: Option<String>,
    /// Custom field 4
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref4: Option<String>,
    /// Custom field 5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref5: Option<String>,
}

// ============================================================================
// Payments
// ============================================================================

/// Card payment request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardPaymentRequest {
    /// Merchant ID, stamped from the configuration before sending
    #[serde(default)]
    pub merchant_id: String,
    /// Merchant order number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    /// Amount in the account currency
    pub amount: f64,
    /// Always `"card"`
    pub payment_method: String,
    /// Card to charge
    pub card: Card,
    /// Billing address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing: Option<Address>,
    /// Shipping address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<Address>,
    /// Free-form comments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    /// Custom reference fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomFields>,
}

impl CardPaymentRequest {
    /// Create a card payment for an amount
    pub fn new(amount: f64, card: Card) -> Self {
        Self {
            merchant_id: String::new(),
            order_number: None,
            amount,
            payment_method: "card".to_string(),
            card,
            billing: None,
            shipping: None,
            comments: None,
            custom: None,
        }
    }

    /// Builder-style method to set the order number
    #[must_use]
    pub fn with_order_number(mut self, order_number: impl Into<String>) -> Self {
        self.order_number = Some(order_number.into());
        self
    }

    /// Builder-style method to set the billing address
    #[must_use]
    pub fn with_billing(mut self, billing: Address) -> Self {
        self.billing = Some(billing);
        self
    }
}

/// Card summary echoed in a payment response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCard {
    /// Card brand code
    #[serde(default)]
    pub card_type: Option<String>,
    /// Last four digits
    #[serde(default)]
    pub last_four: Option<String>,
    /// CVD check result
    #[serde(default)]
    pub cvd_match: Option<i32>,
    /// AVS address check result
    #[serde(default)]
    pub address_match: Option<i32>,
    /// AVS postal code check result
    #[serde(default)]
    pub postal_result: Option<i32>,
}

/// HATEOAS link on a payment response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Relation (`void`, `complete`, `return`, ...)
    pub rel: String,
    /// Target URL
    pub href: String,
    /// HTTP method
    pub method: String,
}

/// Payment result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResponse {
    /// Transaction ID
    pub id: String,
    /// `"1"` when approved
    #[serde(default)]
    pub approved: String,
    /// Message ID
    #[serde(default)]
    pub message_id: String,
    /// Processor message
    #[serde(default)]
    pub message: String,
    /// Authorization code
    #[serde(default)]
    pub auth_code: Option<String>,
    /// Creation timestamp
    #[serde(default)]
    pub created: Option<String>,
    /// Merchant order number
    #[serde(default)]
    pub order_number: Option<String>,
    /// Transaction type (`P` purchase, `PA` pre-auth, ...)
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Payment method used
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Card summary
    #[serde(default)]
    pub card: Option<PaymentCard>,
    /// Follow-up actions
    #[serde(default)]
    pub links: Vec<Link>,
}

impl PaymentResponse {
    /// Check if the payment was approved
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.approved == "1"
    }
}

// ============================================================================
// Profiles
// ============================================================================

/// Body of a create-profile request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRequest {
    /// Card to store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    /// Single-use token to store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<Token>,
    /// Billing address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing: Option<Address>,
    /// Custom reference fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomFields>,
    /// Profile language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Comments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// Generic profile operation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// Result code (1 = success)
    pub code: i32,
    /// Result message
    #[serde(default)]
    pub message: String,
    /// Profile ID, on create
    #[serde(default)]
    pub customer_code: Option<String>,
}

/// A stored payment profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentProfile {
    /// Profile ID
    #[serde(rename = "customer_code", alias = "id", default)]
    pub id: String,
    /// Billing address
    #[serde(default)]
    pub billing: Option<Address>,
    /// Custom reference fields
    #[serde(default)]
    pub custom: Option<CustomFields>,
    /// Profile language
    #[serde(default)]
    pub language: Option<String>,
    /// Comments
    #[serde(default)]
    pub comments: Option<String>,
    /// Default card
    #[serde(default)]
    pub card: Option<Card>,
}

/// PUT body for a profile update; the id travels in the URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate<'a> {
    /// Billing address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing: Option<&'a Address>,
    /// Custom reference fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<&'a CustomFields>,
    /// Profile language
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<&'a str>,
    /// Comments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<&'a str>,
}

impl<'a> From<&'a PaymentProfile> for ProfileUpdate<'a> {
    fn from(profile: &'a PaymentProfile) -> Self {
        Self {
            billing: profile.billing.as_ref(),
            custom: profile.custom.as_ref(),
            language: profile.language.as_deref(),
            comments: profile.comments.as_deref(),
        }
    }
}

/// Cards stored on a profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileCardsResponse {
    /// Result code
    #[serde(default)]
    pub code: Option<i32>,
    /// Result message
    #[serde(default)]
    pub message: Option<String>,
    /// Cards, in index order
    #[serde(rename = "card", default)]
    pub cards: Vec<Card>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payment_request_omits_empty_fields() {
        let request = CardPaymentRequest::new(
            10.0,
            Card::new("John Doe", "4030000010001234", "12", "28").with_cvd("123"),
        );
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "merchant_id": "",
                "amount": 10.0,
                "payment_method": "card",
                "card": {
                    "name": "John Doe",
                    "number": "4030000010001234",
                    "expiry_month": "12",
                    "expiry_year": "28",
                    "cvd": "123"
                }
            })
        );
    }

    #[test]
    fn test_payment_response_deserialize() {
        let json = r#"{
            "id": "10000123",
            "approved": "1",
            "message_id": "1",
            "message": "Approved",
            "auth_code": "TEST",
            "created": "2015-01-01T12:00:00",
            "type": "P",
            "payment_method": "CC",
            "card": {"card_type": "VI", "last_four": "1234", "cvd_match": 1},
            "links": [{"rel": "void", "href": "https://www.beanstream.com/api/v1/payments/10000123/void", "method": "POST"}]
        }"#;

        let response: PaymentResponse = serde_json::from_str(json).unwrap();
        assert!(response.is_approved());
        assert_eq!(response.kind, "P");
        assert_eq!(response.card.unwrap().last_four.as_deref(), Some("1234"));
        assert_eq!(response.links[0].rel, "void");
    }

    #[test]
    fn test_profile_cards_deserialize() {
        let json = r#"{
            "code": 1,
            "message": "Operation Successful",
            "card": [
                {"card_id": "1", "function": "D", "name": "John Doe", "number": "4030********1234",
                 "expiry_month": "12", "expiry_year": "28", "card_type": "VI"}
            ]
        }"#;

        let response: ProfileCardsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.cards.len(), 1);
        assert_eq!(response.cards[0].id.as_deref(), Some("1"));
        assert_eq!(response.cards[0].function.as_deref(), Some("D"));
    }

    #[test]
    fn test_card_without_id_drops_index() {
        let mut card = Card::new("John", "4030000010001234", "01", "30");
        card.id = Some("2".to_string());

        let value = serde_json::to_value(card.without_id()).unwrap();
        assert!(value.get("card_id").is_none());
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_profile_update_from_profile() {
        let profile = PaymentProfile {
            id: "AB12".to_string(),
            language: Some("en".to_string()),
            comments: Some("vip".to_string()),
            ..PaymentProfile::default()
        };

        let value = serde_json::to_value(ProfileUpdate::from(&profile)).unwrap();
        assert_eq!(
            value,
            json!({"language": "en", "comments": "vip"})
        );
    }

    #[test]
    fn test_payment_profile_reads_customer_code() {
        let profile: PaymentProfile =
            serde_json::from_str(r#"{"customer_code":"AB12","language":"en","code":1}"#).unwrap();
        assert_eq!(profile.id, "AB12");
    }
}
