//! Pay command - charge or pre-authorize a card

use super::{Context, print_json};
use anyhow::Result;
use beanstream_client::models::{Card, CardPaymentRequest};
use owo_colors::OwoColorize;

/// Arguments of the pay command
pub struct PayArgs {
    pub amount: f64,
    pub card_number: String,
    pub name: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub cvd: Option<String>,
    pub order_number: Option<String>,
    pub pre_auth: bool,
}

impl PayArgs {
    fn into_request(self) -> CardPaymentRequest {
        let mut card = Card::new(self.name, self.card_number, self.expiry_month, self.expiry_year);
        card.cvd = self.cvd;

        let mut request = CardPaymentRequest::new(self.amount, card);
        request.order_number = self.order_number;
        request
    }
}

/// Run pay command
pub async fn run(ctx: &Context, args: PayArgs) -> Result<()> {
    let payments = ctx.client()?.payments()?;
    let pre_auth = args.pre_auth;
    let request = args.into_request();

    let response = if pre_auth {
        payments.pre_auth(request).await?
    } else {
        payments.make_payment(request).await?
    };

    if ctx.is_json() {
        return print_json(&response);
    }

    let status = if response.is_approved() {
        "✓ Approved".green().to_string()
    } else {
        "✗ Declined".red().to_string()
    };
    println!("{status}  {} ({})", response.message, response.kind);
    println!("  Transaction: {}", response.id);
    if let Some(code) = &response.auth_code {
        println!("  Auth code:   {code}");
    }
    if let Some(order) = &response.order_number {
        println!("  Order:       {}", order.dimmed());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_request() {
        let args = PayArgs {
            amount: 12.5,
            card_number: "4030000010001234".to_string(),
            name: "John Doe".to_string(),
            expiry_month: "12".to_string(),
            expiry_year: "28".to_string(),
            cvd: Some("123".to_string()),
            order_number: Some("A-1".to_string()),
            pre_auth: false,
        };

        let request = args.into_request();
        assert_eq!(request.amount, 12.5);
        assert_eq!(request.payment_method, "card");
        assert_eq!(request.card.cvd.as_deref(), Some("123"));
        assert_eq!(request.order_number.as_deref(), Some("A-1"));
    }
}
