//! Request/response observation hook
//!
//! Observers see the serialized payload and raw response body, so they are
//! opt-in. [`TracingObserver`] runs everything through [`redact`] first.

use crate::transport::HttpMethod;
use serde_json::Value;
use tracing::debug;

/// Keys whose values are always masked
const SECRET_KEYS: &[&str] = &["cvd", "passcode", "password"];

/// Keys masked only inside a `card` or `token` object
const CARD_SECRET_KEYS: &[&str] = &["code"];

/// Replacement for masked values
const MASK: &str = "***";

/// Callback invoked around each executed request
///
/// Must not panic; the return value does not influence control flow.
pub trait RequestObserver: Send + Sync {
    /// Called before the request is sent
    fn on_request(&self, method: HttpMethod, url: &str, payload: Option<&str>);

    /// Called after a response is received
    fn on_response(&self, status: u16, body: Option<&str>);
}

/// Observer that logs redacted payloads at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn on_request(&self, method: HttpMethod, url: &str, payload: Option<&str>) {
        let payload = payload.map(redact);
        debug!(%method, url, payload = payload.as_deref().unwrap_or(""), "Outgoing request");
    }

    fn on_response(&self, status: u16, body: Option<&str>) {
        let body = body.map(redact);
        debug!(status, body = body.as_deref().unwrap_or(""), "Incoming response");
    }
}

/// Mask card data and secrets in a JSON text
///
/// Card numbers keep their last four digits. Text that is not JSON is
/// replaced wholesale, since it cannot be inspected.
#[must_use]
pub fn redact(text: &str) -> String {
    match serde_json::from_str::<Value>(text) {
        Ok(mut value) => {
            redact_value(&mut value, false);
            value.to_string()
        }
        Err(_) if text.is_empty() => String::new(),
        Err(_) => format!("<{} bytes, not JSON>", text.len()),
    }
}

fn redact_value(value: &mut Value, in_card: bool) {
    match value {
        Value::Object(map) => {
            for (key, entry) in map.iter_mut() {
                let key = key.as_str();
                if key == "number" {
                    *entry = Value::String(mask_number(entry));
                } else if SECRET_KEYS.contains(&key) || (in_card && CARD_SECRET_KEYS.contains(&key)) {
                    *entry = Value::String(MASK.to_string());
                } else {
                    redact_value(entry, matches!(key, "card" | "token"));
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                redact_value(item, in_card);
            }
        }
        _ => {}
    }
}

fn mask_number(value: &Value) -> String {
    let digits: String = match value {
        Value::String(s) => s.chars().filter(char::is_ascii_digit).collect(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    };

    if digits.len() > 4 {
        format!("{MASK}{}", &digits[digits.len() - 4..])
    } else {
        MASK.to_string()
    }
}
