//! Response classification
//!
//! The only split is 2xx versus everything else. Status-specific recovery is
//! left to callers.

use crate::error::{ApiResult, Error};
use crate::transport::RawResponse;
use std::ops::Range;

/// Status codes treated as success
pub const SUCCESS_RANGE: Range<u16> = 200..300;

/// Return the body for a 2xx status, an [`Error::Api`] otherwise
///
/// An absent success body is returned as an empty string.
pub fn classify(status: u16, body: Option<String>) -> ApiResult<String> {
    if SUCCESS_RANGE.contains(&status) {
        Ok(body.unwrap_or_default())
    } else {
        Err(Error::api_response(status, body.as_deref()))
    }
}

/// [`classify`] applied to a [`RawResponse`]
pub fn classify_response(response: RawResponse) -> ApiResult<String> {
    classify(response.status, response.body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_created_returns_body() {
        let body = classify(201, Some(r#"{"id":"10000123"}"#.to_string())).unwrap();
        assert_eq!(body, r#"{"id":"10000123"}"#);
    }

    #[test]
    fn test_empty_success_is_not_an_error() {
        assert_eq!(classify(200, None).unwrap(), "");
        assert_eq!(classify(204, Some(String::new())).unwrap(), "");
    }

    #[test]
    fn test_all_failures_handled_alike() {
        for status in [100, 302, 400, 401, 404, 409, 500, 503] {
            let err = classify(status, Some("nope".to_string())).unwrap_err();
            assert_eq!(err.status(), Some(status));
            assert_eq!(err.message(), "nope");
        }
    }

    #[test]
    fn test_boundaries() {
        assert!(classify(199, None).is_err());
        assert!(classify(200, None).is_ok());
        assert!(classify(299, None).is_ok());
        assert!(classify(300, None).is_err());
    }

    #[test]
    fn test_classify_response() {
        let err = classify_response(RawResponse::new(
            400,
            Some(r#"{"code":17,"category":1,"message":"Invalid card"}"#.to_string()),
        ))
        .unwrap_err();
        assert_eq!(err.message(), "Invalid card");
    }

    proptest! {
        #[test]
        fn test_success_passes_body_through(status in 200u16..300, body in ".*") {
            prop_assert_eq!(classify(status, Some(body.clone())).unwrap(), body);
        }

        #[test]
        fn test_failure_keeps_status(
            status in prop_oneof![0u16..200, 300u16..1000],
            body in proptest::option::of(".*"),
        ) {
            let err = classify(status, body).unwrap_err();
            prop_assert_eq!(err.status(), Some(status));
            prop_assert!(!err.message().is_empty());
        }
    }
}
