//! Local checks run before any request leaves the process.

use std::sync::LazyLock;

use regex::Regex;

use crate::{EmailRequest, Error, Result};

/// Prefix of production API keys.
pub const API_KEY_PREFIX_LIVE: &str = "mn_live_";
/// Prefix of sandbox API keys.
pub const API_KEY_PREFIX_TEST: &str = "mn_test_";

// Pragmatic check only: quoted local parts, IP literals and IDN domains are rejected.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is valid")
});

/// Check that an API key is non-empty and carries a live or test prefix.
///
/// # Examples
/// ```
/// use mailnow::validate_api_key;
///
/// assert!(validate_api_key("mn_test_abc123").is_ok());
/// assert!(validate_api_key("sk_live_abc123").is_err());
/// ```
pub fn validate_api_key(api_key: &str) -> Result<()> {
    if api_key.is_empty() {
        return Err(Error::validation("API key cannot be empty"));
    }

    if !api_key.starts_with(API_KEY_PREFIX_LIVE) && !api_key.starts_with(API_KEY_PREFIX_TEST) {
        return Err(Error::validation(format!(
            "API key must start with '{API_KEY_PREFIX_LIVE}' or '{API_KEY_PREFIX_TEST}'"
        )));
    }

    Ok(())
}

/// Check that `address` looks like `local@domain.tld`.
pub fn validate_email_address(address: &str) -> Result<()> {
    if address.is_empty() {
        return Err(Error::validation("email address cannot be empty"));
    }

    if !EMAIL_RE.is_match(address) {
        return Err(Error::validation(format!(
            "invalid email address format: {address}"
        )));
    }

    Ok(())
}

/// Validate every required field of a request.
///
/// Fields are checked in order (`from`, `to`, `subject`, `html`) and the
/// first failure is returned.
pub fn validate_email_request(request: Option<&EmailRequest>) -> Result<()> {
    let Some(request) = request else {
        return Err(Error::validation("email request is required"));
    };

    if request.from.is_empty() {
        return Err(Error::validation("from address is required"));
    }
    validate_email_address(&request.from)
        .map_err(|e| Error::validation("invalid from address").with_source(e))?;

    if request.to.is_empty() {
        return Err(Error::validation("to address is required"));
    }
    validate_email_address(&request.to)
        .map_err(|e| Error::validation("invalid to address").with_source(e))?;

    if request.subject.is_empty() {
        return Err(Error::validation("subject is required"));
    }

    if request.html.is_empty() {
        return Err(Error::validation("HTML body is required"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn request() -> EmailRequest {
        EmailRequest::new(
            "sender@example.com",
            "recipient@example.com",
            "Hello",
            "<h1>Hello World</h1>",
        )
    }

    #[test]
    fn accepts_live_and_test_keys() {
        for key in ["mn_live_7e59df7ce4a14545b443837804ec9722", "mn_test_x", "mn_live_"] {
            assert!(validate_api_key(key).is_ok(), "{key}");
        }
    }

    #[test]
    fn rejects_keys_without_known_prefix() {
        for key in ["", "mn_prod_abc", "MN_LIVE_abc", "live_abc", " mn_live_abc", "mn_tes"] {
            let err = validate_api_key(key).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "{key}");
        }
    }

    #[test]
    fn empty_key_has_its_own_message() {
        let err = validate_api_key("").unwrap_err();
        assert_eq!(err.to_string(), "API key cannot be empty");

        let err = validate_api_key("abc").unwrap_err();
        assert_eq!(
            err.to_string(),
            "API key must start with 'mn_live_' or 'mn_test_'"
        );
    }

    #[test]
    fn accepts_common_addresses() {
        for address in [
            "user@example.com",
            "first.last@example.co.uk",
            "user+tag@sub.example.org",
            "user_name%x@example-mail.io",
            "a-b@c.de",
        ] {
            assert!(validate_email_address(address).is_ok(), "{address}");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for address in [
            "",
            "plainaddress",
            "@example.com",
            "user@",
            "user@example",
            "user@example.c",
            "user name@example.com",
            "user@exam ple.com",
            "user@example.c0m",
            "\"quoted\"@example.com",
            "user@[192.168.0.1]",
            "user@bücher.de",
        ] {
            let err = validate_email_address(address).unwrap_err();
            assert!(err.is_validation(), "{address}");
        }
    }

    #[test]
    fn missing_request_is_rejected() {
        let err = validate_email_request(None).unwrap_err();
        assert_eq!(err.to_string(), "email request is required");
    }

    #[test]
    fn valid_request_passes() {
        assert!(validate_email_request(Some(&request())).is_ok());
    }

    #[test]
    fn reports_first_failing_field() {
        let cases = [
            (EmailRequest { from: String::new(), ..request() }, "from address is required"),
            (
                EmailRequest { from: "nope".into(), to: String::new(), ..request() },
                "invalid from address: invalid email address format: nope",
            ),
            (EmailRequest { to: String::new(), ..request() }, "to address is required"),
            (
                EmailRequest { to: "bad@host".into(), ..request() },
                "invalid to address: invalid email address format: bad@host",
            ),
            (
                EmailRequest { subject: String::new(), html: String::new(), ..request() },
                "subject is required",
            ),
            (EmailRequest { html: String::new(), ..request() }, "HTML body is required"),
        ];

        for (req, expected) in cases {
            let err = validate_email_request(Some(&req)).unwrap_err();
            assert!(err.is_validation());
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn invalid_address_wraps_inner_error() {
        use std::error::Error as _;

        let req = EmailRequest { from: "nope".into(), ..request() };
        let err = validate_email_request(Some(&req)).unwrap_err();
        assert_eq!(err.message(), "invalid from address");

        let inner = err
            .source()
            .and_then(|s| s.downcast_ref::<Error>())
            .expect("inner validation error");
        assert!(inner.is_validation());
        assert_eq!(inner.message(), "invalid email address format: nope");
    }

    #[test]
    fn validation_is_repeatable() {
        let req = EmailRequest { subject: String::new(), ..request() };
        let first = validate_email_request(Some(&req)).unwrap_err();
        let second = validate_email_request(Some(&req)).unwrap_err();
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn attachments_are_not_inspected() {
        let req = request().with_attachment(crate::Attachment::new("", "not base64!", ""));
        assert!(validate_email_request(Some(&req)).is_ok());
    }
}
