//! Error type for the Mailnow client.

use thiserror::Error;

/// Boxed underlying cause carried by an [`Error`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which failure class an [`Error`] belongs to.
///
/// Each kind maps to a distinct remediation for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or missing input, caught before any network call.
    Validation,
    /// The API rejected the credentials (HTTP 401).
    Auth,
    /// The API is rate limiting this key (HTTP 429).
    RateLimit,
    /// 5xx, an unexpected status, or a success body that could not be parsed.
    Server,
    /// Request construction, network failure, timeout or cancellation.
    Connection,
}

/// Error type for all Mailnow client operations.
///
/// Displays as `"<message>: <cause>"` when a cause is attached, otherwise
/// just the message. The cause is reachable through
/// [`std::error::Error::source`].
#[derive(Debug, Error)]
#[error("{message}{}", .source.as_ref().map(|e| format!(": {e}")).unwrap_or_default())]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl Error {
    /// Create an error of the given kind with no underlying cause.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attach an underlying cause.
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub(crate) fn auth(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Auth, message)
    }

    pub(crate) fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateLimit, message)
    }

    pub(crate) fn server(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Server, message)
    }

    pub(crate) fn connection(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Connection, message)
    }

    /// The failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The message without the cause appended.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Input was rejected locally or the API answered 400.
    pub fn is_validation(&self) -> bool {
        self.kind == ErrorKind::Validation
    }

    /// The API rejected the credentials.
    pub fn is_auth(&self) -> bool {
        self.kind == ErrorKind::Auth
    }

    /// The API is rate limiting this key.
    pub fn is_rate_limit(&self) -> bool {
        self.kind == ErrorKind::RateLimit
    }

    /// The API failed or broke its response contract.
    pub fn is_server(&self) -> bool {
        self.kind == ErrorKind::Server
    }

    /// The request never got a response.
    pub fn is_connection(&self) -> bool {
        self.kind == ErrorKind::Connection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_without_cause_is_just_the_message() {
        let err = Error::auth("Invalid API key");
        assert_eq!(err.to_string(), "Invalid API key");
        assert!(err.source().is_none());
    }

    #[test]
    fn display_appends_cause() {
        let inner = Error::validation("invalid email address format: nope");
        let err = Error::validation("invalid from address").with_source(inner);
        assert_eq!(
            err.to_string(),
            "invalid from address: invalid email address format: nope"
        );
        assert_eq!(err.message(), "invalid from address");
    }

    #[test]
    fn source_can_be_downcast() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        let err = Error::connection("failed to send request").with_source(io);

        let source = err.source().expect("cause should be attached");
        let io = source
            .downcast_ref::<std::io::Error>()
            .expect("cause should be an io::Error");
        assert_eq!(io.kind(), std::io::ErrorKind::ConnectionReset);
    }

    #[test]
    fn exactly_one_kind_predicate_holds() {
        let errors = [
            Error::validation("v"),
            Error::auth("a"),
            Error::rate_limit("r"),
            Error::server("s"),
            Error::connection("c"),
        ];

        for err in &errors {
            let matches = [
                err.is_validation(),
                err.is_auth(),
                err.is_rate_limit(),
                err.is_server(),
                err.is_connection(),
            ];
            assert_eq!(matches.iter().filter(|m| **m).count(), 1, "{err:?}");
        }
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<Error>();
    }
}
