//! # Mailnow Client
//! Asynchronous client for the Mailnow transactional email HTTP API: validate an [`EmailRequest`] locally, send it with [`Client::send_email`], and get back either an [`EmailResponse`] or a typed [`Error`].
//!
//! ## Audience and uses
//! For Rust services that send transactional mail (sign-up confirmations, receipts, alerts) through Mailnow. Create one [`Client`] with an API key, share it across tasks, and call [`Client::send_email`] per message.
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest` with a 30 second default timeout. Every send takes a [`CancellationToken`]; cancelling it before the response arrives aborts the call. [`cancel_after`] builds a token with a deadline.
//!
//! ## Out of scope
//! Not an SMTP client or MIME builder, and there is no retry, queueing or delivery tracking. Each call makes exactly one attempt; retry policy belongs to the caller.
//!
//! ## Errors
//! Every failure is an [`Error`] with one [`ErrorKind`]:
//! - [`ErrorKind::Validation`]: bad input, caught before any request is sent, or HTTP 400.
//! - [`ErrorKind::Auth`]: HTTP 401.
//! - [`ErrorKind::RateLimit`]: HTTP 429.
//! - [`ErrorKind::Server`]: 5xx, an unexpected status, or a success body that does not parse.
//! - [`ErrorKind::Connection`]: network failure, timeout or cancellation.
//!
//! ## Logging
//! Emits `tracing` events and spans; install a subscriber to see them.
//!
//! ## Example
//! ```no_run
//! use mailnow::{CancellationToken, Client, EmailRequest, ErrorKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mailnow::Error> {
//!     let client = Client::new("mn_live_your_api_key")?;
//!     let request = EmailRequest::new(
//!         "sender@example.com",
//!         "recipient@example.com",
//!         "Hello",
//!         "<h1>Hello World</h1>",
//!     );
//!
//!     match client.send_email(&CancellationToken::new(), &request).await {
//!         Ok(response) => println!("Email sent: {}", response.data.message_id),
//!         Err(e) if e.kind() == ErrorKind::RateLimit => eprintln!("slow down: {e}"),
//!         Err(e) => return Err(e),
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod models;
mod transport;
mod validation;

pub use client::{
    API_BASE_URL, API_KEY_ENV, API_VERSION, Client, ClientBuilder, EMAIL_SEND_ENDPOINT,
    REQUEST_TIMEOUT,
};
pub use error::{BoxError, Error, ErrorKind};
pub use models::{Attachment, EmailData, EmailRequest, EmailResponse};
pub use tokio_util::sync::CancellationToken;
pub use transport::{API_KEY_HEADER, cancel_after, handle_response, make_request};
pub use validation::{
    API_KEY_PREFIX_LIVE, API_KEY_PREFIX_TEST, validate_api_key, validate_email_address,
    validate_email_request,
};

/// Result type alias for Mailnow operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
