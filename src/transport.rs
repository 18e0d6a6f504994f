//! HTTP execution and status classification.
//!
//! [`make_request`] sends one authenticated JSON request and [`handle_response`]
//! turns whatever came back into either the raw success body or a typed
//! [`Error`]. Neither function retries.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::models::ErrorResponse;
use crate::{Error, Result};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Return a token that cancels itself once `timeout` has elapsed.
///
/// Must be called from within a Tokio runtime. A background timer task holds
/// a clone of the token until the deadline passes; call
/// [`CancellationToken::cancel`] once the send has finished to stop it early.
///
/// # Examples
/// ```no_run
/// # use std::time::Duration;
/// # use mailnow::{Client, EmailRequest, cancel_after};
/// # #[tokio::main]
/// # async fn main() -> Result<(), mailnow::Error> {
/// let client = Client::new("mn_test_abc123")?;
/// let request = EmailRequest::new("a@example.com", "b@example.com", "Hi", "<p>Hi</p>");
/// let response = client
///     .send_email(&cancel_after(Duration::from_secs(5)), &request)
///     .await?;
/// # Ok(())
/// # }
/// ```
pub fn cancel_after(timeout: Duration) -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(timeout) => child.cancel(),
            _ = child.cancelled() => {}
        }
    });
    token
}

/// Build and send a single request.
///
/// `body`, when present, is encoded as JSON; an encoding failure is a
/// validation error. Failures to build or send the request, including
/// `cancel` firing before a response arrives, are connection errors. The
/// returned response still has to go through [`handle_response`].
pub async fn make_request<T>(
    cancel: &CancellationToken,
    http: &reqwest::Client,
    method: Method,
    url: &str,
    api_key: &str,
    body: Option<&T>,
) -> Result<reqwest::Response>
where
    T: Serialize + ?Sized,
{
    let payload = body
        .map(serde_json::to_vec)
        .transpose()
        .map_err(|e| Error::validation("failed to encode request body").with_source(e))?;

    let api_key = HeaderValue::from_str(api_key)
        .map_err(|e| Error::connection("failed to create request").with_source(e))?;

    let mut builder = http
        .request(method, url)
        .header(API_KEY_HEADER, api_key)
        .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(payload) = payload {
        builder = builder.body(payload);
    }

    let request = builder
        .build()
        .map_err(|e| Error::connection("failed to create request").with_source(e))?;

    debug!(method = %request.method(), url = %request.url(), "sending request");

    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            warn!("request cancelled before a response was received");
            Err(Error::connection("request cancelled"))
        }
        result = http.execute(request) => {
            result.map_err(|e| Error::connection("failed to send request").with_source(e))
        }
    }
}

/// Read the response body and classify the status.
///
/// 2xx bodies are returned untouched. Anything else becomes an [`Error`]
/// whose message is taken from the API's error body when it has one.
pub async fn handle_response(response: reqwest::Response) -> Result<Bytes> {
    let status = response.status();
    debug!(status = status.as_u16(), "received response");

    // Consumes the response, so the body is released on every path below.
    let body = response
        .bytes()
        .await
        .map_err(|e| Error::connection("failed to read response body").with_source(e))?;

    if status.is_success() {
        return Ok(body);
    }

    let generic = format!("API request failed with status {}", status.as_u16());
    let (code, message) = match serde_json::from_slice::<ErrorResponse>(&body) {
        Ok(ErrorResponse { error }) => {
            let error = error.unwrap_or_default();
            if error.message.is_empty() {
                (error.code, generic)
            } else {
                (error.code, error.message)
            }
        }
        Err(_) => {
            let text = String::from_utf8_lossy(&body);
            match text.trim() {
                "" => (String::new(), generic),
                text => (String::new(), format!("{generic}: {text}")),
            }
        }
    };

    warn!(status = status.as_u16(), code = %code, error = %message, "API returned an error");
    Err(map_status(status, message))
}

/// Map a non-2xx status onto an error kind.
pub(crate) fn map_status(status: StatusCode, message: String) -> Error {
    match status.as_u16() {
        400 => Error::validation(message),
        401 => Error::auth(message),
        429 => Error::rate_limit(message),
        code if code >= 500 => Error::server(message),
        code => Error::server(format!("unexpected status code {code}: {message}")),
    }
}
