//! Mailnow async client implementation.

use std::env::VarError;
use std::fmt;
use std::time::Duration;

use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::transport::{handle_response, make_request};
use crate::validation::{validate_api_key, validate_email_request};
use crate::{EmailRequest, EmailResponse, Error, Result};

/// Production host of the Mailnow API.
pub const API_BASE_URL: &str = "https://api.mailnow.xyz";
/// API version segment used by [`EMAIL_SEND_ENDPOINT`].
pub const API_VERSION: &str = "v1";
/// Path of the send endpoint, relative to the base URL.
pub const EMAIL_SEND_ENDPOINT: &str = "/v1/email/send";
/// Default HTTP timeout for every request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Environment variable read by [`Client::from_env`].
pub const API_KEY_ENV: &str = "MAILNOW_API_KEY";

const USER_AGENT_VALUE: &str = concat!("mailnow-rust/", env!("CARGO_PKG_VERSION"));

/// Async client for the Mailnow email API.
///
/// Cheap to share: wrap it in an `Arc` or clone it, and send from as many
/// tasks as needed. The underlying connection pool is shared.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl Client {
    /// Create a client with the default base URL and a 30 second timeout.
    ///
    /// Fails with a validation error if `api_key` does not start with
    /// `mn_live_` or `mn_test_`. No network traffic happens here.
    ///
    /// # Examples
    /// ```
    /// # use mailnow::Client;
    /// let client = Client::new("mn_live_7e59df7ce4a14545b443837804ec9722")?;
    /// # Ok::<(), mailnow::Error>(())
    /// ```
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(api_key).build()
    }

    /// Create a builder for configuring the client.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Create a client from the `MAILNOW_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        Self::new(api_key_from_var(std::env::var(API_KEY_ENV))?)
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send an email.
    ///
    /// The request is validated first; an invalid request never reaches the
    /// network. Exactly one HTTP attempt is made. If `cancel` fires before the
    /// response arrives the call fails with a connection error.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailnow::{Client, EmailRequest};
    /// # use mailnow::CancellationToken;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailnow::Error> {
    /// let client = Client::new("mn_live_your_api_key")?;
    /// let request = EmailRequest::new(
    ///     "sender@example.com",
    ///     "recipient@example.com",
    ///     "Hello",
    ///     "<h1>Hello World</h1>",
    /// );
    /// let response = client.send_email(&CancellationToken::new(), &request).await?;
    /// println!("sent: {}", response.data.message_id);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip_all, fields(to = %request.to))]
    pub async fn send_email(
        &self,
        cancel: &CancellationToken,
        request: &EmailRequest,
    ) -> Result<EmailResponse> {
        validate_email_request(Some(request))?;

        let url = format!("{}{}", self.base_url, EMAIL_SEND_ENDPOINT);
        let response = make_request(
            cancel,
            &self.http,
            Method::POST,
            &url,
            &self.api_key,
            Some(request),
        )
        .await?;
        let body = handle_response(response).await?;

        let parsed: EmailResponse = serde_json::from_slice(&body)
            .map_err(|e| Error::server("failed to parse response").with_source(e))?;

        debug!(
            message_id = %parsed.data.message_id,
            status = %parsed.data.status,
            "email accepted"
        );
        Ok(parsed)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Builder for configuring a Mailnow client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Clone)]
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - Base URL `https://api.mailnow.xyz`
    /// - 30 second request timeout
    /// - `mailnow-rust/<version>` user agent
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: API_BASE_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
            user_agent: USER_AGENT_VALUE.to_string(),
        }
    }

    /// Override the API base URL.
    ///
    /// Useful for testing against a mock server. A trailing slash is dropped.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Override the request timeout (default: 30 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate the API key and build the client.
    pub fn build(self) -> Result<Client> {
        validate_api_key(&self.api_key)?;

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .build()
            .map_err(|e| Error::connection("failed to build HTTP client").with_source(e))?;

        Ok(Client {
            http,
            api_key: self.api_key,
            base_url: self.base_url,
        })
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn api_key_from_var(var: std::result::Result<String, VarError>) -> Result<String> {
    match var {
        Ok(key) => Ok(key),
        Err(VarError::NotPresent) => Ok(String::new()),
        Err(e @ VarError::NotUnicode(_)) => {
            Err(Error::validation(format!("{API_KEY_ENV} is not valid unicode")).with_source(e))
        }
    }
}

/// Keep the key prefix visible, hide the secret part.
fn redact(api_key: &str) -> String {
    match api_key.get(..8) {
        Some(prefix) if api_key.len() > 8 => format!("{prefix}***"),
        _ => "***".to_string(),
    }
}
