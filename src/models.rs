//! Wire types exchanged with the Mailnow API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An email to send.
///
/// `from` and `to` must be valid addresses; `subject` and `html` must be non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmailRequest {
    pub from: String,
    pub to: String,
    pub subject: String,
    /// HTML body of the message.
    pub html: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl EmailRequest {
    /// Create a request without attachments.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            subject: subject.into(),
            html: html.into(),
            attachments: Vec::new(),
        }
    }

    /// Append an attachment.
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

/// A file attached to an [`EmailRequest`].
///
/// `content` is passed through as-is; the API expects base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub filename: String,
    pub content: String,
    pub content_type: String,
}

impl Attachment {
    pub fn new(
        filename: impl Into<String>,
        content: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            content_type: content_type.into(),
        }
    }
}

/// Successful response to a send request.
///
/// Missing fields take their default value; only a body that is not JSON or
/// has wrongly typed fields is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmailResponse {
    pub success: bool,
    pub message: String,
    /// HTTP status echoed by the API.
    pub status_code: i64,
    pub data: EmailData,
}

/// Delivery details for an accepted email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmailData {
    pub message_id: String,
    /// Remote delivery state, e.g. `"sent"` or `"queued"`.
    pub status: String,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub error: Option<ErrorDetail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    #[allow(dead_code)]
    pub details: Option<Map<String, Value>>,
}
