use shared::domain::FieldKey;
use thiserror::Error;

/// Fallback for transport failures that carry no message of their own.
pub const GENERIC_NETWORK_MESSAGE: &str =
    "Failed to send message. Please try again or email me directly.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("required fields are empty: {}", join_fields(.fields))]
    MissingRequired { fields: Vec<FieldKey> },
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    /// Honeypot was filled in. Never shown to the visitor.
    #[error("submission suppressed by honeypot check")]
    SpamSuppressed,
    #[error("{message}")]
    SubmissionRejected { status: u16, message: String },
    #[error("{0}")]
    SubmissionNetworkError(String),
}

impl ContactError {
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, ContactError::SpamSuppressed)
    }
}

fn join_fields(fields: &[FieldKey]) -> String {
    fields
        .iter()
        .map(|field| field.input_name())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    /// Primary clipboard missing or failing; the copy falls back to a scratch selection.
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("copy failed ({reason}); please copy manually: {text}")]
    FallbackFailed { text: String, reason: String },
}

/// Failure below the HTTP status level: connect, TLS, body read.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    #[source]
    pub source: Option<reqwest::Error>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        Self {
            message: value.to_string(),
            source: Some(value),
        }
    }
}
