use serde::{Deserialize, Serialize};

/// Message shown when a rejected submission carries no usable error list.
pub const GENERIC_REJECTION_MESSAGE: &str = "Oops! There was a problem submitting your form.";

/// One entry of the form backend's `errors` list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormErrorEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FormErrorEntry {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Body of a non-OK response from the form backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormErrorBody {
    #[serde(default)]
    pub errors: Vec<FormErrorEntry>,
}

impl FormErrorBody {
    /// Joins the non-empty messages with `", "`. `None` when there are none.
    pub fn joined_messages(&self) -> Option<String> {
        let messages: Vec<&str> = self
            .errors
            .iter()
            .filter_map(|entry| entry.message.as_deref())
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .collect();
        if messages.is_empty() {
            None
        } else {
            Some(messages.join(", "))
        }
    }

    /// Failure detail for a rejected submission given the raw response body.
    pub fn failure_message(raw_body: Option<&str>) -> String {
        raw_body
            .and_then(|raw| serde_json::from_str::<FormErrorBody>(raw).ok())
            .and_then(|body| body.joined_messages())
            .unwrap_or_else(|| GENERIC_REJECTION_MESSAGE.to_string())
    }
}
