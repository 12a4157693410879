use serde::{Deserialize, Serialize};

/// Subject line used when the page was opened without a `subject` parameter.
pub const DEFAULT_SUBJECT: &str = "New message from portfolio";
pub const SUBJECT_PREFIX: &str = "Portfolio inquiry: ";

pub fn subject_line(subject: Option<&str>) -> String {
    match subject {
        Some(subject) => format!("{SUBJECT_PREFIX}{subject}"),
        None => DEFAULT_SUBJECT.to_string(),
    }
}

/// Message body pre-filled when the page carries a `subject` parameter.
pub fn prefilled_message(subject: &str) -> String {
    format!("Subject: {subject}\n\n")
}

/// Form-encoded payload posted to the form backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub page_url: String,
    #[serde(rename = "_subject")]
    pub subject: String,
    /// Spam trap read by the form backend; empty for every submission that gets sent.
    #[serde(rename = "_gotcha", default)]
    pub gotcha: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_line_uses_prefix_or_default() {
        assert_eq!(
            subject_line(Some("Freelance work")),
            "Portfolio inquiry: Freelance work"
        );
        assert_eq!(subject_line(None), DEFAULT_SUBJECT);
    }

    #[test]
    fn submission_serializes_with_backend_field_names() {
        let submission = ContactSubmission {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "Hello".into(),
            page_url: "https://example.dev/contact".into(),
            subject: DEFAULT_SUBJECT.into(),
            gotcha: String::new(),
        };
        let value = serde_json::to_value(&submission).expect("serialize");
        assert_eq!(value["_subject"], DEFAULT_SUBJECT);
        assert_eq!(value["_gotcha"], "");
        assert_eq!(value["page_url"], "https://example.dev/contact");
        assert!(value.get("subject").is_none());
    }
}
