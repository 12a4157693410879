use anyhow::{Context, Result};
use url::Url;

/// The page the contact form was opened on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    pub page_url: String,
    /// Non-empty `subject` query parameter, read once on load.
    pub subject: Option<String>,
}

impl PageContext {
    pub fn new(page_url: impl Into<String>, subject: Option<String>) -> Self {
        Self {
            page_url: page_url.into(),
            subject: subject.filter(|subject| !subject.is_empty()),
        }
    }

    pub fn from_url(page_url: &str) -> Result<Self> {
        let parsed =
            Url::parse(page_url).with_context(|| format!("invalid page url '{page_url}'"))?;
        let subject = parsed
            .query_pairs()
            .find(|(key, _)| key == "subject")
            .map(|(_, value)| value.into_owned());
        Ok(Self::new(parsed.as_str(), subject))
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }
}

/// Direct-mail link for the contact address; spaces are encoded as `%20`.
pub fn mailto_href(email: &str, subject: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(subject.as_bytes()).collect();
    format!("mailto:{email}?subject={}", encoded.replace('+', "%20"))
}
