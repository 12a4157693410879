use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client};
use shared::protocol::ContactSubmission;
use tracing::debug;

use crate::error::TransportError;

/// Status and raw body of a form backend response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendResponse {
    pub status: u16,
    pub body: Option<String>,
}

impl BackendResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait FormBackend: Send + Sync {
    async fn post_submission(
        &self,
        submission: &ContactSubmission,
    ) -> Result<BackendResponse, TransportError>;
}

/// Posts submissions form-encoded to a hosted form endpoint.
pub struct HttpFormBackend {
    http: Client,
    endpoint: String,
}

impl HttpFormBackend {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl FormBackend for HttpFormBackend {
    async fn post_submission(
        &self,
        submission: &ContactSubmission,
    ) -> Result<BackendResponse, TransportError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .form(submission)
            .send()
            .await?;
        let status = response.status().as_u16();
        // An unreadable body is treated like a missing one.
        let body = response.text().await.ok().filter(|body| !body.is_empty());
        debug!(endpoint = %self.endpoint, status, "form backend responded");
        Ok(BackendResponse { status, body })
    }
}
