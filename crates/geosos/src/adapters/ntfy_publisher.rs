// Rust guideline compliant 2026-10-16

//! ntfy adapter for the `Publisher` port.
//!
//! Publishes with `POST {base}/{topic}`, the alert body as plain text. Any
//! subscriber of the topic (phone app, e-mail forward, webhook) receives it.
//! The JSON answer carries the message `id`.

use domain::{PublishError, Publisher};
use serde::Deserialize;

/// ASCII title; header values cannot carry the emoji of the alert body.
const TITLE: &str = "SOS Emergency Alert";

/// Rendered by ntfy clients as the siren emoji.
const TAGS: &str = "rotating_light";

/// `Publisher` adapter backed by an ntfy server.
#[derive(Debug, Clone)]
pub struct NtfyPublisher {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl NtfyPublisher {
    /// Create a publisher for the server at `base_url`.
    ///
    /// `token` is sent as a bearer credential when set.
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str, token: Option<String>) -> Self {
        Self { client, base_url: base_url.trim_end_matches('/').to_owned(), token }
    }
}

#[derive(Deserialize)]
struct PublishResponse {
    id: Option<String>,
}

impl Publisher for NtfyPublisher {
    /// Publish `body` to `topic` at high priority.
    ///
    /// A 2xx answer without a readable `id` still counts as delivered and
    /// yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::Unavailable` when the server cannot be reached,
    /// or `PublishError::Rejected` for any non-2xx answer.
    async fn publish(&self, topic: &str, body: &str) -> Result<Option<String>, PublishError> {
        let mut request = self
            .client
            .post(format!("{}/{topic}", self.base_url))
            .header("Title", TITLE)
            .header("Tags", TAGS)
            .header("Priority", "urgent")
            .body(body.to_owned());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "ntfy.request.failed");
            PublishError::Unavailable { reason: e.to_string() }
        })?;

        let status = response.status();
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_default();
            tracing::warn!(%status, %reason, "ntfy.publish.rejected");
            return Err(PublishError::Rejected { status: status.as_u16(), reason });
        }

        match response.json::<PublishResponse>().await {
            Ok(parsed) => Ok(parsed.id.filter(|id| !id.is_empty())),
            Err(e) => {
                tracing::warn!(error = %e, "ntfy.publish.unreadable_id");
                Ok(None)
            }
        }
    }
}
