use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::errors::{DietError, Result};
use crate::prompt::GenerationPrompt;
use crate::wire::{GenerateRequest, GenerateResponse};

/// Gemini-style `generateContent` client. The endpoint is opaque: it may be a
/// full URL with the key already embedded, in which case `api_key` is `None`.
pub struct GeminiProvider {
    endpoint: String,
    api_key: Option<String>,
    client: Client,
}

impl GeminiProvider {
    pub fn new(endpoint: String, api_key: Option<String>) -> Self {
        Self {
            endpoint,
            api_key,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl super::Provider for GeminiProvider {
    async fn generate(&self, prompt: &GenerationPrompt) -> Result<String> {
        let body = GenerateRequest::text(prompt.as_str());
        debug!(
            body = %serde_json::to_string_pretty(&body).unwrap_or_default(),
            "POST generateContent"
        );

        let mut req = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            req = req.header("x-goog-api-key", key);
        }

        let resp = req.send().await.map_err(|e| {
            warn!(error = %e, "generation request failed");
            DietError::from(e)
        })?;

        let status = resp.status();
        let text = resp.text().await?;
        debug!(%status, raw = %text, "generation response");

        if !status.is_success() {
            warn!(%status, "generation endpoint returned an error status");
            return Err(DietError::Status { status: status.as_u16(), body: text });
        }

        candidate_text(&text)
    }
}

/// Pull the generated text out of a raw response body.
pub fn candidate_text(body: &str) -> Result<String> {
    let parsed: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| DietError::Envelope(format!("response body is not an envelope: {e}")))?;

    parsed
        .first_text()
        .map(str::to_string)
        .ok_or_else(|| DietError::Envelope("no candidate text in response".into()))
}
