use reqwest::header::CONTENT_TYPE;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info};

use super::GeminiError;
use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::config::HttpConfig;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct GeminiClient {
    pub base_url: String,
    api_key: String,
    pub(crate) inner: reqwest::Client,
}

// Keep the key out of logs and `{:?}` output.
impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl GeminiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, GeminiError> {
        let inner = reqwest::Client::builder().build()?;
        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            inner,
        })
    }

    /// Rebuild the HTTP client with connect/request timeouts. No request
    /// timeout is applied unless one is configured.
    pub fn with_http_config(mut self, cfg: &HttpConfig) -> Result<Self, GeminiError> {
        let mut builder =
            reqwest::Client::builder().connect_timeout(Duration::from_millis(cfg.connect_timeout_ms));
        if let Some(ms) = cfg.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        self.inner = builder.build()?;
        Ok(self)
    }

    pub(crate) fn endpoint(&self, model: &str) -> String {
        let mut base = self.base_url.trim_end_matches('/').to_string();
        if let Some(stripped) = base.strip_suffix("/v1beta") {
            base = stripped.trim_end_matches('/').to_string();
        }
        format!("{base}/v1beta/models/{model}:generateContent")
    }

    /// One `generateContent` round trip. Non-success statuses are errors;
    /// there is no retry.
    pub async fn generate_content(
        &self,
        model: &str,
        req: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let url = self.endpoint(model);
        if let Ok(payload) = serde_json::to_string(req) {
            debug!(endpoint = %url, payload_bytes = payload.len(), "sending generateContent payload");
        }

        let resp = self
            .inner
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .json(req)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(status = %status.as_u16(), body = %body, "generateContent non-success status");
            return Err(GeminiError::Status { status, body });
        }

        let text = resp.text().await?;
        let body: GenerateContentResponse = serde_json::from_str(&text)?;
        if let Some(usage) = &body.usage_metadata {
            info!(
                prompt_tokens = ?usage.prompt_token_count,
                total_tokens = ?usage.total_token_count,
                "generateContent usage"
            );
        }
        Ok(body)
    }
}
