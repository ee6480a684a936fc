use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use super::prompt::build_request;
use crate::config::AppConfig;
use crate::gemini::{GeminiClient, GeminiError};
use crate::groups::{Category, Group};

/// Anything that can answer a search instruction with a list of groups.
///
/// `fetch` never fails: implementations swallow their own errors and
/// return an empty list, so "nothing found" and "backend broken" look the
/// same to callers.
#[async_trait]
pub trait GroupSource: Send + Sync {
    async fn fetch(&self, instruction: &str, category: Option<Category>) -> Vec<Group>;
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no API key configured (set GEMINI_API_KEY or API_KEY)")]
    MissingApiKey,
    #[error(transparent)]
    Gemini(#[from] GeminiError),
    #[error("parse group list: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse the model's text as a JSON array of groups. A valid JSON value
/// that is not an array yields an empty list; elements are converted
/// leniently and never dropped.
pub fn parse_groups(text: &str) -> Result<Vec<Group>, serde_json::Error> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(items) => Ok(items.into_iter().map(Group::from_value).collect()),
        other => {
            warn!(kind = json_kind(&other), "group list is not a JSON array");
            Ok(Vec::new())
        }
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Clone)]
pub struct GeminiFetcher {
    client: Option<GeminiClient>,
    model: String,
}

impl GeminiFetcher {
    pub fn new(client: Option<GeminiClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn from_config(cfg: &AppConfig) -> anyhow::Result<Self> {
        let client = match cfg.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Some(
                GeminiClient::new(cfg.base_url.clone(), key.trim())?.with_http_config(&cfg.http)?,
            ),
            _ => {
                warn!("no API key configured; searches will return no results");
                None
            }
        };
        Ok(Self::new(client, cfg.model.clone()))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_credentials(&self) -> bool {
        self.client.is_some()
    }

    pub async fn try_fetch(
        &self,
        instruction: &str,
        category: Option<Category>,
    ) -> Result<Vec<Group>, FetchError> {
        let client = self.client.as_ref().ok_or(FetchError::MissingApiKey)?;
        let req = build_request(instruction, category);
        let resp = client.generate_content(&self.model, &req).await?;
        match resp.text() {
            Some(text) => Ok(parse_groups(&text)?),
            None => {
                warn!(
                    finish_reason = resp.finish_reason().unwrap_or("none"),
                    "generateContent returned no text"
                );
                Ok(Vec::new())
            }
        }
    }
}

#[async_trait]
impl GroupSource for GeminiFetcher {
    async fn fetch(&self, instruction: &str, category: Option<Category>) -> Vec<Group> {
        match self.try_fetch(instruction, category).await {
            Ok(groups) => {
                info!(instruction, category = ?category, count = groups.len(), "search finished");
                groups
            }
            Err(FetchError::MissingApiKey) => {
                warn!(instruction, "search skipped: no API key");
                Vec::new()
            }
            Err(e) => {
                let kind = match &e {
                    FetchError::Gemini(g) => Some(g.kind()),
                    _ => None,
                };
                error!(instruction, error = %e, kind = ?kind, "search failed; showing no results");
                Vec::new()
            }
        }
    }
}
