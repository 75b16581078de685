//! Thin reqwest wrapper over the Generative Language REST API.
//!
//! Covers the two calls BondKeeper needs: listing the model catalog and
//! generating content for a prompt. Every request carries the configured
//! timeout; a hung remote call cannot block an interactive session forever.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::GeminiConfig;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },
    #[error("response contained no candidate text")]
    EmptyResponse,
}

/// Client for the Generative Language API.
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    name: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    /// Build a client from config. Returns `None` when no API key is set,
    /// which callers treat as the missing-capability case.
    pub fn from_config(config: &GeminiConfig) -> Result<Option<Self>, LlmError> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Some(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        }))
    }

    /// Fetch the names of all available models.
    ///
    /// Any failure (network, HTTP status, unexpected shape) yields an empty
    /// list rather than an error: an unreachable catalog means "no
    /// selection", not a fatal condition.
    pub async fn list_model_names(&self) -> Vec<String> {
        match self.try_list_model_names().await {
            Ok(names) => names,
            Err(e) => {
                warn!(error = %e, "model catalog fetch failed, treating as empty");
                Vec::new()
            }
        }
    }

    async fn try_list_model_names(&self) -> Result<Vec<String>, LlmError> {
        let url = format!("{}/v1beta/models?key={}", self.base_url, self.api_key);
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        let parsed: ListModelsResponse = response.json().await?;
        debug!(count = parsed.models.len(), "model catalog fetched");
        Ok(parsed.models.into_iter().map(|m| m.name).collect())
    }

    /// Send a prompt to a model and return the generated text.
    ///
    /// `model` is a full catalog name such as `models/gemini-2.5-flash`.
    /// No retry on failure: the caller degrades to mock output instead.
    pub async fn generate_content(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let url = format!(
            "{}/v1beta/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self.http.post(url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text)
    }
}
