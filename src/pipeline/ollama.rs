//! Ollama HTTP client for local draft generation.
//!
//! Non-streaming `/api/generate` calls with a bounded timeout. Every failure
//! maps to a typed `GenerationError`; the generator above converts any of
//! them into the safety-first fallback text.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::generate::DraftModel;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Cannot reach Ollama at {0}")]
    Connection(String),

    #[error("Generation timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("Ollama returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Model returned an empty response")]
    EmptyResponse,
}

pub struct OllamaClient {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
            timeout_secs,
        }
    }

    /// Client from the configured URL/model/timeout, only if the model is
    /// actually available on the local instance. `None` means the pipeline
    /// runs on scenario answers and the fallback text alone.
    pub fn from_config() -> Option<Self> {
        let client = Self::new(
            &crate::config::ollama_base_url(),
            &crate::config::ollama_model(),
            crate::config::generation_timeout_secs(),
        );
        match client.is_model_available() {
            Ok(true) => {
                tracing::info!(model = %client.model, "Draft model confirmed on Ollama");
                Some(client)
            }
            Ok(false) => {
                tracing::warn!(model = %client.model, "Draft model not available on Ollama");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Cannot reach Ollama; drafts fall back to canned text");
                None
            }
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn list_models(&self) -> Result<Vec<String>, GenerationError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| self.map_transport_error(e))?;
        let tags: OllamaTagsResponse = response
            .json()
            .map_err(|e| GenerationError::HttpClient(e.to_string()))?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    fn is_model_available(&self) -> Result<bool, GenerationError> {
        let available = self.list_models()?;
        Ok(available.iter().any(|m| m.starts_with(&self.model)))
    }

    fn map_transport_error(&self, e: reqwest::Error) -> GenerationError {
        if e.is_connect() {
            GenerationError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            GenerationError::Timeout { secs: self.timeout_secs }
        } else {
            GenerationError::HttpClient(e.to_string())
        }
    }
}

/// Request body for Ollama /api/generate
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
}

/// Response body from Ollama /api/generate
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

/// Response body from Ollama /api/tags
#[derive(Deserialize)]
struct OllamaTagsResponse {
    models: Vec<OllamaModel>,
}

#[derive(Deserialize)]
struct OllamaModel {
    name: String,
}

impl DraftModel for OllamaClient {
    fn generate(&self, system: &str, prompt: &str) -> Result<String, GenerationError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            system,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GenerationError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: OllamaGenerateResponse = response
            .json()
            .map_err(|e| GenerationError::HttpClient(e.to_string()))?;

        if parsed.response.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(parsed.response)
    }
}
