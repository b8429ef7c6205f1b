//! Generative-language boundary
//!
//! The chat fallback only needs "prompt in, text out". [`GenerativeModel`] is
//! that seam; [`GeminiClient`] implements it against the Gemini
//! `generateContent` endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Instant;
use tracing::{debug, error, info, instrument};

use crate::config::GeminiConfig;
use crate::{Result, VoyageError};

/// A stateless text generator: one prompt, one answer
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .find_map(|part| part.text)
    }
}

/// Gemini `generateContent` client
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                VoyageError::config("Gemini API key is missing. Please check your .env file.")
            })?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| VoyageError::config(format!("Failed to create HTTP client: {e}")))?;

        info!(model = %config.model, "Creating Gemini client");

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let start_time = Instant::now();
        let request = json!({
            "contents": [{
                "parts": [{"text": prompt}]
            }]
        });

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| VoyageError::network(format!("Gemini request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(200).collect();
            error!("Gemini API error ({}): {}", status, preview);
            return Err(VoyageError::api(
                status.as_u16(),
                format!("Gemini API returned {status}: {preview}"),
            ));
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            VoyageError::invalid_response(format!("Failed to parse Gemini response: {e}"))
        })?;

        let text = parsed
            .into_text()
            .ok_or_else(|| VoyageError::invalid_response("No response text from Gemini"))?;

        debug!(
            "Gemini answered {} chars in {:.3}s",
            text.len(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(text)
    }
}
