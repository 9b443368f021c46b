use anyhow::Context;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GeminiConfig;

/// An uploaded photo as it is handed to the model.
#[derive(Debug, Clone)]
pub struct ImagePart {
    pub mime_type: String,
    pub data: Bytes,
}

#[async_trait]
pub trait VisionClient: Send + Sync {
    /// One generation call: the prompt followed by every image, inline.
    /// Returns the text of the first candidate.
    async fn generate(&self, prompt: &str, images: &[ImagePart]) -> anyhow::Result<String>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
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
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelInfo {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

fn build_request(prompt: &str, images: &[ImagePart]) -> GenerateRequest {
    let mut parts = Vec::with_capacity(images.len() + 1);
    parts.push(Part::Text {
        text: prompt.to_string(),
    });
    parts.extend(images.iter().map(|img| Part::InlineData {
        inline_data: InlineData {
            mime_type: img.mime_type.clone(),
            data: general_purpose::STANDARD.encode(&img.data),
        },
    }));
    GenerateRequest {
        contents: vec![Content { parts }],
    }
}

impl GenerateResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .find_map(|p| p.text)
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Model names (without the `models/` prefix) that accept `generateContent`.
    pub async fn list_models(&self) -> anyhow::Result<Vec<String>> {
        let response = self
            .client
            .get(self.url("models"))
            .header("x-goog-api-key", &self.config.api_key)
            .send()
            .await
            .context("gemini list models")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("gemini list models returned {}: {}", status, body);
        }

        let list: ModelList = response.json().await.context("decode model list")?;
        Ok(generate_capable(list))
    }
}

fn generate_capable(list: ModelList) -> Vec<String> {
    list.models
        .into_iter()
        .filter(|m| {
            m.supported_generation_methods
                .iter()
                .any(|g| g == "generateContent")
        })
        .map(|m| m.name.trim_start_matches("models/").to_string())
        .collect()
}

#[async_trait]
impl VisionClient for GeminiClient {
    async fn generate(&self, prompt: &str, images: &[ImagePart]) -> anyhow::Result<String> {
        let url = self.url(&format!("models/{}:generateContent", self.config.model));
        let request = build_request(prompt, images);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .context("gemini generateContent")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("gemini returned {}: {}", status, body);
        }

        let body: GenerateResponse = response
            .json()
            .await
            .context("decode gemini response")?;
        let text = body
            .first_text()
            .context("gemini response has no text candidate")?;
        debug!(model = %self.config.model, chars = text.len(), "gemini responded");
        Ok(text)
    }
}
