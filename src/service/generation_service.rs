use async_trait::async_trait;
use serde_json::Value;

use crate::clients::gemini_client;
use crate::error::PlannerResult;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseFormat {
    /// Structured JSON constrained by the given schema.
    Json { schema: Value },
    /// Free text grounded with web search; JSON is requested in the prompt only.
    GroundedText,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub format: ResponseFormat,
}

impl GenerationRequest {
    pub fn json(model: &str, prompt: String, schema: Value) -> Self {
        Self {
            model: model.to_string(),
            prompt,
            format: ResponseFormat::Json { schema },
        }
    }

    pub fn grounded(model: &str, prompt: String) -> Self {
        Self {
            model: model.to_string(),
            prompt,
            format: ResponseFormat::GroundedText,
        }
    }
}

/// Hosted language model that turns a prompt into raw response text.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> PlannerResult<String>;
}

pub struct GeminiService {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiService {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
        }
    }
}

#[async_trait]
impl GenerationClient for GeminiService {
    async fn generate(&self, request: GenerationRequest) -> PlannerResult<String> {
        gemini_client::generate_content(&self.client, &self.base_url, &self.api_key, &request).await
    }
}
