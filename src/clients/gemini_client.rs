use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use crate::error::{PlannerError, PlannerResult};
use crate::service::generation_service::{GenerationRequest, ResponseFormat};

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiTool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<GeminiTool>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
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
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

fn build_request(request: &GenerationRequest) -> GeminiRequest {
    let (generation_config, tools) = match &request.format {
        ResponseFormat::Json { schema } => (
            Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema.clone(),
            }),
            Vec::new(),
        ),
        // Search grounding cannot be combined with a JSON mime type.
        ResponseFormat::GroundedText => (
            None,
            vec![GeminiTool {
                google_search: GoogleSearch {},
            }],
        ),
    };
    GeminiRequest {
        contents: vec![GeminiContent {
            role: "user".to_string(),
            parts: vec![GeminiPart {
                text: request.prompt.clone(),
            }],
        }],
        generation_config,
        tools,
    }
}

/// Pulls `error.message` out of a failed response, falling back to the raw body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body.trim().to_string(),
    }
}

fn extract_text(body: &str) -> PlannerResult<String> {
    let parsed: GeminiResponse =
        serde_json::from_str(body).map_err(|e| PlannerError::InvalidResponseShape {
            expected: "generateContent response",
            detail: e.to_string(),
        })?;
    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(PlannerError::EmptyResponse);
    }
    Ok(text)
}

pub async fn generate_content(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    request: &GenerationRequest,
) -> PlannerResult<String> {
    let url = format!(
        "{}/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        request.model
    );
    debug!(model = %request.model, "sending generateContent request");

    let response = client
        .post(&url)
        .header("x-goog-api-key", api_key)
        .json(&build_request(request))
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        error!(%status, body = %text, "generateContent request failed");
        return Err(PlannerError::Api {
            status: status.as_u16(),
            message: error_message(&text),
        });
    }

    extract_text(&text)
}
