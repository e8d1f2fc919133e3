//! # AI Description Assistant
//!
//! Asks a Gemini model for a one-sentence Burmese sales description and three technical
//! specs for a part. The assistant is best effort: every failure is logged and reported
//! to the caller as "no suggestion".

use crate::config::AssistantConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, instrument, warn};

/// Structured suggestion returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSuggestion {
    pub suggested_description: String,
    pub technical_specs: Vec<String>,
}

/// Why a suggestion could not be produced. Only ever logged.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("API_KEY is missing")]
    MissingApiKey,
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Model endpoint responded with status {0}")]
    Status(u16),
    #[error("Model returned no text")]
    EmptyResponse,
    #[error("Model returned malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
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

pub struct DescriptionAssistant {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl DescriptionAssistant {
    pub fn new(config: &AssistantConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.resolved_api_key(),
        }
    }

    /// Suggests copy for `item_name` in `category`. `None` on any failure.
    #[instrument(skip(self))]
    pub async fn suggest(&self, item_name: &str, category: &str) -> Option<AiSuggestion> {
        match self.generate(item_name, category).await {
            Ok(suggestion) => {
                debug!(specs = suggestion.technical_specs.len(), "Suggestion received");
                Some(suggestion)
            }
            Err(AssistantError::MissingApiKey) => {
                error!("API_KEY is missing");
                None
            }
            Err(e) => {
                warn!(error = %e, "Model request failed");
                None
            }
        }
    }

    async fn generate(&self, item_name: &str, category: &str) -> Result<AiSuggestion, AssistantError> {
        let api_key = self.api_key.as_deref().ok_or(AssistantError::MissingApiKey)?;
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);

        let response = self
            .client
            .post(url)
            .query(&[("key", api_key)])
            .json(&request_body(item_name, category))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AssistantError::Status(status.as_u16()));
        }
        let body: GenerateResponse = response.json().await?;
        parse_response(body)
    }
}

fn prompt(item_name: &str, category: &str) -> String {
    format!(
        "Generate a short, sales-focused description in Burmese language (Myanmar) and a list of 3 \
         potential technical specifications (can be English or Burmese mixed) for a vehicle part \
         named \"{}\" in the category \"{}\".",
        item_name, category
    )
}

fn request_body(item_name: &str, category: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt(item_name, category) }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "suggestedDescription": {
                        "type": "STRING",
                        "description": "A compelling 1-sentence marketing description in Burmese."
                    },
                    "technicalSpecs": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "A list of 3 likely technical specs."
                    }
                },
                "required": ["suggestedDescription", "technicalSpecs"]
            }
        }
    })
}

fn parse_response(body: GenerateResponse) -> Result<AiSuggestion, AssistantError> {
    let text: String = body
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(AssistantError::EmptyResponse);
    }
    Ok(serde_json::from_str(&text)?)
}
