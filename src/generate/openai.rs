//! Responses API client.

use super::{GenerationClient, GenerationError};
use crate::config::Config;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// HTTP client for the hosted Responses API.
///
/// No request timeout is set: a slow reply blocks the batch until it arrives.
pub struct OpenAiClient {
    base_url: String,
    api_key: Option<String>,
    model: String,
    client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| GenerationError::Http(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            client,
        })
    }
}

/// Request body for POST /responses
#[derive(Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    instructions: &'a str,
    input: &'a str,
}

/// Response body from POST /responses (only the parts we read)
#[derive(Deserialize)]
struct ResponsesReply {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Concatenate every `output_text` part of every `message` item.
fn output_text(reply: &ResponsesReply) -> Option<String> {
    let parts: Vec<&str> = reply
        .output
        .iter()
        .filter(|item| item.kind == "message")
        .flat_map(|item| item.content.iter())
        .filter(|part| part.kind == "output_text")
        .filter_map(|part| part.text.as_deref())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.concat())
    }
}

fn parse_reply(body: &str) -> Result<String, GenerationError> {
    let reply: ResponsesReply =
        serde_json::from_str(body).map_err(|e| GenerationError::ResponseParse(e.to_string()))?;
    output_text(&reply).ok_or(GenerationError::EmptyResponse)
}

#[async_trait]
impl GenerationClient for OpenAiClient {
    async fn generate(&self, instructions: &str, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(GenerationError::MissingCredential)?;

        let url = format!("{}/responses", self.base_url);
        let body = ResponsesRequest {
            model: &self.model,
            instructions,
            input: prompt,
        };

        tracing::debug!(model = %self.model, %url, "sending generation request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Http(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GenerationError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        tracing::debug!(bytes = text.len(), "generation response received");
        parse_reply(&text)
    }
}
