//! Generation client: the hosted text model that writes candidate people.
//!
//! Defines the client trait, the prompt, and two implementations:
//! - `OpenAiClient`: calls the Responses API over HTTP (production)
//! - `MockClient`: returns queued replies (testing)
//!
//! Nothing here trusts the reply's shape. Callers extract and repair it.

pub mod openai;

pub use openai::OpenAiClient;

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// System instruction sent with every request.
pub const SYSTEM_INSTRUCTIONS: &str = "You generate fictional people. \
     Output ONLY a JSON array with no prose, no code fences.";

/// User instruction for a batch of `count` people.
pub fn user_prompt(count: usize) -> String {
    format!(
        "Generate {count} people as a JSON array. Each item must be an object with keys:\n\
         \x20 \"firstName\", \"lastName\", \"dateOfBirth\", \"zipCode\", \"notes\"\n\
         Rules:\n\
         - dateOfBirth: between 1920-01-01 and 2024-12-31, format YYYY-MM-DD.\n\
         - zipCode: exactly 5 digits (allow leading zeros only if realistic US ZIPs).\n\
         - notes: exactly one sentence (20–60 chars) ending with a period; \
         detail such as spouse, profession, interest, etc..\n\
         Return only the JSON array, nothing else."
    )
}

/// Errors from generation requests.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("no API credential configured (set OPENAI_API_KEY)")]
    MissingCredential,
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("response parse error: {0}")]
    ResponseParse(String),
    #[error("response contained no text output")]
    EmptyResponse,
}

/// Client trait for the generation service.
///
/// Abstracts over transport so the pipeline does not depend on how the
/// model is reached.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Send one instruction pair and return the model's raw reply text.
    async fn generate(&self, instructions: &str, prompt: &str) -> Result<String, GenerationError>;
}

/// Mock client for testing. Replies from a queue, one per call.
#[derive(Default)]
pub struct MockClient {
    replies: Mutex<VecDeque<Result<String, GenerationError>>>,
    prompts: Mutex<Vec<String>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply.
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.push(Ok(text.into()));
        self
    }

    /// Queue a failed call.
    pub fn with_failure(self, error: GenerationError) -> Self {
        self.push(Err(error));
        self
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn push(&self, reply: Result<String, GenerationError>) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
    }
}

#[async_trait]
impl GenerationClient for MockClient {
    async fn generate(&self, _instructions: &str, prompt: &str) -> Result<String, GenerationError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        let next = self
            .replies
            .lock()
            .map_err(|_| GenerationError::Http("mock client lock poisoned".to_string()))?
            .pop_front();
        next.unwrap_or_else(|| Err(GenerationError::Http("no mock reply queued".to_string())))
    }
}
