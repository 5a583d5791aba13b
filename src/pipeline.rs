//! Batch pipeline: one generation cycle from prompt to rewritten store.
//!
//! 1. Ask the generation client for `count` people
//! 2. Extract the JSON array from the reply
//! 3. Repair every element into a `PersonRecord`
//! 4. Prepend the batch to the store and rewrite it
//!
//! Steps 1, 2 and the final write can fail; any failure leaves the store
//! untouched. Repair in step 3 never fails.

use crate::config::Config;
use crate::extract::{extract_json_array, ExtractError};
use crate::generate::{
    user_prompt, GenerationClient, GenerationError, OpenAiClient, SYSTEM_INSTRUCTIONS,
};
use crate::person::{PersonRecord, RawPerson};
use crate::store::{PersonStore, StoreError};
use std::path::PathBuf;
use std::sync::Arc;

/// Errors that end a batch.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error("store write failed: {0}")]
    Store(#[from] StoreError),
}

/// Outcome of a successful batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Records added by this batch
    pub added: usize,
    /// Records in the store after the rewrite
    pub total: usize,
    pub path: PathBuf,
}

/// Repair decoded model elements into records, preserving order.
pub fn clean_batch(elements: &[serde_json::Value]) -> Vec<PersonRecord> {
    elements
        .iter()
        .map(|element| PersonRecord::from_raw(&RawPerson::from_value(element)))
        .collect()
}

pub struct BatchPipeline {
    client: Arc<dyn GenerationClient>,
    store: PersonStore,
}

impl BatchPipeline {
    pub fn new(client: Arc<dyn GenerationClient>, store: PersonStore) -> Self {
        Self { client, store }
    }

    /// Production pipeline: Responses API client plus the configured store file.
    pub fn from_config(config: &Config) -> Result<Self, GenerationError> {
        let client = OpenAiClient::new(config)?;
        Ok(Self::new(
            Arc::new(client),
            PersonStore::new(config.store_path.clone()),
        ))
    }

    pub fn store(&self) -> &PersonStore {
        &self.store
    }

    /// Run one batch of `count` requested people.
    pub async fn run_batch(&self, count: usize) -> Result<BatchReport, PipelineError> {
        let raw = self
            .client
            .generate(SYSTEM_INSTRUCTIONS, &user_prompt(count))
            .await?;

        let elements = extract_json_array(&raw)?;
        tracing::debug!(requested = count, extracted = elements.len(), "model output extracted");

        let cleaned = clean_batch(&elements);
        let total = self.store.prepend_and_save(&cleaned)?;

        tracing::info!(added = cleaned.len(), total, "batch written");
        Ok(BatchReport {
            added: cleaned.len(),
            total,
            path: self.store.path().to_path_buf(),
        })
    }
}
