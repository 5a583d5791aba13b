//! Runtime configuration, built once at startup and passed down by value.

use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gpt-5-nano";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_STORE_PATH: &str = "people.json";
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Default log filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "peoplegen=info"
}

#[derive(Clone)]
pub struct Config {
    /// Model identifier sent with each request
    pub model: String,
    /// API credential; checked when the first request is made
    pub api_key: Option<String>,
    pub base_url: String,
    /// Store file, rewritten after every batch
    pub store_path: PathBuf,
    /// People requested per batch
    pub batch_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl Config {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }
}

// Keeps the credential out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("store_path", &self.store_path)
            .field("batch_size", &self.batch_size)
            .finish()
    }
}
