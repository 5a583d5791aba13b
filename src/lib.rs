//! peoplegen: schema-clean fictional people from a hosted text model
//!
//! Each batch asks a generation service for a JSON array of people, pulls
//! the array out of whatever text comes back, repairs every record against
//! a fixed schema, and prepends the batch to a JSON file on disk.
//!
//! # Core Pieces
//!
//! - **Sanitizers** (`person::sanitize`): pure repair of one field each
//! - **Extractor** (`extract`): first bracket-balanced array of objects in free text
//! - **Pipeline** (`pipeline`): one generation cycle, from prompt to rewritten store
//!
//! # Example
//!
//! ```
//! use peoplegen::extract_json_array;
//! use peoplegen::PersonRecord;
//! use peoplegen::RawPerson;
//!
//! let items = extract_json_array(r#"Sure! [{"firstName": "ada", "zipCode": "2139"}]"#).unwrap();
//! let record = PersonRecord::from_raw(&RawPerson::from_value(&items[0]));
//! assert_eq!(record.first_name, "Ada");
//! assert_eq!(record.last_name, "Rivera");
//! assert_eq!(record.zip_code.len(), 5);
//! ```

pub mod config;
pub mod extract;
pub mod generate;
pub mod person;
pub mod pipeline;
pub mod store;

pub use config::Config;
pub use extract::{extract_json_array, ExtractError};
pub use generate::{GenerationClient, GenerationError, MockClient, OpenAiClient};
pub use person::{PersonRecord, RawPerson, DEFAULT_FIRST_NAME, DEFAULT_LAST_NAME};
pub use pipeline::{clean_batch, BatchPipeline, BatchReport, PipelineError};
pub use store::{PersonStore, StoreError, StoreResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
