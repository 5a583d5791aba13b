//! Person records: the untrusted shape decoded from model output and the
//! cleaned shape that is allowed into the store.

pub mod sanitize;

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

pub use sanitize::{
    sanitize_date_of_birth, sanitize_date_of_birth_with, sanitize_name, sanitize_notes,
    sanitize_zip, sanitize_zip_with,
};

/// Substituted when a cleaned first name comes out empty.
pub const DEFAULT_FIRST_NAME: &str = "Alex";
/// Substituted when a cleaned last name comes out empty.
pub const DEFAULT_LAST_NAME: &str = "Rivera";

/// A schema-conformant fictional person.
///
/// Field order here is the key order written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub zip_code: String,
    pub notes: String,
}

impl PersonRecord {
    /// Repair a raw model object into a valid record. Never fails.
    pub fn from_raw(raw: &RawPerson) -> Self {
        Self::from_raw_with(raw, &mut rand::thread_rng())
    }

    /// Like [`PersonRecord::from_raw`], drawing fallback values from `rng`.
    pub fn from_raw_with<R: Rng + ?Sized>(raw: &RawPerson, rng: &mut R) -> Self {
        Self {
            first_name: name_or_default(raw.first_name(), DEFAULT_FIRST_NAME),
            last_name: name_or_default(raw.last_name(), DEFAULT_LAST_NAME),
            date_of_birth: sanitize_date_of_birth_with(raw.date_of_birth(), rng),
            zip_code: sanitize_zip_with(raw.zip_code(), rng),
            notes: sanitize_notes(raw.notes()),
        }
    }
}

fn name_or_default(input: &str, default: &str) -> String {
    let name = sanitize_name(input, sanitize::NAME_MAX_LEN);
    if name.is_empty() {
        default.to_string()
    } else {
        name
    }
}

/// One element of the model's array, before any repair.
///
/// Every field is optional; accessors return `""` for anything missing.
/// Numbers are read as their decimal text, other non-string values as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPerson {
    #[serde(deserialize_with = "lenient_string")]
    first_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    last_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    date_of_birth: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    zip_code: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    notes: Option<String>,
}

impl RawPerson {
    /// Read a decoded JSON element. Non-objects yield an all-empty record.
    pub fn from_value(value: &serde_json::Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        Self::deserialize(value).unwrap_or_default()
    }

    pub fn first_name(&self) -> &str {
        self.first_name.as_deref().unwrap_or("")
    }

    pub fn last_name(&self) -> &str {
        self.last_name.as_deref().unwrap_or("")
    }

    pub fn date_of_birth(&self) -> &str {
        self.date_of_birth.as_deref().unwrap_or("")
    }

    pub fn zip_code(&self) -> &str {
        self.zip_code.as_deref().unwrap_or("")
    }

    pub fn notes(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
