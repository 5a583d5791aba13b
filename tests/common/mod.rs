//! Shared fixtures for pipeline integration tests
//!
//! Model replies as they tend to arrive: sometimes clean, sometimes wrapped
//! in prose and code fences, sometimes with broken fields.

use peoplegen::{BatchPipeline, MockClient, PersonRecord, PersonStore};
use std::path::Path;
use std::sync::Arc;

/// Three well-formed people, fenced and introduced with a sentence.
pub const THREE_CLEAN: &str = r#"Here are the people you asked for:
```json
[
  {
    "firstName": "Marisol",
    "lastName": "Quintero",
    "dateOfBirth": "1984-07-19",
    "zipCode": "87501",
    "notes": "Potter who sells glazed bowls at the Santa Fe market."
  },
  {
    "firstName": "Theo",
    "lastName": "Lindqvist",
    "dateOfBirth": "1957-11-03",
    "zipCode": "05401",
    "notes": "Retired ferry engineer, married to a violin teacher."
  },
  {
    "firstName": "Priya",
    "lastName": "Raman",
    "dateOfBirth": "2001-02-14",
    "zipCode": "60614",
    "notes": "Graduate student researching urban beekeeping."
  }
]
```"#;

/// Two people with every field needing repair.
pub const TWO_BROKEN: &str = r#"[
  {
    "firstName": "",
    "dateOfBirth": "March 3rd, 1970",
    "zipCode": "1234",
    "notes": "Loves\njazz.."
  },
  {
    "firstName": "JEAN-BAPTISTE EMMANUEL",
    "lastName": "   van der berg   ",
    "dateOfBirth": "2031-14-45",
    "zipCode": 30301,
    "notes": "Keeps   bees on the roof of a\nten-storey apartment block in Rotterdam with his brother..."
  }
]"#;

pub fn pipeline(client: Arc<MockClient>, store: &Path) -> BatchPipeline {
    BatchPipeline::new(client, PersonStore::new(store))
}

pub fn read_store(path: &Path) -> Vec<PersonRecord> {
    let text = std::fs::read_to_string(path).expect("store should exist");
    serde_json::from_str(&text).expect("store should hold person records")
}

/// Every field invariant a stored record must satisfy.
pub fn assert_record_invariants(record: &PersonRecord) {
    let first_len = record.first_name.chars().count();
    let last_len = record.last_name.chars().count();
    assert!((1..=12).contains(&first_len), "{record:?}");
    assert!((1..=12).contains(&last_len), "{record:?}");

    let parts: Vec<&str> = record.date_of_birth.split('-').collect();
    assert_eq!(parts.len(), 3, "{record:?}");
    assert_eq!(
        (parts[0].len(), parts[1].len(), parts[2].len()),
        (4, 2, 2),
        "{record:?}"
    );
    let year: u32 = parts[0].parse().unwrap();
    let month: u32 = parts[1].parse().unwrap();
    let day: u32 = parts[2].parse().unwrap();
    assert!((1920..=2024).contains(&year), "{record:?}");
    assert!((1..=12).contains(&month), "{record:?}");
    assert!((1..=28).contains(&day), "{record:?}");

    assert_eq!(record.zip_code.len(), 5, "{record:?}");
    assert!(record.zip_code.bytes().all(|b| b.is_ascii_digit()), "{record:?}");

    assert!(record.notes.chars().count() <= 60, "{record:?}");
    assert!(!record.notes.contains('\n'), "{record:?}");
    assert!(!record.notes.ends_with(".."), "{record:?}");
}
