//! Listing page decoder

use crate::error::{Error, Result};
use crate::types::{Page, PageResult, PageSize, Record};
use serde::Deserialize;
use serde_json::Value;

/// Decodes listing responses of the shape
/// `{ "<records_path>": [ ... ], "<total_path>": N }`.
#[derive(Debug, Clone)]
pub struct PageDecoder {
    records_path: String,
    total_path: String,
}

impl Default for PageDecoder {
    fn default() -> Self {
        Self::new("data", "pagination.total")
    }
}

impl PageDecoder {
    /// Create a decoder reading records and total from the given dot paths
    pub fn new(records_path: impl Into<String>, total_path: impl Into<String>) -> Self {
        Self {
            records_path: records_path.into(),
            total_path: total_path.into(),
        }
    }

    /// Decode a response body for the given page
    pub fn decode(&self, body: &str, number: u32, size: PageSize) -> Result<PageResult> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))?;
        self.decode_value(&value, number, size)
    }

    /// Decode an already-parsed response body
    pub fn decode_value(&self, value: &Value, number: u32, size: PageSize) -> Result<PageResult> {
        let records = self.extract_records(value)?;
        if records.len() > size.as_usize() {
            return Err(Error::decode(format!(
                "Page {number} returned {} records, more than the page size {size}",
                records.len()
            )));
        }

        let total_count = self.extract_total(value)?;

        Ok(PageResult {
            page: Page {
                number,
                size,
                records,
            },
            total_count,
        })
    }

    fn extract_records(&self, value: &Value) -> Result<Vec<Record>> {
        let items = match extract_path(value, &self.records_path) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(Error::decode(format!(
                    "Expected an array at '{}', found {}",
                    self.records_path,
                    json_kind(other)
                )))
            }
            None => {
                return Err(Error::decode(format!(
                    "Missing records at '{}'",
                    self.records_path
                )))
            }
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                Record::deserialize(item).map_err(|e| {
                    Error::decode(format!("Invalid record at index {index}: {e}"))
                })
            })
            .collect()
    }

    fn extract_total(&self, value: &Value) -> Result<u64> {
        match extract_path(value, &self.total_path) {
            Some(Value::Number(n)) => n.as_u64().ok_or_else(|| {
                Error::decode(format!(
                    "Total at '{}' must be a non-negative integer, found {n}",
                    self.total_path
                ))
            }),
            Some(other) => Err(Error::decode(format!(
                "Expected a number at '{}', found {}",
                self.total_path,
                json_kind(other)
            ))),
            None => Err(Error::decode(format!(
                "Missing total count at '{}'",
                self.total_path
            ))),
        }
    }
}

/// Follow a dot path (optionally prefixed with `$.`) through nested objects
pub fn extract_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);

    let mut current = value;
    for part in path.split('.') {
        match current {
            Value::Object(map) => current = map.get(part)?,
            _ => return None,
        }
    }

    Some(current)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
