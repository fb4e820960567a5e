//! Structural rewrite of date fields inside vendor JSON documents.

use serde_json::Value;
use tracker_core::AdapterFailure;

use crate::date::{self, DateFormat};
use crate::outcome::NonEmpty;

/// Rewrites every string value under one of `fields`, at any depth, through
/// the date normalizer.
#[derive(Debug, Clone, Copy)]
pub struct PayloadTransformer {
    fields: &'static [&'static str],
    format: DateFormat,
}

impl PayloadTransformer {
    pub const fn new(fields: &'static [&'static str], format: DateFormat) -> Self {
        Self { fields, format }
    }

    /// Returns the rewritten document, or every date field that failed to
    /// parse, in traversal order.
    pub fn transform(&self, mut json: Value) -> Result<Value, NonEmpty<AdapterFailure>> {
        let mut failures = Vec::new();
        self.rewrite(&mut json, &mut failures);
        match NonEmpty::from_vec(failures) {
            Some(failures) => Err(failures),
            None => Ok(json),
        }
    }

    fn rewrite(&self, value: &mut Value, failures: &mut Vec<AdapterFailure>) {
        match value {
            Value::Object(map) => {
                for (key, child) in map.iter_mut() {
                    match child {
                        Value::String(raw) if self.fields.contains(&key.as_str()) => {
                            match date::normalize(raw, &self.format) {
                                Ok(normalized) => *raw = normalized,
                                Err(e) => failures.push(AdapterFailure::DateParseFailure {
                                    field: key.clone(),
                                    value: e.value,
                                    reason: e.reason,
                                }),
                            }
                        }
                        Value::String(_) => {}
                        other => self.rewrite(other, failures),
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.rewrite(item, failures);
                }
            }
            _ => {}
        }
    }
}
