//! JSON ingestion implementation.
//!
//! Supported inputs:
//! - A JSON array of objects: `[{"a":1}, {"a":2}]`
//! - A single JSON object: `{"a":1}`
//! - Newline-delimited JSON (NDJSON / JSON Lines): `{"a":1}\n{"a":2}\n`

use std::fs;
use std::path::Path;

use crate::error::{ExampleError, ExampleResult};
use crate::example::Example;
use crate::field::DictFields;
use crate::types::RawValue;

/// Ingest a JSON file into examples.
pub fn examples_from_json_path(path: impl AsRef<Path>, fields: &DictFields) -> ExampleResult<Vec<Example>> {
    let text = fs::read_to_string(path)?;
    examples_from_json_str(&text, fields)
}

/// Ingest JSON from an in-memory string into examples.
pub fn examples_from_json_str(input: &str, fields: &DictFields) -> ExampleResult<Vec<Example>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ExampleError::SchemaMismatch {
            message: "json input is empty".to_string(),
        });
    }

    // First try parsing as a single JSON value (array or object).
    if let Ok(v) = serde_json::from_str::<RawValue>(trimmed) {
        match v {
            RawValue::Array(items) => examples_from_json_values(&items, fields),
            RawValue::Object(_) => examples_from_json_values(std::slice::from_ref(&v), fields),
            _ => Err(ExampleError::SchemaMismatch {
                message: "json must be an object, an array of objects, or NDJSON".to_string(),
            }),
        }
    } else {
        // Fall back to NDJSON.
        let mut examples = Vec::new();
        for (i, line) in trimmed.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let ex = Example::from_json(line, fields).map_err(|e| match e {
                ExampleError::Json(err) => ExampleError::SchemaMismatch {
                    message: format!("invalid ndjson at line {}: {}", i + 1, err),
                },
                other => other,
            })?;
            tracing::debug!(line = i + 1, attributes = ex.len(), "built example from ndjson line");
            examples.push(ex);
        }
        Ok(examples)
    }
}

fn examples_from_json_values(values: &[RawValue], fields: &DictFields) -> ExampleResult<Vec<Example>> {
    let mut examples = Vec::with_capacity(values.len());

    for (idx0, v) in values.iter().enumerate() {
        let row_num = idx0 + 1;
        let obj = v.as_object().ok_or_else(|| ExampleError::SchemaMismatch {
            message: format!("row {row_num} is not a json object"),
        })?;
        let ex = Example::from_dict(obj, fields)?;
        tracing::debug!(row = row_num, attributes = ex.len(), "built example from json object");
        examples.push(ex);
    }

    Ok(examples)
}
