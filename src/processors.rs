//! Stock [`Preprocess`] implementations.
//!
//! Any `Fn(&RawValue) -> ExampleResult<Value> + Send + Sync` closure is also a processor, so
//! these are only the common cases.

use crate::error::{ExampleError, ExampleResult};
use crate::field::Preprocess;
use crate::types::{DataType, RawValue, Value};

/// Passes the raw value through, converted to the matching [`Value`] variant.
///
/// JSON objects have no [`Value`] counterpart and are stored as their JSON text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Preprocess for Identity {
    fn preprocess(&self, raw: &RawValue) -> ExampleResult<Value> {
        Ok(identity_value(raw))
    }
}

fn identity_value(raw: &RawValue) -> Value {
    match raw {
        RawValue::Null => Value::Null,
        RawValue::Bool(b) => Value::Bool(*b),
        RawValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Int64(i),
            None => n.as_f64().map(Value::Float64).unwrap_or(Value::Null),
        },
        RawValue::String(s) => Value::Utf8(s.clone()),
        RawValue::Array(items) => Value::List(items.iter().map(identity_value).collect()),
        RawValue::Object(_) => Value::Utf8(raw.to_string()),
    }
}

/// Coerces a scalar raw value into a logical [`DataType`].
///
/// Text is trimmed first; empty text and JSON `null` become [`Value::Null`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Typed(pub DataType);

impl Preprocess for Typed {
    fn preprocess(&self, raw: &RawValue) -> ExampleResult<Value> {
        match raw {
            RawValue::Null => Ok(Value::Null),
            RawValue::String(s) => parse_typed_text(self.0, s),
            RawValue::Bool(b) => match self.0 {
                DataType::Bool => Ok(Value::Bool(*b)),
                DataType::Utf8 => Ok(Value::Utf8(b.to_string())),
                _ => Err(parse_error(raw.to_string(), "expected number")),
            },
            RawValue::Number(n) => match self.0 {
                DataType::Int64 => {
                    if let Some(i) = n.as_i64() {
                        Ok(Value::Int64(i))
                    } else if n.is_u64() {
                        Err(parse_error(raw.to_string(), "u64 out of range for i64"))
                    } else {
                        Err(parse_error(raw.to_string(), "expected integer number"))
                    }
                }
                DataType::Float64 => n
                    .as_f64()
                    .map(Value::Float64)
                    .ok_or_else(|| parse_error(raw.to_string(), "expected number")),
                DataType::Utf8 => Ok(Value::Utf8(n.to_string())),
                DataType::Bool => Err(parse_error(raw.to_string(), "expected bool")),
            },
            RawValue::Array(_) | RawValue::Object(_) => {
                Err(parse_error(raw.to_string(), "expected a scalar value"))
            }
        }
    }
}

fn parse_typed_text(data_type: DataType, raw: &str) -> ExampleResult<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }

    match data_type {
        DataType::Utf8 => Ok(Value::Utf8(trimmed.to_owned())),
        DataType::Int64 => trimmed
            .parse::<i64>()
            .map(Value::Int64)
            .map_err(|e| parse_error(raw, e.to_string())),
        DataType::Float64 => trimmed
            .parse::<f64>()
            .map(Value::Float64)
            .map_err(|e| parse_error(raw, e.to_string())),
        DataType::Bool => parse_bool(trimmed)
            .map(Value::Bool)
            .map_err(|message| parse_error(raw, message)),
    }
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Ok(true),
        "false" | "f" | "0" | "no" | "n" => Ok(false),
        _ => Err("expected bool (true/false/1/0/yes/no)".to_string()),
    }
}

// The attribute name is filled in by the example builder.
fn parse_error(raw: impl Into<String>, message: impl Into<String>) -> ExampleError {
    ExampleError::ParseError {
        column: String::new(),
        raw: raw.into(),
        message: message.into(),
    }
}

/// Splits text on whitespace into a [`Value::List`] of tokens.
///
/// Arrays are treated as already tokenized; each element becomes one token.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenize {
    /// Lowercase every token.
    pub lower: bool,
}

impl Tokenize {
    pub fn lowercase() -> Self {
        Self { lower: true }
    }

    fn token(&self, s: &str) -> Value {
        if self.lower {
            Value::Utf8(s.to_lowercase())
        } else {
            Value::Utf8(s.to_string())
        }
    }
}

impl Preprocess for Tokenize {
    fn preprocess(&self, raw: &RawValue) -> ExampleResult<Value> {
        match raw {
            RawValue::Null => Ok(Value::Null),
            RawValue::String(s) => Ok(Value::List(
                s.split_whitespace().map(|t| self.token(t)).collect(),
            )),
            RawValue::Array(items) => Ok(Value::List(
                items
                    .iter()
                    .map(|item| match item {
                        RawValue::String(s) => self.token(s),
                        other => self.token(&other.to_string()),
                    })
                    .collect(),
            )),
            RawValue::Bool(_) | RawValue::Number(_) => {
                Ok(Value::List(vec![self.token(&raw.to_string())]))
            }
            RawValue::Object(_) => Err(parse_error(raw.to_string(), "cannot tokenize a json object")),
        }
    }
}
