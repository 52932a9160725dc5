//! The [`Example`] type and its format-specific constructors.
//!
//! [`Example::from_dict`] and [`Example::from_list`] are the two primitive builders; the other
//! constructors adapt their input format and delegate to one of them.

use std::borrow::Cow;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Map;

use crate::error::{ExampleError, ExampleResult};
use crate::field::{DictFields, FieldIndex, FieldSpec, FieldsTable, ListField, ListFields};
use crate::tree::{Tree, TreeParser};
use crate::types::{RawValue, Value};

/// A single training or test example: named, processed field values.
///
/// Attributes keep the order in which they were first set. Setting an existing name replaces
/// its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Example {
    attrs: Vec<(String, Value)>,
}

impl Example {
    /// Create an example with no attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any existing value with the same name.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Look up an attribute by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attrs.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Whether an attribute with this name has been set.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate `(name, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attrs.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Iterate attribute names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attrs.iter().map(|(n, _)| n.as_str())
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Whether no attribute has been set.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Build an example from JSON object text.
    ///
    /// Malformed JSON is returned as [`ExampleError::Json`]. Valid JSON whose top level is not
    /// an object is [`ExampleError::Contract`].
    pub fn from_json(text: &str, fields: &DictFields) -> ExampleResult<Self> {
        match serde_json::from_str::<RawValue>(text)? {
            RawValue::Object(data) => Self::from_dict(&data, fields),
            _ => Err(ExampleError::Contract {
                message: "json text must decode to an object".to_string(),
            }),
        }
    }

    /// Build an example from a key -> raw value mapping.
    ///
    /// Every key in `fields` must be present in `data`, including keys whose entry is
    /// [`crate::field::FieldEntry::Skip`]. A missing key fails with
    /// [`ExampleError::MissingKey`].
    ///
    /// ```
    /// use example_records::example::Example;
    /// use example_records::field::{DictFields, FieldSpec};
    /// use example_records::processors::{Identity, Tokenize};
    /// use example_records::types::Value;
    ///
    /// let fields = DictFields::new()
    ///     .with("text", vec![FieldSpec::new("raw", Identity), FieldSpec::new("tokens", Tokenize::default())])
    ///     .with("label", FieldSpec::new("label", Identity));
    ///
    /// let data = serde_json::json!({"text": "hello world", "label": "pos"});
    /// let ex = Example::from_dict(data.as_object().unwrap(), &fields).unwrap();
    ///
    /// assert_eq!(ex.len(), 3);
    /// assert_eq!(ex.get("label"), Some(&Value::Utf8("pos".to_string())));
    /// ```
    pub fn from_dict(data: &Map<String, RawValue>, fields: &DictFields) -> ExampleResult<Self> {
        let mut ex = Self::new();
        for (key, entry) in fields.iter() {
            let raw = data.get(key).ok_or_else(|| ExampleError::MissingKey {
                key: key.to_string(),
            })?;
            for spec in entry.specs() {
                ex.set_processed(spec, raw)?;
            }
        }
        Ok(ex)
    }

    /// Build an example from one delimited row.
    ///
    /// - Without `field_to_index`, `fields` must be [`FieldsTable::List`] and the row is passed
    ///   to [`Example::from_list`].
    /// - With `field_to_index`, `fields` must be [`FieldsTable::Dict`]; each table key is looked
    ///   up at its configured position, in table order, and the result passed to
    ///   [`Example::from_dict`]. Keys without an index surface as [`ExampleError::MissingKey`].
    pub fn from_csv(
        row: &[RawValue],
        fields: &FieldsTable,
        field_to_index: Option<&FieldIndex>,
    ) -> ExampleResult<Self> {
        match (fields, field_to_index) {
            (FieldsTable::List(fields), None) => Self::from_list(row, fields),
            (FieldsTable::Dict(fields), Some(index)) => {
                let mut data = Map::with_capacity(index.len());
                for key in fields.keys() {
                    let Some(&idx) = index.get(key) else {
                        continue;
                    };
                    let raw = row.get(idx).ok_or_else(|| ExampleError::IndexOutOfBounds {
                        key: key.to_string(),
                        index: idx,
                        len: row.len(),
                    })?;
                    data.insert(key.to_string(), raw.clone());
                }
                Self::from_dict(&data, fields)
            }
            (FieldsTable::List(_), Some(_)) => Err(ExampleError::Contract {
                message: "field_to_index requires mapping-form fields".to_string(),
            }),
            (FieldsTable::Dict(_), None) => Err(ExampleError::Contract {
                message: "mapping-form fields require a field_to_index".to_string(),
            }),
        }
    }

    /// Build an example from values aligned positionally with `fields`.
    ///
    /// Pairing stops at the shorter of the two. Text values lose exactly one trailing `'\n'`
    /// before processing.
    pub fn from_list(values: &[RawValue], fields: &ListFields) -> ExampleResult<Self> {
        let mut ex = Self::new();
        for (field, raw) in fields.iter().zip(values) {
            if matches!(field, ListField::Skip) {
                continue;
            }
            let raw = strip_one_newline(raw);
            for spec in field.specs() {
                ex.set_processed(spec, &raw)?;
            }
        }
        Ok(ex)
    }

    /// Build one example from the root of a bracketed tree.
    ///
    /// The example is [`Example::from_list`] over `[leaves joined by ' ', root label]`, so
    /// `fields` normally has two entries: text, then label.
    pub fn from_tree(text: &str, fields: &ListFields, parser: &dyn TreeParser) -> ExampleResult<Self> {
        let tree = parser.parse(text)?;
        Self::from_tree_node(&tree, fields)
    }

    /// Build one example per subtree (root included), in pre-order.
    pub fn from_subtrees(
        text: &str,
        fields: &ListFields,
        parser: &dyn TreeParser,
    ) -> ExampleResult<Vec<Self>> {
        let tree = parser.parse(text)?;
        tree.subtrees()
            .into_iter()
            .map(|t| Self::from_tree_node(t, fields))
            .collect()
    }

    fn from_tree_node(tree: &Tree, fields: &ListFields) -> ExampleResult<Self> {
        let values = [
            RawValue::String(tree.leaves().join(" ")),
            RawValue::String(tree.label().to_string()),
        ];
        Self::from_list(&values, fields)
    }

    fn set_processed(&mut self, spec: &FieldSpec, raw: &RawValue) -> ExampleResult<()> {
        let value = spec.apply(raw).map_err(|e| match e {
            ExampleError::ParseError { column, raw, message } if column.is_empty() => {
                ExampleError::ParseError {
                    column: spec.name.clone(),
                    raw,
                    message,
                }
            }
            other => other,
        })?;
        self.set(spec.name.as_str(), value);
        Ok(())
    }
}

fn strip_one_newline(raw: &RawValue) -> Cow<'_, RawValue> {
    match raw {
        RawValue::String(s) => match s.strip_suffix('\n') {
            Some(stripped) => Cow::Owned(RawValue::String(stripped.to_string())),
            None => Cow::Borrowed(raw),
        },
        _ => Cow::Borrowed(raw),
    }
}

impl Serialize for Example {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.attrs.len()))?;
        for (name, value) in &self.attrs {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
