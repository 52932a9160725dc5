//! Fields tables: which raw values feed which example attributes, and through which processor.
//!
//! Two table shapes exist:
//!
//! - **Mapping form** ([`DictFields`]): source key -> [`FieldEntry`]. Used by
//!   [`crate::example::Example::from_dict`], [`crate::example::Example::from_json`], and
//!   index-remapped CSV rows.
//! - **Positional form** ([`ListFields`]): one [`ListField`] per input position. Used by
//!   [`crate::example::Example::from_list`], positional CSV rows, and trees.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{ExampleError, ExampleResult};
use crate::types::{RawValue, Value};

/// Processor capability: turns one raw value into the value stored on an example.
pub trait Preprocess: Send + Sync {
    /// Process a single raw value.
    fn preprocess(&self, raw: &RawValue) -> ExampleResult<Value>;
}

impl<F> Preprocess for F
where
    F: Fn(&RawValue) -> ExampleResult<Value> + Send + Sync,
{
    fn preprocess(&self, raw: &RawValue) -> ExampleResult<Value> {
        self(raw)
    }
}

/// A field descriptor: the target attribute name plus the processor that fills it.
#[derive(Clone)]
pub struct FieldSpec {
    /// Attribute name set on the example.
    pub name: String,
    /// Processor applied to the raw value.
    pub processor: Arc<dyn Preprocess>,
}

impl FieldSpec {
    /// Create a descriptor that owns its processor.
    pub fn new(name: impl Into<String>, processor: impl Preprocess + 'static) -> Self {
        Self {
            name: name.into(),
            processor: Arc::new(processor),
        }
    }

    /// Create a descriptor around a processor shared with other descriptors.
    pub fn shared(name: impl Into<String>, processor: Arc<dyn Preprocess>) -> Self {
        Self {
            name: name.into(),
            processor,
        }
    }

    pub(crate) fn apply(&self, raw: &RawValue) -> ExampleResult<Value> {
        self.processor.preprocess(raw)
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Mapping-form table entry.
#[derive(Debug, Clone)]
pub enum FieldEntry {
    /// The key must exist in the input, but sets no attribute.
    Skip,
    /// One attribute from this key.
    Single(FieldSpec),
    /// Several attributes from the same key, set in order.
    Many(Vec<FieldSpec>),
}

impl FieldEntry {
    /// Descriptors this entry expands to (empty for [`FieldEntry::Skip`]).
    pub fn specs(&self) -> &[FieldSpec] {
        match self {
            FieldEntry::Skip => &[],
            FieldEntry::Single(spec) => std::slice::from_ref(spec),
            FieldEntry::Many(specs) => specs.as_slice(),
        }
    }
}

impl From<FieldSpec> for FieldEntry {
    fn from(spec: FieldSpec) -> Self {
        FieldEntry::Single(spec)
    }
}

impl From<Vec<FieldSpec>> for FieldEntry {
    fn from(specs: Vec<FieldSpec>) -> Self {
        FieldEntry::Many(specs)
    }
}

/// Mapping-form fields table.
///
/// Entries keep insertion order, which is also the order attributes are set on the example.
#[derive(Debug, Clone, Default)]
pub struct DictFields {
    entries: Vec<(String, FieldEntry)>,
}

impl DictFields {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Self::insert`].
    pub fn with(mut self, key: impl Into<String>, entry: impl Into<FieldEntry>) -> Self {
        self.insert(key, entry);
        self
    }

    /// Insert an entry. Re-inserting an existing key replaces its entry in place.
    pub fn insert(&mut self, key: impl Into<String>, entry: impl Into<FieldEntry>) {
        let key = key.into();
        let entry = entry.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = entry,
            None => self.entries.push((key, entry)),
        }
    }

    /// Look up the entry for a source key.
    pub fn get(&self, key: &str) -> Option<&FieldEntry> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, e)| e)
    }

    /// Iterate `(source key, entry)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    /// Iterate source keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of source keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, E: Into<FieldEntry>> FromIterator<(K, E)> for DictFields {
    fn from_iter<I: IntoIterator<Item = (K, E)>>(iter: I) -> Self {
        let mut out = DictFields::new();
        for (k, e) in iter {
            out.insert(k, e);
        }
        out
    }
}

/// Positional-form table entry.
#[derive(Debug, Clone)]
pub enum ListField {
    /// Ignore the value at this position.
    Skip,
    /// One attribute from this position.
    Single(FieldSpec),
    /// Several attributes from the same position, each with its own processor.
    FanOut(Vec<FieldSpec>),
}

impl ListField {
    /// Pair fan-out names with processors.
    ///
    /// Returns [`ExampleError::Contract`] if the two lists have different lengths.
    pub fn fan_out<N>(names: Vec<N>, processors: Vec<Arc<dyn Preprocess>>) -> ExampleResult<Self>
    where
        N: Into<String>,
    {
        if names.len() != processors.len() {
            return Err(ExampleError::Contract {
                message: format!(
                    "fan-out has {} names but {} processors",
                    names.len(),
                    processors.len()
                ),
            });
        }
        let specs = names
            .into_iter()
            .zip(processors)
            .map(|(n, p)| FieldSpec::shared(n, p))
            .collect();
        Ok(ListField::FanOut(specs))
    }

    /// Descriptors this entry expands to (empty for [`ListField::Skip`]).
    pub fn specs(&self) -> &[FieldSpec] {
        match self {
            ListField::Skip => &[],
            ListField::Single(spec) => std::slice::from_ref(spec),
            ListField::FanOut(specs) => specs.as_slice(),
        }
    }
}

impl From<FieldSpec> for ListField {
    fn from(spec: FieldSpec) -> Self {
        ListField::Single(spec)
    }
}

/// Positional-form fields table.
pub type ListFields = Vec<ListField>;

/// `field_to_index`: source key -> position in a row.
pub type FieldIndex = HashMap<String, usize>;

/// Either table shape, as accepted by [`crate::example::Example::from_csv`].
#[derive(Debug, Clone)]
pub enum FieldsTable {
    Dict(DictFields),
    List(ListFields),
}

impl From<DictFields> for FieldsTable {
    fn from(fields: DictFields) -> Self {
        FieldsTable::Dict(fields)
    }
}

impl From<ListFields> for FieldsTable {
    fn from(fields: ListFields) -> Self {
        FieldsTable::List(fields)
    }
}
