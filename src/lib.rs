//! `example-records` turns raw records into uniform training/test [`example::Example`]s: ordered
//! bags of named, preprocessed values.
//!
//! Each input shape has its own constructor:
//!
//! - [`example::Example::from_json`]: JSON object text
//! - [`example::Example::from_dict`]: a key -> raw value map
//! - [`example::Example::from_csv`]: one delimited row, positional or remapped by column index
//! - [`example::Example::from_list`]: values aligned positionally with the fields table
//! - [`example::Example::from_tree`] / [`example::Example::from_subtrees`]: bracketed parse trees
//!
//! Which attributes an example gets, and how each is computed, is decided by the fields table
//! ([`field::DictFields`] or [`field::ListFields`]): every entry names a target attribute and a
//! [`field::Preprocess`] processor.
//!
//! ## Quick example
//!
//! ```rust
//! use example_records::example::Example;
//! use example_records::field::{FieldSpec, ListField, ListFields};
//! use example_records::processors::{Tokenize, Typed};
//! use example_records::types::{DataType, Value};
//!
//! let fields: ListFields = vec![
//!     ListField::Single(FieldSpec::new("text", Tokenize::lowercase())),
//!     ListField::Skip,
//!     ListField::Single(FieldSpec::new("stars", Typed(DataType::Int64))),
//! ];
//! let row = [
//!     serde_json::json!("Great Movie\n"),
//!     serde_json::json!("ignored"),
//!     serde_json::json!("5"),
//! ];
//!
//! let ex = Example::from_list(&row, &fields).unwrap();
//! assert_eq!(ex.names().collect::<Vec<_>>(), vec!["text", "stars"]);
//! assert_eq!(ex.get("stars"), Some(&Value::Int64(5)));
//! ```
//!
//! ## Trees
//!
//! With the default `tree` feature, [`tree::default_tree_parser`] parses `(LABEL child ...)`
//! notation:
//!
//! ```rust
//! # #[cfg(feature = "tree")]
//! # {
//! use example_records::example::Example;
//! use example_records::field::{FieldSpec, ListField};
//! use example_records::processors::Identity;
//! use example_records::tree::default_tree_parser;
//! use example_records::types::Value;
//!
//! let fields = vec![
//!     ListField::Single(FieldSpec::new("text", Identity)),
//!     ListField::Single(FieldSpec::new("label", Identity)),
//! ];
//! let parser = default_tree_parser();
//! let ex = Example::from_tree("(S (NP a) (VP b))", &fields, parser.as_ref()).unwrap();
//! assert_eq!(ex.get("text"), Some(&Value::Utf8("a b".to_string())));
//! assert_eq!(ex.get("label"), Some(&Value::Utf8("S".to_string())));
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`example`]: the [`example::Example`] type and its constructors
//! - [`field`]: fields tables and the [`field::Preprocess`] capability
//! - [`processors`]: stock processors
//! - [`tree`]: bracketed tree parsing
//! - [`ingestion`]: whole-file ingestion (CSV/TSV, JSON/NDJSON, tree banks) with observers
//! - [`types`]: raw and processed value types
//! - [`error`]: the shared error type

pub mod error;
pub mod example;
pub mod field;
pub mod ingestion;
pub mod processors;
pub mod tree;
pub mod types;

pub use error::{ExampleError, ExampleResult};
pub use example::Example;
