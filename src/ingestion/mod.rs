//! File and reader ingestion: many records in, one [`crate::example::Example`] per record out.
//!
//! Most callers should use [`examples_from_path`] (from [`unified`]) which:
//!
//! - auto-detects format by file extension (or you can override via [`IngestionOptions`])
//! - builds one example per record with the matching [`crate::example::Example`] constructor
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - [`json`]
//! - [`tree`]

pub mod csv;
pub mod json;
pub mod observability;
pub mod tree;
pub mod unified;

pub use observability::{
    CompositeObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats, LogObserver,
};
pub use unified::{examples_from_path, ExampleRequest, IngestionFormat, IngestionOptions};
