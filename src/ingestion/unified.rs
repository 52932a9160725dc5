//! Unified ingestion entrypoint.
//!
//! Most callers should use [`examples_from_path`], which turns every record of a file into an
//! [`Example`] using a provided [`FieldsTable`].
//!
//! - If [`IngestionOptions::format`] is `None`, the ingestion format is inferred from the file
//!   extension.
//! - If an [`super::observability::IngestionObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{ExampleError, ExampleResult};
use crate::example::Example;
use crate::field::{FieldIndex, FieldsTable};
use crate::tree::{default_tree_parser, TreeParser};

use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};
use super::{csv, json, tree};

/// Supported ingestion formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionFormat {
    /// Comma-separated values (delimiter taken from [`IngestionOptions::delimiter`]).
    Csv,
    /// Tab-separated values.
    Tsv,
    /// JSON array-of-objects, single object, or NDJSON.
    Json,
    /// One bracketed parse tree per line.
    Tree,
}

impl IngestionFormat {
    /// Parse an ingestion format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "tsv" => Some(Self::Tsv),
            "json" | "ndjson" | "jsonl" => Some(Self::Json),
            "txt" | "tree" | "ptb" => Some(Self::Tree),
            _ => None,
        }
    }
}

/// Options controlling unified ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, auto-detect format from file extension.
    pub format: Option<IngestionFormat>,
    /// Field delimiter for [`IngestionFormat::Csv`].
    pub delimiter: u8,
    /// Whether delimited files start with a header row.
    pub has_headers: bool,
    /// Explicit key -> column mapping for mapping-form fields on delimited files.
    pub field_to_index: Option<FieldIndex>,
    /// For [`IngestionFormat::Tree`]: one example per subtree instead of per tree.
    pub subtrees: bool,
    /// Tree parser used for [`IngestionFormat::Tree`].
    pub tree_parser: Arc<dyn TreeParser>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("delimiter", &(self.delimiter as char))
            .field("has_headers", &self.has_headers)
            .field("field_to_index", &self.field_to_index)
            .field("subtrees", &self.subtrees)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            delimiter: b',',
            has_headers: true,
            field_to_index: None,
            subtrees: false,
            tree_parser: default_tree_parser(),
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Unified ingestion entry point for path-based sources.
///
/// - If `options.format` is `None`, format is inferred from the file extension.
/// - JSON requires mapping-form fields; trees require positional fields; delimited files take
///   either (see [`csv::examples_from_csv_reader`]).
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with the number of examples built
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use example_records::field::{DictFields, FieldSpec, FieldsTable};
/// use example_records::ingestion::{examples_from_path, IngestionOptions};
/// use example_records::processors::{Identity, Tokenize};
///
/// # fn main() -> Result<(), example_records::ExampleError> {
/// let fields = DictFields::new()
///     .with("text", FieldSpec::new("text", Tokenize::lowercase()))
///     .with("label", FieldSpec::new("label", Identity));
///
/// // Uses `.jsonl` to select JSON ingestion.
/// let examples = examples_from_path("reviews.jsonl", &FieldsTable::from(fields), &IngestionOptions::default())?;
/// println!("examples={}", examples.len());
/// # Ok(())
/// # }
/// ```
pub fn examples_from_path(
    path: impl AsRef<Path>,
    fields: &FieldsTable,
    options: &IngestionOptions,
) -> ExampleResult<Vec<Example>> {
    let path = path.as_ref();
    let fmt = match options.format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    let ctx = IngestionContext {
        path: path.to_path_buf(),
        format: fmt,
    };

    let result = ingest_dispatch(path, fmt, fields, options);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(examples) => obs.on_success(&ctx, IngestionStats { examples: examples.len() }),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn ingest_dispatch(
    path: &Path,
    fmt: IngestionFormat,
    fields: &FieldsTable,
    options: &IngestionOptions,
) -> ExampleResult<Vec<Example>> {
    let index = options.field_to_index.as_ref();
    match (fmt, fields) {
        (IngestionFormat::Csv, _) => {
            csv::examples_from_csv_path(path, fields, index, options.delimiter, options.has_headers)
        }
        (IngestionFormat::Tsv, _) => csv::examples_from_csv_path(path, fields, index, b'\t', options.has_headers),
        (IngestionFormat::Json, FieldsTable::Dict(dict)) => json::examples_from_json_path(path, dict),
        (IngestionFormat::Tree, FieldsTable::List(list)) => {
            tree::examples_from_tree_path(path, list, options.subtrees, options.tree_parser.as_ref())
        }
        (IngestionFormat::Json, FieldsTable::List(_)) => Err(ExampleError::Contract {
            message: "json ingestion requires mapping-form fields".to_string(),
        }),
        (IngestionFormat::Tree, FieldsTable::Dict(_)) => Err(ExampleError::Contract {
            message: "tree ingestion requires positional fields".to_string(),
        }),
    }
}

fn severity_for_error(e: &ExampleError) -> IngestionSeverity {
    match e {
        ExampleError::Io(_) => IngestionSeverity::Critical,
        ExampleError::TreeParserUnavailable { .. } => IngestionSeverity::Critical,
        ExampleError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        ExampleError::Json(_)
        | ExampleError::MissingKey { .. }
        | ExampleError::Contract { .. }
        | ExampleError::IndexOutOfBounds { .. }
        | ExampleError::TreeParse { .. }
        | ExampleError::ParseError { .. }
        | ExampleError::SchemaMismatch { .. } => IngestionSeverity::Error,
    }
}

fn infer_format_from_path(path: &Path) -> ExampleResult<IngestionFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ExampleError::SchemaMismatch {
            message: format!(
                "cannot infer format: path has no extension ({})",
                path.display()
            ),
        })?;

    IngestionFormat::from_extension(ext).ok_or_else(|| ExampleError::SchemaMismatch {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ),
    })
}

/// Convenience helper for callers that want an owned request object.
///
/// This can be useful if you want to enqueue ingestion work in a job system.
#[derive(Clone)]
pub struct ExampleRequest {
    /// Path to the input file.
    pub path: PathBuf,
    /// Fields table applied to every record.
    pub fields: FieldsTable,
    /// Options controlling ingestion.
    pub options: IngestionOptions,
}

impl fmt::Debug for ExampleRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExampleRequest")
            .field("path", &self.path)
            .field("fields", &self.fields)
            .field("options", &self.options)
            .finish()
    }
}

impl ExampleRequest {
    /// Execute the request by calling [`examples_from_path`].
    pub fn run(&self) -> ExampleResult<Vec<Example>> {
        examples_from_path(&self.path, &self.fields, &self.options)
    }
}
