//! CSV/TSV ingestion: one example per record.

use std::io::Read;
use std::path::Path;

use crate::error::{ExampleError, ExampleResult};
use crate::example::Example;
use crate::field::{DictFields, FieldIndex, FieldsTable};
use crate::types::RawValue;

/// Ingest a delimited file into examples.
///
/// Uses `delimiter` and `has_headers` to configure the reader; see
/// [`examples_from_csv_reader`] for how rows are mapped.
pub fn examples_from_csv_path(
    path: impl AsRef<Path>,
    fields: &FieldsTable,
    field_to_index: Option<&FieldIndex>,
    delimiter: u8,
    has_headers: bool,
) -> ExampleResult<Vec<Example>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)?;
    examples_from_csv_reader(&mut rdr, fields, field_to_index)
}

/// Build one example per record of an existing CSV reader.
///
/// Rules:
///
/// - Positional ([`FieldsTable::List`]) fields map columns in order.
/// - Mapping ([`FieldsTable::Dict`]) fields need a key -> column index. An explicit
///   `field_to_index` wins; otherwise it is derived from the header row.
/// - Cells are passed to processors as text.
pub fn examples_from_csv_reader<R: Read>(
    rdr: &mut csv::Reader<R>,
    fields: &FieldsTable,
    field_to_index: Option<&FieldIndex>,
) -> ExampleResult<Vec<Example>> {
    let derived;
    let index = match (fields, field_to_index) {
        (_, Some(index)) => Some(index),
        (FieldsTable::Dict(dict), None) => {
            if !rdr.has_headers() {
                return Err(ExampleError::Contract {
                    message: "mapping-form fields need a header row or an explicit field_to_index"
                        .to_string(),
                });
            }
            derived = field_index_from_header(rdr.headers()?, dict)?;
            Some(&derived)
        }
        (FieldsTable::List(_), None) => None,
    };

    let mut examples = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        let record = result?;
        let row: Vec<RawValue> = record
            .iter()
            .map(|cell| RawValue::String(cell.to_string()))
            .collect();
        let ex = Example::from_csv(&row, fields, index)?;
        tracing::debug!(record = row_idx0, attributes = ex.len(), "built example from csv record");
        examples.push(ex);
    }

    Ok(examples)
}

/// Map every key of `fields` to its column position in `headers`.
pub fn field_index_from_header(
    headers: &csv::StringRecord,
    fields: &DictFields,
) -> ExampleResult<FieldIndex> {
    let mut index = FieldIndex::with_capacity(fields.len());
    for key in fields.keys() {
        match headers.iter().position(|h| h == key) {
            Some(idx) => {
                index.insert(key.to_string(), idx);
            }
            None => {
                return Err(ExampleError::SchemaMismatch {
                    message: format!(
                        "missing required column '{key}'. headers={:?}",
                        headers.iter().collect::<Vec<_>>()
                    ),
                });
            }
        }
    }
    Ok(index)
}
