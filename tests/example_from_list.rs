use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Map};

use example_records::example::Example;
use example_records::field::{DictFields, FieldEntry, FieldSpec, FieldsTable, ListField, ListFields, Preprocess};
use example_records::ingestion::IngestionOptions;
use example_records::processors::{Identity, Tokenize, Typed};
use example_records::tree::Tree;
use example_records::types::{DataType, RawValue, Value};
use example_records::{ExampleError, ExampleResult};

fn char_count(raw: &RawValue) -> ExampleResult<Value> {
    Ok(Value::Int64(raw.as_str().map(|s| s.chars().count()).unwrap_or(0) as i64))
}

fn single(name: &str) -> ListField {
    ListField::Single(FieldSpec::new(name, Identity))
}

#[test]
fn from_list_strips_exactly_one_trailing_newline() {
    let fields = vec![single("x")];

    let ex = Example::from_list(&[json!("hello\n")], &fields).unwrap();
    assert_eq!(ex.get("x"), Some(&Value::Utf8("hello".to_string())));

    let ex = Example::from_list(&[json!("hello\n\n")], &fields).unwrap();
    assert_eq!(ex.get("x"), Some(&Value::Utf8("hello\n".to_string())));

    let ex = Example::from_list(&[json!("hello \t")], &fields).unwrap();
    assert_eq!(ex.get("x"), Some(&Value::Utf8("hello \t".to_string())));
}

#[test]
fn from_list_leaves_non_text_values_alone() {
    let fields = vec![single("n"), single("tags")];
    let ex = Example::from_list(&[json!(3), json!(["a\n"])], &fields).unwrap();
    assert_eq!(ex.get("n"), Some(&Value::Int64(3)));
    assert_eq!(ex.get("tags"), Some(&Value::List(vec![Value::Utf8("a\n".to_string())])));
}

#[test]
fn from_list_skip_sets_nothing() {
    let fields = vec![ListField::Skip, single("y")];
    let ex = Example::from_list(&[json!({"anything": [1, 2]}), json!("v1")], &fields).unwrap();
    assert_eq!(ex.names().collect::<Vec<_>>(), vec!["y"]);
}

#[test]
fn from_list_stops_at_the_shorter_side() {
    let fields = vec![single("a"), single("b"), single("c")];
    let ex = Example::from_list(&[json!("1"), json!("2")], &fields).unwrap();
    assert_eq!(ex.len(), 2);

    let ex = Example::from_list(&[json!("1"), json!("2"), json!("3")], &vec![single("a")]).unwrap();
    assert_eq!(ex.len(), 1);
}

#[test]
fn from_list_fans_one_value_out_to_several_attributes() {
    let processors: Vec<Arc<dyn Preprocess>> = vec![Arc::new(Tokenize::default()), Arc::new(char_count)];
    let fields = vec![ListField::fan_out(vec!["tokens", "chars"], processors).unwrap()];

    let ex = Example::from_list(&[json!("a bc\n")], &fields).unwrap();
    assert_eq!(
        ex.get("tokens"),
        Some(&Value::List(vec![Value::Utf8("a".to_string()), Value::Utf8("bc".to_string())]))
    );
    assert_eq!(ex.get("chars"), Some(&Value::Int64(4)));
}

#[test]
fn from_csv_without_index_matches_from_list() {
    let fields: ListFields = vec![single("x")];
    let row = [json!("v0")];
    let via_csv = Example::from_csv(&row, &FieldsTable::List(fields.clone()), None).unwrap();
    let via_list = Example::from_list(&row, &fields).unwrap();
    assert_eq!(via_csv, via_list);
}

#[test]
fn from_csv_with_index_matches_from_dict() {
    let fields = DictFields::new()
        .with("a", FieldSpec::new("x", Identity))
        .with("b", FieldSpec::new("y", Typed(DataType::Utf8)));
    let index: HashMap<String, usize> = [("a".to_string(), 0), ("b".to_string(), 1)].into();
    let row = [json!("v0"), json!("v1")];

    let via_csv = Example::from_csv(&row, &FieldsTable::Dict(fields.clone()), Some(&index)).unwrap();

    let mut data = Map::new();
    data.insert("a".to_string(), json!("v0"));
    data.insert("b".to_string(), json!("v1"));
    let via_dict = Example::from_dict(&data, &fields).unwrap();

    assert_eq!(via_csv, via_dict);
    assert_eq!(via_csv.names().collect::<Vec<_>>(), vec!["x", "y"]);
}

#[test]
fn from_csv_errors_on_index_out_of_bounds() {
    let fields = DictFields::new().with("a", FieldSpec::new("x", Identity));
    let index: HashMap<String, usize> = [("a".to_string(), 5)].into();
    let err = Example::from_csv(&[json!("v0")], &FieldsTable::Dict(fields), Some(&index)).unwrap_err();
    match err {
        ExampleError::IndexOutOfBounds { key, index, len } => {
            assert_eq!((key.as_str(), index, len), ("a", 5, 1));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn from_csv_rejects_mismatched_table_shapes() {
    let index: HashMap<String, usize> = [("a".to_string(), 0)].into();
    let positional = FieldsTable::List(vec![single("x")]);
    let err = Example::from_csv(&[json!("v0")], &positional, Some(&index)).unwrap_err();
    assert!(matches!(err, ExampleError::Contract { .. }));

    let mapping = FieldsTable::Dict(DictFields::new().with("a", FieldSpec::new("x", Identity)));
    let err = Example::from_csv(&[json!("v0")], &mapping, None).unwrap_err();
    assert!(matches!(err, ExampleError::Contract { .. }));
}

#[test]
fn from_csv_reports_first_out_of_range_key_in_table_order() {
    let fields = DictFields::new()
        .with("b", FieldSpec::new("y", Identity))
        .with("a", FieldSpec::new("x", Identity))
        .with("c", FieldEntry::Skip);
    let index: HashMap<String, usize> =
        [("a".to_string(), 7), ("b".to_string(), 9), ("c".to_string(), 8)].into();

    for _ in 0..16 {
        let err = Example::from_csv(&[json!("v0")], &FieldsTable::Dict(fields.clone()), Some(&index))
            .unwrap_err();
        assert!(matches!(&err, ExampleError::IndexOutOfBounds { key, index: 9, .. } if key == "b"));
    }
}

#[test]
fn from_csv_key_without_index_is_missing() {
    let fields = DictFields::new()
        .with("a", FieldSpec::new("x", Identity))
        .with("b", FieldSpec::new("y", Identity));
    let index: HashMap<String, usize> = [("a".to_string(), 0)].into();

    let err = Example::from_csv(&[json!("v0"), json!("v1")], &FieldsTable::Dict(fields), Some(&index))
        .unwrap_err();
    assert!(matches!(&err, ExampleError::MissingKey { key } if key == "b"));
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn public_types_are_send_and_sync() {
    assert_send_sync::<FieldSpec>();
    assert_send_sync::<FieldEntry>();
    assert_send_sync::<DictFields>();
    assert_send_sync::<ListField>();
    assert_send_sync::<FieldsTable>();
    assert_send_sync::<Example>();
    assert_send_sync::<Tree>();
    assert_send_sync::<IngestionOptions>();
    assert_send_sync::<ExampleError>();
}

#[test]
fn shared_fields_build_examples_across_threads() {
    let fields = DictFields::new()
        .with("text", FieldSpec::new("tokens", Tokenize::lowercase()))
        .with("stars", FieldSpec::new("stars", Typed(DataType::Int64)));

    let built: Vec<Example> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let fields = &fields;
                s.spawn(move || {
                    let text = format!(r#"{{"text": "Row {i}", "stars": "{i}"}}"#);
                    Example::from_json(&text, fields).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, ex) in built.iter().enumerate() {
        assert_eq!(ex.get("stars"), Some(&Value::Int64(i as i64)));
        assert_eq!(ex.get("tokens").and_then(Value::as_list).map(|t| t.len()), Some(2));
    }
}
