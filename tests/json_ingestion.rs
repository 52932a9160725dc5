use example_records::field::{DictFields, FieldEntry, FieldSpec};
use example_records::ingestion::json::{examples_from_json_path, examples_from_json_str};
use example_records::processors::{Identity, Typed};
use example_records::types::{DataType, Value};

fn review_fields() -> DictFields {
    DictFields::new()
        .with("id", FieldSpec::new("id", Typed(DataType::Int64)))
        .with("text", FieldSpec::new("text", Identity))
        .with("label", FieldEntry::Skip)
}

#[test]
fn json_array_from_path_happy_path() {
    let exs = examples_from_json_path("tests/fixtures/reviews.json", &review_fields()).unwrap();

    assert_eq!(exs.len(), 2);
    assert_eq!(exs[0].get("id"), Some(&Value::Int64(1)));
    assert_eq!(exs[1].get("text"), Some(&Value::Utf8("Dull and long".to_string())));
    assert!(!exs[0].contains("label"));
}

#[test]
fn json_lines_from_path_skips_blank_lines() {
    let exs = examples_from_json_path("tests/fixtures/reviews.jsonl", &review_fields()).unwrap();
    assert_eq!(exs.len(), 2);
    assert_eq!(exs[1].get("id"), Some(&Value::Int64(2)));
}

#[test]
fn json_single_object_yields_one_example() {
    let exs = examples_from_json_str(r#"{"id": 3, "text": "t", "label": "pos"}"#, &review_fields()).unwrap();
    assert_eq!(exs.len(), 1);
}

#[test]
fn json_errors_on_missing_key() {
    let input = r#"[{"id": 1, "text": "t"}]"#;
    let err = examples_from_json_str(input, &review_fields()).unwrap_err();
    assert!(err.to_string().contains("Specified key label was not found"));
}

#[test]
fn json_errors_on_non_object_rows_and_bad_lines() {
    let err = examples_from_json_str("[1]", &review_fields()).unwrap_err();
    assert!(err.to_string().contains("row 1 is not a json object"));

    let input = "{\"id\": 1, \"text\": \"t\", \"label\": \"x\"}\n{broken\n";
    let err = examples_from_json_str(input, &review_fields()).unwrap_err();
    assert!(err.to_string().contains("invalid ndjson at line 2"));

    let err = examples_from_json_str("   ", &review_fields()).unwrap_err();
    assert!(err.to_string().contains("json input is empty"));
}
